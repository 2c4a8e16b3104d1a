//! 访问策略层
//!
//! 将「角色 × 资源」的可见性规则统一收敛为 SeaORM 查询条件，
//! 存储层在列表/详情查询时叠加这些条件，保证越权数据不会离开数据库。
//!
//! 返回空的 `Condition::all()` 表示不加任何限制（admin 的全量可见）。

use crate::entity::{
    announcements, course_students, courses, exam_submissions, exams, messages, projects,
    submissions, users,
};
use crate::models::users::entities::{User, UserRole};
use sea_orm::sea_query::{Query, SelectStatement};
use sea_orm::{ColumnTrait, Condition};

/// 已认证的请求主体
#[derive(Debug, Clone, Copy)]
pub struct Actor {
    pub id: i64,
    pub role: UserRole,
}

impl Actor {
    pub fn new(id: i64, role: UserRole) -> Self {
        Self { id, role }
    }

    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.id,
            role: user.role,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

// 学生已选课程 id 子查询
fn enrolled_course_ids(student_id: i64) -> SelectStatement {
    Query::select()
        .column(course_students::Column::CourseId)
        .from(course_students::Entity)
        .and_where(course_students::Column::StudentId.eq(student_id))
        .to_owned()
}

// 教师所授课程 id 子查询
fn taught_course_ids(teacher_id: i64) -> SelectStatement {
    Query::select()
        .column(courses::Column::Id)
        .from(courses::Entity)
        .and_where(courses::Column::TeacherId.eq(teacher_id))
        .to_owned()
}

// 教师创建的考试 id 子查询
fn created_exam_ids(teacher_id: i64) -> SelectStatement {
    Query::select()
        .column(exams::Column::Id)
        .from(exams::Entity)
        .and_where(exams::Column::CreatedBy.eq(teacher_id))
        .to_owned()
}

/// 用户列表可见范围：非 admin 仅能看到自己
pub fn user_scope(actor: &Actor) -> Condition {
    match actor.role {
        UserRole::Admin => Condition::all(),
        _ => Condition::all().add(users::Column::Id.eq(actor.id)),
    }
}

/// 私信可见范围：所有角色仅见自己收发的消息
pub fn message_scope(actor: &Actor) -> Condition {
    Condition::any()
        .add(messages::Column::SenderId.eq(actor.id))
        .add(messages::Column::ReceiverId.eq(actor.id))
}

/// 作业提交可见范围：学生仅见本人，教师与 admin 全量
pub fn submission_scope(actor: &Actor) -> Condition {
    match actor.role {
        UserRole::Student => Condition::all().add(submissions::Column::StudentId.eq(actor.id)),
        _ => Condition::all(),
    }
}

/// 项目可见范围：学生仅见本人，教师与 admin 全量
pub fn project_scope(actor: &Actor) -> Condition {
    match actor.role {
        UserRole::Student => Condition::all().add(projects::Column::StudentId.eq(actor.id)),
        _ => Condition::all(),
    }
}

/// 公告可见范围
///
/// - 学生：全局公告，或已选课程的公告
/// - 教师：全局公告、本人发布、或所授课程的公告
/// - admin：全量
pub fn announcement_scope(actor: &Actor) -> Condition {
    match actor.role {
        UserRole::Student => Condition::any()
            .add(announcements::Column::IsGlobal.eq(true))
            .add(announcements::Column::CourseId.in_subquery(enrolled_course_ids(actor.id))),
        UserRole::Teacher => Condition::any()
            .add(announcements::Column::IsGlobal.eq(true))
            .add(announcements::Column::AuthorId.eq(actor.id))
            .add(announcements::Column::CourseId.in_subquery(taught_course_ids(actor.id))),
        UserRole::Admin => Condition::all(),
    }
}

/// 考试可见范围
///
/// - 学生：已选课程的考试，以及未挂课程的公共考试
/// - 教师：仅本人创建的考试
/// - admin：全量
pub fn exam_scope(actor: &Actor) -> Condition {
    match actor.role {
        UserRole::Student => Condition::any()
            .add(exams::Column::CourseId.in_subquery(enrolled_course_ids(actor.id)))
            .add(exams::Column::CourseId.is_null()),
        UserRole::Teacher => Condition::all().add(exams::Column::CreatedBy.eq(actor.id)),
        UserRole::Admin => Condition::all(),
    }
}

/// 考试提交可见范围
///
/// - 学生：仅本人的提交
/// - 教师：本人创建的考试下的提交
/// - admin：全量
pub fn exam_submission_scope(actor: &Actor) -> Condition {
    match actor.role {
        UserRole::Student => {
            Condition::all().add(exam_submissions::Column::StudentId.eq(actor.id))
        }
        UserRole::Teacher => Condition::all()
            .add(exam_submissions::Column::ExamId.in_subquery(created_exam_ids(actor.id))),
        UserRole::Admin => Condition::all(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DbBackend, EntityTrait, QueryFilter, QueryTrait};

    fn student() -> Actor {
        Actor::new(7, UserRole::Student)
    }

    fn teacher() -> Actor {
        Actor::new(8, UserRole::Teacher)
    }

    fn admin() -> Actor {
        Actor::new(9, UserRole::Admin)
    }

    fn render<E: EntityTrait>(cond: Condition) -> String {
        E::find()
            .filter(cond)
            .build(DbBackend::Sqlite)
            .to_string()
    }

    // 空 Condition::all() 渲染为 WHERE TRUE
    fn is_unrestricted(sql: &str) -> bool {
        sql.ends_with("WHERE TRUE")
    }

    #[test]
    fn test_admin_scopes_are_unrestricted() {
        assert!(is_unrestricted(&render::<users::Entity>(user_scope(&admin()))));
        assert!(is_unrestricted(&render::<submissions::Entity>(
            submission_scope(&admin())
        )));
        assert!(is_unrestricted(&render::<projects::Entity>(project_scope(
            &admin()
        ))));
        assert!(is_unrestricted(&render::<announcements::Entity>(
            announcement_scope(&admin())
        )));
        assert!(is_unrestricted(&render::<exams::Entity>(exam_scope(
            &admin()
        ))));
        assert!(is_unrestricted(&render::<exam_submissions::Entity>(
            exam_submission_scope(&admin())
        )));
    }

    #[test]
    fn test_non_admin_sees_only_self_in_user_list() {
        let sql = render::<users::Entity>(user_scope(&student()));
        assert!(sql.contains("\"id\" = 7"));
        let sql = render::<users::Entity>(user_scope(&teacher()));
        assert!(sql.contains("\"id\" = 8"));
    }

    #[test]
    fn test_message_scope_is_sender_or_receiver_for_everyone() {
        for actor in [student(), teacher(), admin()] {
            let sql = render::<messages::Entity>(message_scope(&actor));
            assert!(sql.contains("\"sender_id\""));
            assert!(sql.contains("\"receiver_id\""));
            assert!(sql.contains(" OR "));
        }
    }

    #[test]
    fn test_student_submission_and_project_scope() {
        let sql = render::<submissions::Entity>(submission_scope(&student()));
        assert!(sql.contains("\"student_id\" = 7"));
        let sql = render::<projects::Entity>(project_scope(&student()));
        assert!(sql.contains("\"student_id\" = 7"));
        // 教师不受限
        assert!(is_unrestricted(&render::<submissions::Entity>(
            submission_scope(&teacher())
        )));
    }

    #[test]
    fn test_student_announcement_scope_uses_enrollment_subquery() {
        let sql = render::<announcements::Entity>(announcement_scope(&student()));
        assert!(sql.contains("\"is_global\""));
        assert!(sql.contains("\"course_students\""));
        assert!(sql.contains("\"student_id\" = 7"));
    }

    #[test]
    fn test_teacher_announcement_scope() {
        let sql = render::<announcements::Entity>(announcement_scope(&teacher()));
        assert!(sql.contains("\"is_global\""));
        assert!(sql.contains("\"author_id\" = 8"));
        assert!(sql.contains("\"teacher_id\" = 8"));
    }

    #[test]
    fn test_exam_scope_per_role() {
        let sql = render::<exams::Entity>(exam_scope(&student()));
        assert!(sql.contains("\"course_students\""));
        assert!(sql.contains("IS NULL"));

        let sql = render::<exams::Entity>(exam_scope(&teacher()));
        assert!(sql.contains("\"created_by\" = 8"));
    }

    #[test]
    fn test_exam_submission_scope_per_role() {
        let sql = render::<exam_submissions::Entity>(exam_submission_scope(&student()));
        assert!(sql.contains("\"student_id\" = 7"));

        let sql = render::<exam_submissions::Entity>(exam_submission_scope(&teacher()));
        assert!(sql.contains("\"exam_id\" IN"));
        assert!(sql.contains("\"created_by\" = 8"));
    }
}
