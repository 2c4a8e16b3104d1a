use super::SeaOrmStorage;
use crate::access::{self, Actor};
use crate::entity::assignments::{
    ActiveModel, Column, Entity as Assignments,
};
use crate::entity::submissions::{
    ActiveModel as SubmissionActiveModel, Column as SubmissionColumn, Entity as Submissions,
    Model as SubmissionModel,
};
use crate::entity::users::{Column as UserColumn, Entity as Users};
use crate::errors::{EduSystemError, Result};
use crate::models::{
    PaginationInfo,
    assignments::{
        entities::{Assignment, Submission},
        requests::{
            AssignmentListParams, CreateAssignmentRequest, CreateSubmissionRequest,
            SubmissionListParams, UpdateAssignmentRequest, UpdateSubmissionRequest,
        },
        responses::{AssignmentListResponse, SubmissionListResponse},
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use std::collections::HashMap;

impl SeaOrmStorage {
    /// 创建作业
    pub async fn create_assignment_impl(&self, req: CreateAssignmentRequest) -> Result<Assignment> {
        let model = ActiveModel {
            course_id: Set(req.course_id),
            title: Set(req.title),
            description: Set(req.description),
            due_date: Set(req.due_date.timestamp()),
            file_path: Set(req.file_path),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("创建作业失败: {e}")))?;

        Ok(result.into_assignment())
    }

    /// 通过 ID 获取作业
    pub async fn get_assignment_by_id_impl(&self, id: i64) -> Result<Option<Assignment>> {
        let result = Assignments::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询作业失败: {e}")))?;

        Ok(result.map(|m| m.into_assignment()))
    }

    /// 分页列出作业
    pub async fn list_assignments_with_pagination_impl(
        &self,
        query: AssignmentListParams,
    ) -> Result<AssignmentListResponse> {
        let page = query.pagination.page.max(1) as u64;
        let size = query.pagination.size.clamp(1, 100) as u64;

        let mut select = Assignments::find();
        if let Some(course_id) = query.course_id {
            select = select.filter(Column::CourseId.eq(course_id));
        }
        select = select.order_by_desc(Column::CreatedAt);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询作业总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询作业页数失败: {e}")))?;
        let assignments = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询作业列表失败: {e}")))?;

        Ok(AssignmentListResponse {
            items: assignments
                .into_iter()
                .map(|m| m.into_assignment())
                .collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 更新作业
    pub async fn update_assignment_impl(
        &self,
        id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>> {
        let existing = self.get_assignment_by_id_impl(id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            ..Default::default()
        };

        if let Some(title) = update.title {
            model.title = Set(title);
        }
        if let Some(description) = update.description {
            model.description = Set(description);
        }
        if let Some(due_date) = update.due_date {
            model.due_date = Set(due_date.timestamp());
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("更新作业失败: {e}")))?;

        Ok(Some(result.into_assignment()))
    }

    /// 删除作业
    pub async fn delete_assignment_impl(&self, id: i64) -> Result<bool> {
        let result = Assignments::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("删除作业失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    // 批量补全提交的学生名与作业标题
    async fn hydrate_submissions(&self, models: Vec<SubmissionModel>) -> Result<Vec<Submission>> {
        if models.is_empty() {
            return Ok(Vec::new());
        }

        let student_ids: Vec<i64> = models.iter().map(|m| m.student_id).collect();
        let assignment_ids: Vec<i64> = models.iter().map(|m| m.assignment_id).collect();

        let usernames: HashMap<i64, String> = Users::find()
            .filter(UserColumn::Id.is_in(student_ids))
            .all(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询用户失败: {e}")))?
            .into_iter()
            .map(|u| (u.id, u.username))
            .collect();

        let titles: HashMap<i64, String> = Assignments::find()
            .filter(Column::Id.is_in(assignment_ids))
            .all(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询作业失败: {e}")))?
            .into_iter()
            .map(|a| (a.id, a.title))
            .collect();

        Ok(models
            .into_iter()
            .map(|m| {
                let student_name = usernames.get(&m.student_id).cloned();
                let assignment_title = titles.get(&m.assignment_id).cloned();
                let mut submission = m.into_submission();
                submission.student_name = student_name;
                submission.assignment_title = assignment_title;
                submission
            })
            .collect())
    }

    /// 创建作业提交，student 取自 actor
    pub async fn create_submission_impl(
        &self,
        actor: Actor,
        req: CreateSubmissionRequest,
    ) -> Result<Submission> {
        let model = SubmissionActiveModel {
            assignment_id: Set(req.assignment_id),
            student_id: Set(actor.id),
            file_path: Set(req.file_path),
            submitted_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("创建提交失败: {e}")))?;

        let submissions = self.hydrate_submissions(vec![result]).await?;
        submissions
            .into_iter()
            .next()
            .ok_or_else(|| EduSystemError::database_operation("提交组装失败"))
    }

    /// 通过 ID 获取提交（经访问策略过滤）
    pub async fn get_submission_by_id_impl(
        &self,
        actor: Actor,
        id: i64,
    ) -> Result<Option<Submission>> {
        let result = Submissions::find_by_id(id)
            .filter(access::submission_scope(&actor))
            .one(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询提交失败: {e}")))?;

        match result {
            Some(model) => Ok(self
                .hydrate_submissions(vec![model])
                .await?
                .into_iter()
                .next()),
            None => Ok(None),
        }
    }

    /// 分页列出提交（经访问策略过滤）
    pub async fn list_submissions_with_pagination_impl(
        &self,
        actor: Actor,
        query: SubmissionListParams,
    ) -> Result<SubmissionListResponse> {
        let page = query.pagination.page.max(1) as u64;
        let size = query.pagination.size.clamp(1, 100) as u64;

        let mut select = Submissions::find().filter(access::submission_scope(&actor));
        if let Some(assignment_id) = query.assignment_id {
            select = select.filter(SubmissionColumn::AssignmentId.eq(assignment_id));
        }
        select = select.order_by_desc(SubmissionColumn::SubmittedAt);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询提交总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询提交页数失败: {e}")))?;
        let models = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询提交列表失败: {e}")))?;

        Ok(SubmissionListResponse {
            items: self.hydrate_submissions(models).await?,
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 更新提交（教师评分/评语）
    pub async fn update_submission_impl(
        &self,
        id: i64,
        update: UpdateSubmissionRequest,
    ) -> Result<Option<Submission>> {
        let existing = Submissions::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询提交失败: {e}")))?;
        if existing.is_none() {
            return Ok(None);
        }

        let mut model = SubmissionActiveModel {
            id: Set(id),
            ..Default::default()
        };

        if let Some(grade) = update.grade {
            model.grade = Set(Some(grade));
        }
        if let Some(feedback) = update.feedback {
            model.feedback = Set(Some(feedback));
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("更新提交失败: {e}")))?;

        Ok(self
            .hydrate_submissions(vec![result])
            .await?
            .into_iter()
            .next())
    }

    /// 删除提交
    pub async fn delete_submission_impl(&self, id: i64) -> Result<bool> {
        let result = Submissions::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("删除提交失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{memory_storage, seed_user};
    use super::*;
    use crate::models::courses::requests::CreateCourseRequest;
    use crate::models::users::entities::UserRole;

    #[tokio::test]
    async fn test_submission_hidden_from_other_student() {
        let storage = memory_storage().await;
        let teacher = seed_user(&storage, "teacher1", UserRole::Teacher).await;
        let owner = seed_user(&storage, "stu_a", UserRole::Student).await;
        let other = seed_user(&storage, "stu_b", UserRole::Student).await;

        let course = storage
            .create_course_impl(CreateCourseRequest {
                title: "数学".to_string(),
                description: "基础课程".to_string(),
                teacher_id: teacher.id,
            })
            .await
            .unwrap();
        let assignment = storage
            .create_assignment_impl(CreateAssignmentRequest {
                course_id: course.id,
                title: "作业一".to_string(),
                description: "第一章习题".to_string(),
                due_date: chrono::Utc::now(),
                file_path: None,
            })
            .await
            .unwrap();

        let submission = storage
            .create_submission_impl(
                Actor::new(owner.id, owner.role),
                CreateSubmissionRequest {
                    assignment_id: assignment.id,
                    file_path: "uploads/answer.pdf".to_string(),
                },
            )
            .await
            .unwrap();
        assert_eq!(submission.student_id, owner.id);

        let visible = storage
            .get_submission_by_id_impl(Actor::new(owner.id, owner.role), submission.id)
            .await
            .unwrap();
        assert!(visible.is_some());

        let hidden = storage
            .get_submission_by_id_impl(Actor::new(other.id, other.role), submission.id)
            .await
            .unwrap();
        assert!(hidden.is_none());
    }
}
