//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod admin;
mod announcements;
mod assignments;
mod courses;
mod exams;
mod messages;
mod projects;
mod users;

use crate::config::AppConfig;
use crate::errors::{EduSystemError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| EduSystemError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| EduSystemError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| EduSystemError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(EduSystemError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
use crate::access::Actor;
use crate::models::{
    admin::responses::DashboardStatsResponse,
    announcements::{
        entities::Announcement,
        requests::{AnnouncementListParams, CreateAnnouncementRequest, UpdateAnnouncementRequest},
        responses::AnnouncementListResponse,
    },
    assignments::{
        entities::{Assignment, Submission},
        requests::{
            AssignmentListParams, CreateAssignmentRequest, CreateSubmissionRequest,
            SubmissionListParams, UpdateAssignmentRequest, UpdateSubmissionRequest,
        },
        responses::{AssignmentListResponse, SubmissionListResponse},
    },
    courses::{
        entities::{Course, Resource, Unit},
        requests::{
            CourseListParams, CourseScopedListParams, CreateCourseRequest, CreateResourceRequest,
            CreateUnitRequest, UpdateCourseRequest, UpdateResourceRequest, UpdateUnitRequest,
        },
        responses::{CourseListResponse, ResourceListResponse, UnitListResponse},
    },
    exams::{
        entities::{Exam, ExamSubmission},
        requests::{
            CreateExamRequest, CreateExamSubmissionRequest, ExamListParams,
            ExamSubmissionListParams, UpdateExamRequest, UpdateExamSubmissionRequest,
        },
        responses::{ExamListResponse, ExamSubmissionListResponse},
    },
    messages::{
        entities::{DiscussionMessage, Message},
        requests::{
            CreateDiscussionRequest, CreateMessageRequest, DiscussionListParams,
            MessageListParams, UpdateMessageRequest,
        },
        responses::{DiscussionListResponse, MessageListResponse},
    },
    projects::{
        entities::{Project, ProjectFile, ProjectMilestone},
        requests::{
            CreateMilestoneRequest, CreateProjectFileRequest, CreateProjectRequest,
            MilestoneListParams, ProjectFileListParams, ProjectListParams, UpdateMilestoneRequest,
            UpdateProjectFileRequest, UpdateProjectRequest,
        },
        responses::{MilestoneListResponse, ProjectFileListResponse, ProjectListResponse},
    },
    users::{
        entities::{User, UserStatus},
        requests::{CreateUserRequest, UpdateUserRequest, UserListQuery},
        responses::{UserListResponse, UserResponse},
    },
};
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.get_user_by_username_impl(username).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(email).await
    }

    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>> {
        self.get_user_by_username_or_email_impl(identifier).await
    }

    async fn list_users_with_pagination(
        &self,
        actor: Actor,
        query: UserListQuery,
    ) -> Result<UserListResponse> {
        self.list_users_with_pagination_impl(actor, query).await
    }

    async fn get_user_profile(&self, id: i64) -> Result<Option<UserResponse>> {
        self.get_user_profile_impl(id).await
    }

    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>> {
        self.update_user_impl(id, update).await
    }

    async fn delete_user(&self, id: i64) -> Result<bool> {
        self.delete_user_impl(id).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    async fn count_users(&self) -> Result<u64> {
        self.count_users_impl().await
    }

    // 课程模块
    async fn create_course(&self, course: CreateCourseRequest) -> Result<Course> {
        self.create_course_impl(course).await
    }

    async fn get_course_by_id(&self, id: i64) -> Result<Option<Course>> {
        self.get_course_by_id_impl(id).await
    }

    async fn list_courses_with_pagination(
        &self,
        query: CourseListParams,
    ) -> Result<CourseListResponse> {
        self.list_courses_with_pagination_impl(query).await
    }

    async fn update_course(&self, id: i64, update: UpdateCourseRequest) -> Result<Option<Course>> {
        self.update_course_impl(id, update).await
    }

    async fn delete_course(&self, id: i64) -> Result<bool> {
        self.delete_course_impl(id).await
    }

    async fn enroll_student(&self, course_id: i64, student_id: i64) -> Result<bool> {
        self.enroll_student_impl(course_id, student_id).await
    }

    async fn unenroll_student(&self, course_id: i64, student_id: i64) -> Result<bool> {
        self.unenroll_student_impl(course_id, student_id).await
    }

    async fn set_course_teacher(&self, course_id: i64, teacher_id: i64) -> Result<bool> {
        self.set_course_teacher_impl(course_id, teacher_id).await
    }

    // 单元模块
    async fn create_unit(&self, unit: CreateUnitRequest) -> Result<Unit> {
        self.create_unit_impl(unit).await
    }

    async fn get_unit_by_id(&self, id: i64) -> Result<Option<Unit>> {
        self.get_unit_by_id_impl(id).await
    }

    async fn list_units_with_pagination(
        &self,
        query: CourseScopedListParams,
    ) -> Result<UnitListResponse> {
        self.list_units_with_pagination_impl(query).await
    }

    async fn update_unit(&self, id: i64, update: UpdateUnitRequest) -> Result<Option<Unit>> {
        self.update_unit_impl(id, update).await
    }

    async fn delete_unit(&self, id: i64) -> Result<bool> {
        self.delete_unit_impl(id).await
    }

    // 学习资料模块
    async fn create_resource(&self, resource: CreateResourceRequest) -> Result<Resource> {
        self.create_resource_impl(resource).await
    }

    async fn get_resource_by_id(&self, id: i64) -> Result<Option<Resource>> {
        self.get_resource_by_id_impl(id).await
    }

    async fn list_resources_with_pagination(
        &self,
        query: CourseScopedListParams,
    ) -> Result<ResourceListResponse> {
        self.list_resources_with_pagination_impl(query).await
    }

    async fn update_resource(
        &self,
        id: i64,
        update: UpdateResourceRequest,
    ) -> Result<Option<Resource>> {
        self.update_resource_impl(id, update).await
    }

    async fn delete_resource(&self, id: i64) -> Result<bool> {
        self.delete_resource_impl(id).await
    }

    // 作业模块
    async fn create_assignment(&self, assignment: CreateAssignmentRequest) -> Result<Assignment> {
        self.create_assignment_impl(assignment).await
    }

    async fn get_assignment_by_id(&self, id: i64) -> Result<Option<Assignment>> {
        self.get_assignment_by_id_impl(id).await
    }

    async fn list_assignments_with_pagination(
        &self,
        query: AssignmentListParams,
    ) -> Result<AssignmentListResponse> {
        self.list_assignments_with_pagination_impl(query).await
    }

    async fn update_assignment(
        &self,
        id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>> {
        self.update_assignment_impl(id, update).await
    }

    async fn delete_assignment(&self, id: i64) -> Result<bool> {
        self.delete_assignment_impl(id).await
    }

    // 提交模块
    async fn create_submission(
        &self,
        actor: Actor,
        submission: CreateSubmissionRequest,
    ) -> Result<Submission> {
        self.create_submission_impl(actor, submission).await
    }

    async fn get_submission_by_id(&self, actor: Actor, id: i64) -> Result<Option<Submission>> {
        self.get_submission_by_id_impl(actor, id).await
    }

    async fn list_submissions_with_pagination(
        &self,
        actor: Actor,
        query: SubmissionListParams,
    ) -> Result<SubmissionListResponse> {
        self.list_submissions_with_pagination_impl(actor, query)
            .await
    }

    async fn update_submission(
        &self,
        id: i64,
        update: UpdateSubmissionRequest,
    ) -> Result<Option<Submission>> {
        self.update_submission_impl(id, update).await
    }

    async fn delete_submission(&self, id: i64) -> Result<bool> {
        self.delete_submission_impl(id).await
    }

    // 私信模块
    async fn create_message(
        &self,
        actor: Actor,
        message: CreateMessageRequest,
    ) -> Result<Message> {
        self.create_message_impl(actor, message).await
    }

    async fn get_message_by_id(&self, actor: Actor, id: i64) -> Result<Option<Message>> {
        self.get_message_by_id_impl(actor, id).await
    }

    async fn list_messages_with_pagination(
        &self,
        actor: Actor,
        query: MessageListParams,
    ) -> Result<MessageListResponse> {
        self.list_messages_with_pagination_impl(actor, query).await
    }

    async fn update_message(
        &self,
        id: i64,
        update: UpdateMessageRequest,
    ) -> Result<Option<Message>> {
        self.update_message_impl(id, update).await
    }

    async fn delete_message(&self, id: i64) -> Result<bool> {
        self.delete_message_impl(id).await
    }

    // 课程讨论模块
    async fn create_discussion_message(
        &self,
        actor: Actor,
        message: CreateDiscussionRequest,
    ) -> Result<DiscussionMessage> {
        self.create_discussion_message_impl(actor, message).await
    }

    async fn get_discussion_message_by_id(&self, id: i64) -> Result<Option<DiscussionMessage>> {
        self.get_discussion_message_by_id_impl(id).await
    }

    async fn list_discussion_messages_with_pagination(
        &self,
        query: DiscussionListParams,
    ) -> Result<DiscussionListResponse> {
        self.list_discussion_messages_with_pagination_impl(query)
            .await
    }

    async fn delete_discussion_message(&self, id: i64) -> Result<bool> {
        self.delete_discussion_message_impl(id).await
    }

    // 公告模块
    async fn create_announcement(
        &self,
        actor: Actor,
        announcement: CreateAnnouncementRequest,
    ) -> Result<Announcement> {
        self.create_announcement_impl(actor, announcement).await
    }

    async fn get_announcement_by_id(
        &self,
        actor: Actor,
        id: i64,
    ) -> Result<Option<Announcement>> {
        self.get_announcement_by_id_impl(actor, id).await
    }

    async fn list_announcements_with_pagination(
        &self,
        actor: Actor,
        query: AnnouncementListParams,
    ) -> Result<AnnouncementListResponse> {
        self.list_announcements_with_pagination_impl(actor, query)
            .await
    }

    async fn update_announcement(
        &self,
        id: i64,
        update: UpdateAnnouncementRequest,
    ) -> Result<Option<Announcement>> {
        self.update_announcement_impl(id, update).await
    }

    async fn delete_announcement(&self, id: i64) -> Result<bool> {
        self.delete_announcement_impl(id).await
    }

    // 项目模块
    async fn create_project(&self, project: CreateProjectRequest) -> Result<Project> {
        self.create_project_impl(project).await
    }

    async fn get_project_by_id(&self, actor: Actor, id: i64) -> Result<Option<Project>> {
        self.get_project_by_id_impl(actor, id).await
    }

    async fn list_projects_with_pagination(
        &self,
        actor: Actor,
        query: ProjectListParams,
    ) -> Result<ProjectListResponse> {
        self.list_projects_with_pagination_impl(actor, query).await
    }

    async fn update_project(
        &self,
        id: i64,
        update: UpdateProjectRequest,
    ) -> Result<Option<Project>> {
        self.update_project_impl(id, update).await
    }

    async fn delete_project(&self, id: i64) -> Result<bool> {
        self.delete_project_impl(id).await
    }

    // 里程碑模块
    async fn create_milestone(
        &self,
        milestone: CreateMilestoneRequest,
    ) -> Result<ProjectMilestone> {
        self.create_milestone_impl(milestone).await
    }

    async fn get_milestone_by_id(&self, id: i64) -> Result<Option<ProjectMilestone>> {
        self.get_milestone_by_id_impl(id).await
    }

    async fn list_milestones_with_pagination(
        &self,
        query: MilestoneListParams,
    ) -> Result<MilestoneListResponse> {
        self.list_milestones_with_pagination_impl(query).await
    }

    async fn update_milestone(
        &self,
        id: i64,
        update: UpdateMilestoneRequest,
    ) -> Result<Option<ProjectMilestone>> {
        self.update_milestone_impl(id, update).await
    }

    async fn delete_milestone(&self, id: i64) -> Result<bool> {
        self.delete_milestone_impl(id).await
    }

    // 项目文件模块
    async fn create_project_file(
        &self,
        actor: Actor,
        file: CreateProjectFileRequest,
    ) -> Result<ProjectFile> {
        self.create_project_file_impl(actor, file).await
    }

    async fn get_project_file_by_id(&self, id: i64) -> Result<Option<ProjectFile>> {
        self.get_project_file_by_id_impl(id).await
    }

    async fn list_project_files_with_pagination(
        &self,
        query: ProjectFileListParams,
    ) -> Result<ProjectFileListResponse> {
        self.list_project_files_with_pagination_impl(query).await
    }

    async fn update_project_file(
        &self,
        id: i64,
        update: UpdateProjectFileRequest,
    ) -> Result<Option<ProjectFile>> {
        self.update_project_file_impl(id, update).await
    }

    async fn delete_project_file(&self, id: i64) -> Result<bool> {
        self.delete_project_file_impl(id).await
    }

    // 考试模块
    async fn create_exam_with_questions(
        &self,
        actor: Actor,
        exam: CreateExamRequest,
    ) -> Result<Exam> {
        self.create_exam_with_questions_impl(actor, exam).await
    }

    async fn get_exam_by_id(&self, actor: Actor, id: i64) -> Result<Option<Exam>> {
        self.get_exam_by_id_impl(actor, id).await
    }

    async fn list_exams_with_pagination(
        &self,
        actor: Actor,
        query: ExamListParams,
    ) -> Result<ExamListResponse> {
        self.list_exams_with_pagination_impl(actor, query).await
    }

    async fn update_exam(&self, id: i64, update: UpdateExamRequest) -> Result<Option<Exam>> {
        self.update_exam_impl(id, update).await
    }

    async fn delete_exam(&self, id: i64) -> Result<bool> {
        self.delete_exam_impl(id).await
    }

    // 考试提交模块
    async fn create_exam_submission(
        &self,
        actor: Actor,
        submission: CreateExamSubmissionRequest,
    ) -> Result<ExamSubmission> {
        self.create_exam_submission_impl(actor, submission).await
    }

    async fn get_exam_submission_by_id(
        &self,
        actor: Actor,
        id: i64,
    ) -> Result<Option<ExamSubmission>> {
        self.get_exam_submission_by_id_impl(actor, id).await
    }

    async fn list_exam_submissions_with_pagination(
        &self,
        actor: Actor,
        query: ExamSubmissionListParams,
    ) -> Result<ExamSubmissionListResponse> {
        self.list_exam_submissions_with_pagination_impl(actor, query)
            .await
    }

    async fn update_exam_submission(
        &self,
        id: i64,
        update: UpdateExamSubmissionRequest,
    ) -> Result<Option<ExamSubmission>> {
        self.update_exam_submission_impl(id, update).await
    }

    async fn delete_exam_submission(&self, id: i64) -> Result<bool> {
        self.delete_exam_submission_impl(id).await
    }

    // 管理端模块
    async fn bulk_update_user_status(&self, user_ids: &[i64], status: UserStatus) -> Result<u64> {
        self.bulk_update_user_status_impl(user_ids, status).await
    }

    async fn bulk_delete_users(&self, user_ids: &[i64]) -> Result<u64> {
        self.bulk_delete_users_impl(user_ids).await
    }

    async fn get_dashboard_stats(&self) -> Result<DashboardStatsResponse> {
        self.get_dashboard_stats_impl().await
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::SeaOrmStorage;
    use crate::models::users::entities::{User, UserRole};
    use crate::models::users::requests::CreateUserRequest;
    use migration::{Migrator, MigratorTrait};

    /// 每次调用返回独立的内存 SQLite 存储实例
    pub async fn memory_storage() -> SeaOrmStorage {
        crate::config::AppConfig::init_test_defaults();
        let db = sea_orm::Database::connect("sqlite::memory:")
            .await
            .expect("连接内存数据库失败");
        Migrator::up(&db, None).await.expect("执行迁移失败");
        SeaOrmStorage { db }
    }

    pub async fn seed_user(storage: &SeaOrmStorage, username: &str, role: UserRole) -> User {
        storage
            .create_user_impl(CreateUserRequest {
                username: username.to_string(),
                email: format!("{username}@test.local"),
                password: "hashed".to_string(),
                role,
            })
            .await
            .expect("创建用户失败")
    }
}
