use std::sync::Arc;

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

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户（password 字段应为已哈希值）
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过用户名获取用户信息
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    // 通过邮箱获取用户信息
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 通过用户名或邮箱获取用户信息
    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>>;
    // 列出用户（经访问策略过滤）
    async fn list_users_with_pagination(
        &self,
        actor: Actor,
        query: UserListQuery,
    ) -> Result<UserListResponse>;
    // 获取用户详情（含选课/授课统计）
    async fn get_user_profile(&self, id: i64) -> Result<Option<UserResponse>>;
    // 更新用户信息
    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>>;
    // 删除用户
    async fn delete_user(&self, id: i64) -> Result<bool>;
    // 更新用户最后登录时间
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    // 统计用户总数（用于初始管理员判断）
    async fn count_users(&self) -> Result<u64>;

    /// 课程管理方法
    async fn create_course(&self, course: CreateCourseRequest) -> Result<Course>;
    async fn get_course_by_id(&self, id: i64) -> Result<Option<Course>>;
    async fn list_courses_with_pagination(
        &self,
        query: CourseListParams,
    ) -> Result<CourseListResponse>;
    async fn update_course(&self, id: i64, update: UpdateCourseRequest) -> Result<Option<Course>>;
    async fn delete_course(&self, id: i64) -> Result<bool>;
    // 学生选课（已存在时幂等返回 false）
    async fn enroll_student(&self, course_id: i64, student_id: i64) -> Result<bool>;
    // 学生退课
    async fn unenroll_student(&self, course_id: i64, student_id: i64) -> Result<bool>;
    // 设置课程唯一授课教师
    async fn set_course_teacher(&self, course_id: i64, teacher_id: i64) -> Result<bool>;

    /// 课程单元管理方法
    async fn create_unit(&self, unit: CreateUnitRequest) -> Result<Unit>;
    async fn get_unit_by_id(&self, id: i64) -> Result<Option<Unit>>;
    async fn list_units_with_pagination(
        &self,
        query: CourseScopedListParams,
    ) -> Result<UnitListResponse>;
    async fn update_unit(&self, id: i64, update: UpdateUnitRequest) -> Result<Option<Unit>>;
    async fn delete_unit(&self, id: i64) -> Result<bool>;

    /// 学习资料管理方法
    async fn create_resource(&self, resource: CreateResourceRequest) -> Result<Resource>;
    async fn get_resource_by_id(&self, id: i64) -> Result<Option<Resource>>;
    async fn list_resources_with_pagination(
        &self,
        query: CourseScopedListParams,
    ) -> Result<ResourceListResponse>;
    async fn update_resource(
        &self,
        id: i64,
        update: UpdateResourceRequest,
    ) -> Result<Option<Resource>>;
    async fn delete_resource(&self, id: i64) -> Result<bool>;

    /// 作业管理方法
    async fn create_assignment(&self, assignment: CreateAssignmentRequest) -> Result<Assignment>;
    async fn get_assignment_by_id(&self, id: i64) -> Result<Option<Assignment>>;
    async fn list_assignments_with_pagination(
        &self,
        query: AssignmentListParams,
    ) -> Result<AssignmentListResponse>;
    async fn update_assignment(
        &self,
        id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>>;
    async fn delete_assignment(&self, id: i64) -> Result<bool>;

    /// 作业提交管理方法
    // 创建提交，student 取自 actor
    async fn create_submission(
        &self,
        actor: Actor,
        submission: CreateSubmissionRequest,
    ) -> Result<Submission>;
    async fn get_submission_by_id(&self, actor: Actor, id: i64) -> Result<Option<Submission>>;
    async fn list_submissions_with_pagination(
        &self,
        actor: Actor,
        query: SubmissionListParams,
    ) -> Result<SubmissionListResponse>;
    async fn update_submission(
        &self,
        id: i64,
        update: UpdateSubmissionRequest,
    ) -> Result<Option<Submission>>;
    async fn delete_submission(&self, id: i64) -> Result<bool>;

    /// 私信管理方法
    async fn create_message(&self, actor: Actor, message: CreateMessageRequest)
    -> Result<Message>;
    async fn get_message_by_id(&self, actor: Actor, id: i64) -> Result<Option<Message>>;
    async fn list_messages_with_pagination(
        &self,
        actor: Actor,
        query: MessageListParams,
    ) -> Result<MessageListResponse>;
    async fn update_message(&self, id: i64, update: UpdateMessageRequest)
    -> Result<Option<Message>>;
    async fn delete_message(&self, id: i64) -> Result<bool>;

    /// 课程讨论管理方法
    async fn create_discussion_message(
        &self,
        actor: Actor,
        message: CreateDiscussionRequest,
    ) -> Result<DiscussionMessage>;
    async fn get_discussion_message_by_id(&self, id: i64) -> Result<Option<DiscussionMessage>>;
    async fn list_discussion_messages_with_pagination(
        &self,
        query: DiscussionListParams,
    ) -> Result<DiscussionListResponse>;
    async fn delete_discussion_message(&self, id: i64) -> Result<bool>;

    /// 公告管理方法
    async fn create_announcement(
        &self,
        actor: Actor,
        announcement: CreateAnnouncementRequest,
    ) -> Result<Announcement>;
    async fn get_announcement_by_id(&self, actor: Actor, id: i64) -> Result<Option<Announcement>>;
    async fn list_announcements_with_pagination(
        &self,
        actor: Actor,
        query: AnnouncementListParams,
    ) -> Result<AnnouncementListResponse>;
    async fn update_announcement(
        &self,
        id: i64,
        update: UpdateAnnouncementRequest,
    ) -> Result<Option<Announcement>>;
    async fn delete_announcement(&self, id: i64) -> Result<bool>;

    /// 项目管理方法
    async fn create_project(&self, project: CreateProjectRequest) -> Result<Project>;
    async fn get_project_by_id(&self, actor: Actor, id: i64) -> Result<Option<Project>>;
    async fn list_projects_with_pagination(
        &self,
        actor: Actor,
        query: ProjectListParams,
    ) -> Result<ProjectListResponse>;
    async fn update_project(&self, id: i64, update: UpdateProjectRequest)
    -> Result<Option<Project>>;
    async fn delete_project(&self, id: i64) -> Result<bool>;

    /// 项目里程碑管理方法
    async fn create_milestone(&self, milestone: CreateMilestoneRequest)
    -> Result<ProjectMilestone>;
    async fn get_milestone_by_id(&self, id: i64) -> Result<Option<ProjectMilestone>>;
    async fn list_milestones_with_pagination(
        &self,
        query: MilestoneListParams,
    ) -> Result<MilestoneListResponse>;
    async fn update_milestone(
        &self,
        id: i64,
        update: UpdateMilestoneRequest,
    ) -> Result<Option<ProjectMilestone>>;
    async fn delete_milestone(&self, id: i64) -> Result<bool>;

    /// 项目文件管理方法
    // uploader 取自 actor
    async fn create_project_file(
        &self,
        actor: Actor,
        file: CreateProjectFileRequest,
    ) -> Result<ProjectFile>;
    async fn get_project_file_by_id(&self, id: i64) -> Result<Option<ProjectFile>>;
    async fn list_project_files_with_pagination(
        &self,
        query: ProjectFileListParams,
    ) -> Result<ProjectFileListResponse>;
    async fn update_project_file(
        &self,
        id: i64,
        update: UpdateProjectFileRequest,
    ) -> Result<Option<ProjectFile>>;
    async fn delete_project_file(&self, id: i64) -> Result<bool>;

    /// 考试管理方法
    // 嵌套创建考试（试题+选项），单事务执行
    async fn create_exam_with_questions(
        &self,
        actor: Actor,
        exam: CreateExamRequest,
    ) -> Result<Exam>;
    async fn get_exam_by_id(&self, actor: Actor, id: i64) -> Result<Option<Exam>>;
    async fn list_exams_with_pagination(
        &self,
        actor: Actor,
        query: ExamListParams,
    ) -> Result<ExamListResponse>;
    async fn update_exam(&self, id: i64, update: UpdateExamRequest) -> Result<Option<Exam>>;
    async fn delete_exam(&self, id: i64) -> Result<bool>;

    /// 考试提交管理方法
    async fn create_exam_submission(
        &self,
        actor: Actor,
        submission: CreateExamSubmissionRequest,
    ) -> Result<ExamSubmission>;
    async fn get_exam_submission_by_id(
        &self,
        actor: Actor,
        id: i64,
    ) -> Result<Option<ExamSubmission>>;
    async fn list_exam_submissions_with_pagination(
        &self,
        actor: Actor,
        query: ExamSubmissionListParams,
    ) -> Result<ExamSubmissionListResponse>;
    async fn update_exam_submission(
        &self,
        id: i64,
        update: UpdateExamSubmissionRequest,
    ) -> Result<Option<ExamSubmission>>;
    async fn delete_exam_submission(&self, id: i64) -> Result<bool>;

    /// 管理端方法
    // 批量更新用户状态，返回受影响行数
    async fn bulk_update_user_status(&self, user_ids: &[i64], status: UserStatus) -> Result<u64>;
    // 批量删除用户，返回受影响行数
    async fn bulk_delete_users(&self, user_ids: &[i64]) -> Result<u64>;
    // 仪表盘统计
    async fn get_dashboard_stats(&self) -> Result<DashboardStatsResponse>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
