pub mod admin;
pub mod announcements;
pub mod assignments;
pub mod auth;
pub mod common;
pub mod courses;
pub mod exams;
pub mod messages;
pub mod projects;
pub mod users;

pub use common::pagination::{PaginatedResponse, PaginationInfo, PaginationQuery};
pub use common::response::ApiResponse;

// 程序启动时间（用于运行时统计）
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

/// 业务错误码
///
/// HTTP 状态段沿用标准语义，1000 以上为业务细分错误。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Success = 0,
    BadRequest = 400,
    Unauthorized = 401,
    Forbidden = 403,
    NotFound = 404,
    RateLimitExceeded = 429,
    InternalServerError = 500,

    AuthFailed = 1001,
    RegisterFailed = 1002,
    UserAlreadyExists = 1003,
    UserNameInvalid = 1004,
    UserEmailInvalid = 1005,
    UserPasswordInvalid = 1006,
    UserNotFound = 1007,

    CourseNotFound = 2001,
    CourseRoleInvalid = 2002,

    AssignmentNotFound = 3001,
    SubmissionNotFound = 3002,

    ExamNotFound = 4001,
    ExamCreationFailed = 4002,

    ProjectNotFound = 5001,
    MilestoneNotFound = 5002,
    ProjectFileNotFound = 5003,

    AnnouncementNotFound = 6001,
    MessageNotFound = 6002,
    DiscussionNotFound = 6003,

    UnitNotFound = 7001,
    ResourceNotFound = 7002,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success as i32, 0);
        assert_eq!(ErrorCode::Forbidden as i32, 403);
        assert_eq!(ErrorCode::UserNotFound as i32, 1007);
        assert_eq!(ErrorCode::ExamNotFound as i32, 4001);
    }
}
