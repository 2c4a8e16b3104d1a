use crate::models::common::PaginationQuery;
use serde::Deserialize;

// 作业查询参数
#[derive(Debug, Deserialize)]
pub struct AssignmentListParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub course_id: Option<i64>,
}

// 作业创建请求
#[derive(Debug, Deserialize)]
pub struct CreateAssignmentRequest {
    pub course_id: i64,
    pub title: String,
    pub description: String,
    pub due_date: chrono::DateTime<chrono::Utc>,
    pub file_path: Option<String>,
}

// 作业更新请求
#[derive(Debug, Deserialize)]
pub struct UpdateAssignmentRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<chrono::DateTime<chrono::Utc>>,
}

// 提交查询参数
#[derive(Debug, Deserialize)]
pub struct SubmissionListParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub assignment_id: Option<i64>,
}

// 提交创建请求（student 由服务端填充，不信任载荷）
#[derive(Debug, Deserialize)]
pub struct CreateSubmissionRequest {
    pub assignment_id: i64,
    pub file_path: String,
}

// 提交更新请求（教师评分/评语）
#[derive(Debug, Deserialize)]
pub struct UpdateSubmissionRequest {
    pub grade: Option<String>,
    pub feedback: Option<String>,
}
