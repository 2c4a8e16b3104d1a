use crate::models::common::PaginationQuery;
use serde::Deserialize;

// 项目查询参数
#[derive(Debug, Deserialize)]
pub struct ProjectListParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub course_id: Option<i64>,
}

// 项目创建请求
#[derive(Debug, Deserialize)]
pub struct CreateProjectRequest {
    pub title: String,
    pub description: String,
    pub student_id: i64,
    pub course_id: i64,
    #[serde(default = "default_project_status")]
    pub status: String,
    pub deadline: String,
}

fn default_project_status() -> String {
    "In Progress".to_string()
}

// 项目更新请求
#[derive(Debug, Deserialize)]
pub struct UpdateProjectRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub deadline: Option<String>,
    pub grade: Option<String>,
    pub feedback: Option<String>,
}

// 里程碑查询参数
#[derive(Debug, Deserialize)]
pub struct MilestoneListParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub project_id: Option<i64>,
}

// 里程碑创建请求
#[derive(Debug, Deserialize)]
pub struct CreateMilestoneRequest {
    pub project_id: i64,
    pub title: String,
    pub date: String,
    #[serde(default = "default_milestone_status")]
    pub status: String,
    pub description: Option<String>,
}

fn default_milestone_status() -> String {
    "pending".to_string()
}

// 里程碑更新请求
#[derive(Debug, Deserialize)]
pub struct UpdateMilestoneRequest {
    pub title: Option<String>,
    pub date: Option<String>,
    pub status: Option<String>,
    pub description: Option<String>,
}

// 项目文件查询参数
#[derive(Debug, Deserialize)]
pub struct ProjectFileListParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub project_id: Option<i64>,
}

// 项目文件创建请求（uploader 由服务端填充）
#[derive(Debug, Deserialize)]
pub struct CreateProjectFileRequest {
    pub project_id: i64,
    pub file_path: String,
}

// 项目文件更新请求
#[derive(Debug, Deserialize)]
pub struct UpdateProjectFileRequest {
    pub file_path: Option<String>,
}
