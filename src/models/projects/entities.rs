use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 课程项目，序列化时内嵌里程碑与文件列表
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub student_id: i64,
    pub course_id: i64,
    /// 自由文本状态，默认 "In Progress"
    pub status: String,
    /// 截止日期（YYYY-MM-DD）
    pub deadline: String,
    pub grade: Option<String>,
    pub feedback: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course_title: Option<String>,
    pub milestones: Vec<ProjectMilestone>,
    pub files: Vec<ProjectFile>,
}

/// 项目里程碑
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectMilestone {
    pub id: i64,
    pub project_id: i64,
    pub title: String,
    /// 里程碑日期（YYYY-MM-DD）
    pub date: String,
    pub status: String,
    pub description: Option<String>,
}

/// 项目文件，file_path 以 /media URL 形式对外暴露
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectFile {
    pub id: i64,
    pub project_id: i64,
    pub uploader_id: i64,
    pub file_url: String,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uploader_name: Option<String>,
}
