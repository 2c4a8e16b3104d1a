use serde::Serialize;

// 公告（全局公告对所有人可见，课程公告按选课/授课范围可见）
#[derive(Debug, Clone, Serialize)]
pub struct Announcement {
    pub id: i64,
    pub course_id: Option<i64>,
    pub author_id: i64,
    pub title: String,
    pub content: String,
    pub is_global: bool,
    pub priority: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
    // 派生字段
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course_title: Option<String>,
}
