use serde::Serialize;

// 私信（会话按时间升序排列）
#[derive(Debug, Clone, Serialize)]
pub struct Message {
    pub id: i64,
    pub sender_id: i64,
    pub receiver_id: i64,
    pub content: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub is_read: bool,
    // 派生字段
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receiver_name: Option<String>,
}

// 课程讨论消息
#[derive(Debug, Clone, Serialize)]
pub struct DiscussionMessage {
    pub id: i64,
    pub course_id: i64,
    pub user_id: i64,
    pub content: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
}
