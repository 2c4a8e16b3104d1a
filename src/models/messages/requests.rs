use crate::models::common::PaginationQuery;
use serde::Deserialize;

// 私信查询参数
#[derive(Debug, Deserialize)]
pub struct MessageListParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    // 可选：只看与某个用户的会话
    pub with_user_id: Option<i64>,
}

// 发送私信请求（sender 由服务端填充，不信任载荷）
#[derive(Debug, Deserialize)]
pub struct CreateMessageRequest {
    pub receiver_id: i64,
    pub content: String,
}

// 私信更新请求（标记已读）
#[derive(Debug, Deserialize)]
pub struct UpdateMessageRequest {
    pub is_read: Option<bool>,
}

// 课程讨论查询参数
#[derive(Debug, Deserialize)]
pub struct DiscussionListParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub course_id: Option<i64>,
}

// 发布课程讨论请求
#[derive(Debug, Deserialize)]
pub struct CreateDiscussionRequest {
    pub course_id: i64,
    pub content: String,
}
