use super::entities::{DiscussionMessage, Message};
use crate::models::common::PaginationInfo;
use serde::Serialize;

// 私信列表响应
#[derive(Debug, Serialize)]
pub struct MessageListResponse {
    pub items: Vec<Message>,
    pub pagination: PaginationInfo,
}

// 课程讨论列表响应
#[derive(Debug, Serialize)]
pub struct DiscussionListResponse {
    pub items: Vec<DiscussionMessage>,
    pub pagination: PaginationInfo,
}
