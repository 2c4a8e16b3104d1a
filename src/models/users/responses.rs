use super::entities::User;
use crate::models::common::PaginationInfo;
use serde::Serialize;

// 用户详情响应（携带派生统计字段）
#[derive(Debug, Serialize)]
pub struct UserResponse {
    #[serde(flatten)]
    pub user: User,
    pub courses_enrolled_count: i64,
    pub courses_taught_count: i64,
}

// 用户列表响应
#[derive(Debug, Serialize)]
pub struct UserListResponse {
    pub items: Vec<User>,
    pub pagination: PaginationInfo,
}
