use crate::models::common::PaginationQuery;
use serde::Deserialize;

// 公告查询参数
#[derive(Debug, Deserialize)]
pub struct AnnouncementListParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub course_id: Option<i64>,
}

// 公告创建请求（author 由服务端填充）
#[derive(Debug, Deserialize)]
pub struct CreateAnnouncementRequest {
    pub course_id: Option<i64>,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub is_global: bool,
    #[serde(default)]
    pub priority: i32,
}

// 公告更新请求
#[derive(Debug, Deserialize)]
pub struct UpdateAnnouncementRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub is_global: Option<bool>,
    pub priority: Option<i32>,
}
