use super::entities::Announcement;
use crate::models::common::PaginationInfo;
use serde::Serialize;

// 公告列表响应（priority 降序，created_at 降序）
#[derive(Debug, Serialize)]
pub struct AnnouncementListResponse {
    pub items: Vec<Announcement>,
    pub pagination: PaginationInfo,
}
