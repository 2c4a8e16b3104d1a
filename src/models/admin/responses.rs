use crate::models::users::entities::User;
use serde::Serialize;

// 批量操作结果
#[derive(Debug, Serialize)]
pub struct BulkActionResponse {
    pub affected: u64,
}

// 仪表盘统计
#[derive(Debug, Serialize)]
pub struct DashboardStatsResponse {
    pub total_students: u64,
    pub total_teachers: u64,
    pub total_courses: u64,
    pub recent_users: Vec<User>,
}
