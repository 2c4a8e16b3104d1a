use super::entities::{Course, Resource, Unit};
use crate::models::common::PaginationInfo;
use serde::Serialize;

// 课程列表响应
#[derive(Debug, Serialize)]
pub struct CourseListResponse {
    pub items: Vec<Course>,
    pub pagination: PaginationInfo,
}

// 单元列表响应
#[derive(Debug, Serialize)]
pub struct UnitListResponse {
    pub items: Vec<Unit>,
    pub pagination: PaginationInfo,
}

// 资料列表响应
#[derive(Debug, Serialize)]
pub struct ResourceListResponse {
    pub items: Vec<Resource>,
    pub pagination: PaginationInfo,
}
