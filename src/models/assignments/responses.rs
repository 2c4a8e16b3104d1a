use super::entities::{Assignment, Submission};
use crate::models::common::PaginationInfo;
use serde::Serialize;

// 作业列表响应
#[derive(Debug, Serialize)]
pub struct AssignmentListResponse {
    pub items: Vec<Assignment>,
    pub pagination: PaginationInfo,
}

// 提交列表响应
#[derive(Debug, Serialize)]
pub struct SubmissionListResponse {
    pub items: Vec<Submission>,
    pub pagination: PaginationInfo,
}
