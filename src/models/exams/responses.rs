use super::entities::{Exam, ExamSubmission};
use crate::models::common::PaginationInfo;
use serde::Serialize;

// 考试列表响应
#[derive(Debug, Serialize)]
pub struct ExamListResponse {
    pub items: Vec<Exam>,
    pub pagination: PaginationInfo,
}

// 考试提交列表响应
#[derive(Debug, Serialize)]
pub struct ExamSubmissionListResponse {
    pub items: Vec<ExamSubmission>,
    pub pagination: PaginationInfo,
}
