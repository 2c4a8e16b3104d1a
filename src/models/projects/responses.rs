use super::entities::{Project, ProjectFile, ProjectMilestone};
use crate::models::common::PaginationInfo;
use serde::Serialize;

// 项目列表响应
#[derive(Debug, Serialize)]
pub struct ProjectListResponse {
    pub items: Vec<Project>,
    pub pagination: PaginationInfo,
}

// 里程碑列表响应
#[derive(Debug, Serialize)]
pub struct MilestoneListResponse {
    pub items: Vec<ProjectMilestone>,
    pub pagination: PaginationInfo,
}

// 项目文件列表响应
#[derive(Debug, Serialize)]
pub struct ProjectFileListResponse {
    pub items: Vec<ProjectFile>,
    pub pagination: PaginationInfo,
}
