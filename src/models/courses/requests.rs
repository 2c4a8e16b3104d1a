use super::entities::ResourceKind;
use crate::models::common::PaginationQuery;
use serde::Deserialize;

// 课程查询参数
#[derive(Debug, Deserialize)]
pub struct CourseListParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
}

// 课程创建请求
#[derive(Debug, Deserialize)]
pub struct CreateCourseRequest {
    pub title: String,
    pub description: String,
    pub teacher_id: i64,
}

// 课程更新请求
#[derive(Debug, Deserialize)]
pub struct UpdateCourseRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub teacher_id: Option<i64>,
    // 整体替换选课学生集合
    pub student_ids: Option<Vec<i64>>,
}

// 单元创建/更新请求
#[derive(Debug, Deserialize)]
pub struct CreateUnitRequest {
    pub course_id: i64,
    pub title: String,
    #[serde(default)]
    pub order: i32,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUnitRequest {
    pub title: Option<String>,
    pub order: Option<i32>,
}

// 资料创建请求
#[derive(Debug, Deserialize)]
pub struct CreateResourceRequest {
    pub course_id: i64,
    pub unit_id: Option<i64>,
    pub title: String,
    pub kind: ResourceKind,
    pub file_path: Option<String>,
    pub url: Option<String>,
    pub content: Option<String>,
}

// 资料更新请求
#[derive(Debug, Deserialize)]
pub struct UpdateResourceRequest {
    pub unit_id: Option<i64>,
    pub title: Option<String>,
    pub kind: Option<ResourceKind>,
    pub url: Option<String>,
    pub content: Option<String>,
}

// 子资源列表查询（按课程/单元过滤）
#[derive(Debug, Deserialize)]
pub struct CourseScopedListParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub course_id: Option<i64>,
    pub unit_id: Option<i64>,
}
