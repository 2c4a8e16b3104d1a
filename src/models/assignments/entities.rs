use serde::Serialize;

// 作业
#[derive(Debug, Clone, Serialize)]
pub struct Assignment {
    pub id: i64,
    pub course_id: i64,
    pub title: String,
    pub description: String,
    pub due_date: chrono::DateTime<chrono::Utc>,
    pub file_url: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

// 作业提交
#[derive(Debug, Clone, Serialize)]
pub struct Submission {
    pub id: i64,
    pub assignment_id: i64,
    pub student_id: i64,
    pub file_url: String,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
    pub grade: Option<String>,
    pub feedback: Option<String>,
    // 派生字段（响应时由存储层补全）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignment_title: Option<String>,
}
