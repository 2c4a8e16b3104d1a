use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 考试，序列化时内嵌有序试题与选项
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exam {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub course_id: Option<i64>,
    pub created_by: i64,
    pub duration_minutes: i32,
    pub total_marks: i32,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course_title: Option<String>,
    pub questions: Vec<Question>,
}

/// 试题
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,
    pub exam_id: i64,
    pub text: String,
    pub marks: i32,
    pub question_type: String,
    pub choices: Vec<Choice>,
}

/// 试题选项
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Choice {
    pub id: i64,
    pub question_id: i64,
    pub text: String,
    pub is_correct: bool,
}

/// 考试提交记录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamSubmission {
    pub id: i64,
    pub exam_id: i64,
    pub student_id: i64,
    pub score: i32,
    pub submitted_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exam_title: Option<String>,
}
