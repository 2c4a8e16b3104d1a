use crate::models::common::PaginationQuery;
use serde::Deserialize;

// 考试查询参数
#[derive(Debug, Deserialize)]
pub struct ExamListParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub course_id: Option<i64>,
}

// 考试创建请求，试题与选项一次性嵌套提交
// 整个创建过程在单个事务内执行，任一子项失败则整体回滚
#[derive(Debug, Deserialize)]
pub struct CreateExamRequest {
    pub title: String,
    pub description: String,
    pub course_id: Option<i64>,
    #[serde(default = "default_duration_minutes")]
    pub duration_minutes: i32,
    #[serde(default = "default_total_marks")]
    pub total_marks: i32,
    #[serde(default)]
    pub questions: Vec<CreateQuestionRequest>,
}

fn default_duration_minutes() -> i32 {
    60
}

fn default_total_marks() -> i32 {
    100
}

// 嵌套试题
#[derive(Debug, Deserialize)]
pub struct CreateQuestionRequest {
    pub text: String,
    #[serde(default = "default_marks")]
    pub marks: i32,
    #[serde(default = "default_question_type")]
    pub question_type: String,
    #[serde(default)]
    pub choices: Vec<CreateChoiceRequest>,
}

fn default_marks() -> i32 {
    1
}

fn default_question_type() -> String {
    "MCQ".to_string()
}

// 嵌套选项
#[derive(Debug, Deserialize)]
pub struct CreateChoiceRequest {
    pub text: String,
    #[serde(default)]
    pub is_correct: bool,
}

// 考试更新请求（仅基本字段，试题不支持整体替换）
#[derive(Debug, Deserialize)]
pub struct UpdateExamRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub course_id: Option<i64>,
    pub duration_minutes: Option<i32>,
    pub total_marks: Option<i32>,
}

// 考试提交查询参数
#[derive(Debug, Deserialize)]
pub struct ExamSubmissionListParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub exam_id: Option<i64>,
}

// 考试提交创建请求（student 由服务端填充）
#[derive(Debug, Deserialize)]
pub struct CreateExamSubmissionRequest {
    pub exam_id: i64,
    pub score: i32,
}

// 考试提交更新请求（重新评分）
#[derive(Debug, Deserialize)]
pub struct UpdateExamSubmissionRequest {
    pub score: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_exam_request_deserialization() {
        let json = r#"{
            "title": "Midterm",
            "description": "Chapters 1-4",
            "course_id": 3,
            "questions": [
                {
                    "text": "2 + 2 = ?",
                    "choices": [
                        {"text": "3"},
                        {"text": "4", "is_correct": true}
                    ]
                }
            ]
        }"#;
        let req: CreateExamRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.duration_minutes, 60);
        assert_eq!(req.total_marks, 100);
        assert_eq!(req.questions.len(), 1);
        let q = &req.questions[0];
        assert_eq!(q.marks, 1);
        assert_eq!(q.question_type, "MCQ");
        assert_eq!(q.choices.len(), 2);
        assert!(!q.choices[0].is_correct);
        assert!(q.choices[1].is_correct);
    }
}
