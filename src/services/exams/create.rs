use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ExamService;
use crate::middlewares::require_jwt::RequireJWT;
use crate::models::{ApiResponse, ErrorCode, exams::requests::CreateExamRequest};

pub async fn create_exam(
    service: &ExamService,
    exam_data: CreateExamRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let actor = match RequireJWT::extract_actor(request) {
        Some(actor) => actor,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "Unauthorized access, please login",
            )));
        }
    };

    let storage = service.get_storage(request);

    // 关联课程必须存在
    if let Some(course_id) = exam_data.course_id {
        match storage.get_course_by_id(course_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::CourseNotFound,
                    "Course not found",
                )));
            }
            Err(e) => {
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::ExamCreationFailed,
                        format!("Exam creation failed: {e}"),
                    )),
                );
            }
        }
    }

    // 考试与全部试题、选项在单个事务内创建，任一失败整体回滚
    match storage.create_exam_with_questions(actor, exam_data).await {
        Ok(exam) => {
            tracing::info!("Exam {} created by user {}", exam.id, actor.id);
            Ok(HttpResponse::Created().json(ApiResponse::success(exam, "考试创建成功")))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::ExamCreationFailed,
                format!("Exam creation failed: {e}"),
            )),
        ),
    }
}
