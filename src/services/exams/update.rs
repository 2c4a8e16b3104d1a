use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ExamService;
use crate::middlewares::require_jwt::RequireJWT;
use crate::models::{ApiResponse, ErrorCode, exams::requests::UpdateExamRequest};

pub async fn update_exam(
    service: &ExamService,
    exam_id: i64,
    update_data: UpdateExamRequest,
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

    // 只能操作自己可见范围内的考试
    match storage.get_exam_by_id(actor, exam_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ExamNotFound,
                "Exam not found",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Exam update failed: {e}"),
                )),
            );
        }
    }

    // 换绑课程必须存在
    if let Some(course_id) = update_data.course_id {
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
                        ErrorCode::InternalServerError,
                        format!("Exam update failed: {e}"),
                    )),
                );
            }
        }
    }

    match storage.update_exam(exam_id, update_data).await {
        Ok(Some(exam)) => Ok(HttpResponse::Ok().json(ApiResponse::success(exam, "考试更新成功"))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ExamNotFound,
            "Exam not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Exam update failed: {e}"),
            )),
        ),
    }
}
