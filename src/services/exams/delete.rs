use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ExamService;
use crate::middlewares::require_jwt::RequireJWT;
use crate::models::{ApiResponse, ErrorCode};

pub async fn delete_exam(
    service: &ExamService,
    exam_id: i64,
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

    // 只能删除自己可见范围内的考试
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
                    format!("Exam deletion failed: {e}"),
                )),
            );
        }
    }

    match storage.delete_exam(exam_id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("考试删除成功"))),
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ExamNotFound,
            "Exam not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Exam deletion failed: {e}"),
            )),
        ),
    }
}
