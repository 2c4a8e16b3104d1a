use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ExamService;
use crate::middlewares::require_jwt::RequireJWT;
use crate::models::{ApiResponse, ErrorCode, exams::requests::ExamListParams};

pub async fn list_exams(
    service: &ExamService,
    query: ExamListParams,
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

    match storage.list_exams_with_pagination(actor, query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Exam list retrieved successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to get exam list: {e}"),
            )),
        ),
    }
}
