use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::exams::requests::{
    CreateExamSubmissionRequest, ExamSubmissionListParams, UpdateExamSubmissionRequest,
};
use crate::services::ExamSubmissionService;
use crate::utils::SafeIDI64;

// 懒加载的全局 ExamSubmissionService 实例
static EXAM_SUBMISSION_SERVICE: Lazy<ExamSubmissionService> =
    Lazy::new(ExamSubmissionService::new_lazy);

pub async fn list_exam_submissions(
    req: HttpRequest,
    query: web::Query<ExamSubmissionListParams>,
) -> ActixResult<HttpResponse> {
    EXAM_SUBMISSION_SERVICE
        .list_exam_submissions(query.into_inner(), &req)
        .await
}

pub async fn create_exam_submission(
    req: HttpRequest,
    submission_data: web::Json<CreateExamSubmissionRequest>,
) -> ActixResult<HttpResponse> {
    EXAM_SUBMISSION_SERVICE
        .create_exam_submission(submission_data.into_inner(), &req)
        .await
}

pub async fn get_exam_submission(
    req: HttpRequest,
    submission_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    EXAM_SUBMISSION_SERVICE
        .get_exam_submission(submission_id.0, &req)
        .await
}

pub async fn update_exam_submission(
    req: HttpRequest,
    submission_id: SafeIDI64,
    update_data: web::Json<UpdateExamSubmissionRequest>,
) -> ActixResult<HttpResponse> {
    EXAM_SUBMISSION_SERVICE
        .update_exam_submission(submission_id.0, update_data.into_inner(), &req)
        .await
}

pub async fn delete_exam_submission(
    req: HttpRequest,
    submission_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    EXAM_SUBMISSION_SERVICE
        .delete_exam_submission(submission_id.0, &req)
        .await
}

// 配置路由,可见性由访问策略层控制
pub fn configure_exam_submission_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/exam-submissions")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_exam_submissions))
                    .route(web::post().to(create_exam_submission)),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_exam_submission))
                    .route(web::put().to(update_exam_submission))
                    .route(web::delete().to(delete_exam_submission)),
            ),
    );
}
