use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::assignments::requests::{
    CreateSubmissionRequest, SubmissionListParams, UpdateSubmissionRequest,
};
use crate::services::SubmissionService;
use crate::utils::SafeIDI64;

// 懒加载的全局 SubmissionService 实例
static SUBMISSION_SERVICE: Lazy<SubmissionService> = Lazy::new(SubmissionService::new_lazy);

pub async fn list_submissions(
    req: HttpRequest,
    query: web::Query<SubmissionListParams>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .list_submissions(query.into_inner(), &req)
        .await
}

pub async fn create_submission(
    req: HttpRequest,
    submission_data: web::Json<CreateSubmissionRequest>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .create_submission(submission_data.into_inner(), &req)
        .await
}

pub async fn get_submission(
    req: HttpRequest,
    submission_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .get_submission(submission_id.0, &req)
        .await
}

pub async fn update_submission(
    req: HttpRequest,
    submission_id: SafeIDI64,
    update_data: web::Json<UpdateSubmissionRequest>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .update_submission(submission_id.0, update_data.into_inner(), &req)
        .await
}

pub async fn delete_submission(
    req: HttpRequest,
    submission_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .delete_submission(submission_id.0, &req)
        .await
}

// 配置路由,学生只能操作自己的提交,越权由可见范围拦截
pub fn configure_submission_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/submissions")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_submissions))
                    .route(web::post().to(create_submission)),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_submission))
                    .route(web::put().to(update_submission))
                    .route(web::delete().to(delete_submission)),
            ),
    );
}
