use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::messages::requests::{CreateDiscussionRequest, DiscussionListParams};
use crate::models::users::entities::UserRole;
use crate::services::DiscussionService;
use crate::utils::SafeIDI64;

// 懒加载的全局 DiscussionService 实例
static DISCUSSION_SERVICE: Lazy<DiscussionService> = Lazy::new(DiscussionService::new_lazy);

pub async fn list_discussions(
    req: HttpRequest,
    query: web::Query<DiscussionListParams>,
) -> ActixResult<HttpResponse> {
    DISCUSSION_SERVICE
        .list_discussions(query.into_inner(), &req)
        .await
}

pub async fn create_discussion(
    req: HttpRequest,
    discussion_data: web::Json<CreateDiscussionRequest>,
) -> ActixResult<HttpResponse> {
    DISCUSSION_SERVICE
        .create_discussion(discussion_data.into_inner(), &req)
        .await
}

pub async fn get_discussion(
    req: HttpRequest,
    discussion_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    DISCUSSION_SERVICE
        .get_discussion(discussion_id.0, &req)
        .await
}

pub async fn delete_discussion(
    req: HttpRequest,
    discussion_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    DISCUSSION_SERVICE
        .delete_discussion(discussion_id.0, &req)
        .await
}

// 配置路由,删除仅限教师
pub fn configure_discussion_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/discussions")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_discussions))
                    .route(web::post().to(create_discussion)),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_discussion))
                    .route(
                        web::delete()
                            .to(delete_discussion)
                            .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles())),
                    ),
            ),
    );
}
