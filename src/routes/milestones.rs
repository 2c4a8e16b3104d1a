use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::projects::requests::{
    CreateMilestoneRequest, MilestoneListParams, UpdateMilestoneRequest,
};
use crate::services::MilestoneService;
use crate::utils::SafeIDI64;

// 懒加载的全局 MilestoneService 实例
static MILESTONE_SERVICE: Lazy<MilestoneService> = Lazy::new(MilestoneService::new_lazy);

pub async fn list_milestones(
    req: HttpRequest,
    query: web::Query<MilestoneListParams>,
) -> ActixResult<HttpResponse> {
    MILESTONE_SERVICE
        .list_milestones(query.into_inner(), &req)
        .await
}

pub async fn create_milestone(
    req: HttpRequest,
    milestone_data: web::Json<CreateMilestoneRequest>,
) -> ActixResult<HttpResponse> {
    MILESTONE_SERVICE
        .create_milestone(milestone_data.into_inner(), &req)
        .await
}

pub async fn get_milestone(req: HttpRequest, milestone_id: SafeIDI64) -> ActixResult<HttpResponse> {
    MILESTONE_SERVICE.get_milestone(milestone_id.0, &req).await
}

pub async fn update_milestone(
    req: HttpRequest,
    milestone_id: SafeIDI64,
    update_data: web::Json<UpdateMilestoneRequest>,
) -> ActixResult<HttpResponse> {
    MILESTONE_SERVICE
        .update_milestone(milestone_id.0, update_data.into_inner(), &req)
        .await
}

pub async fn delete_milestone(
    req: HttpRequest,
    milestone_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    MILESTONE_SERVICE
        .delete_milestone(milestone_id.0, &req)
        .await
}

// 配置路由,创建权限由项目可见性决定
pub fn configure_milestone_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/project-milestones")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_milestones))
                    .route(web::post().to(create_milestone)),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_milestone))
                    .route(web::put().to(update_milestone))
                    .route(web::delete().to(delete_milestone)),
            ),
    );
}
