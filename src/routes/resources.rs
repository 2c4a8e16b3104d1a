use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::courses::requests::{
    CourseScopedListParams, CreateResourceRequest, UpdateResourceRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::ResourceService;
use crate::utils::SafeIDI64;

// 懒加载的全局 ResourceService 实例
static RESOURCE_SERVICE: Lazy<ResourceService> = Lazy::new(ResourceService::new_lazy);

pub async fn list_resources(
    req: HttpRequest,
    query: web::Query<CourseScopedListParams>,
) -> ActixResult<HttpResponse> {
    RESOURCE_SERVICE
        .list_resources(query.into_inner(), &req)
        .await
}

pub async fn create_resource(
    req: HttpRequest,
    resource_data: web::Json<CreateResourceRequest>,
) -> ActixResult<HttpResponse> {
    RESOURCE_SERVICE
        .create_resource(resource_data.into_inner(), &req)
        .await
}

pub async fn get_resource(req: HttpRequest, resource_id: SafeIDI64) -> ActixResult<HttpResponse> {
    RESOURCE_SERVICE.get_resource(resource_id.0, &req).await
}

pub async fn update_resource(
    req: HttpRequest,
    resource_id: SafeIDI64,
    update_data: web::Json<UpdateResourceRequest>,
) -> ActixResult<HttpResponse> {
    RESOURCE_SERVICE
        .update_resource(resource_id.0, update_data.into_inner(), &req)
        .await
}

pub async fn delete_resource(
    req: HttpRequest,
    resource_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    RESOURCE_SERVICE.delete_resource(resource_id.0, &req).await
}

// 配置路由
pub fn configure_resource_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/resources")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_resources))
                    .route(
                        web::post()
                            .to(create_resource)
                            .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles())),
                    ),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_resource))
                    .route(
                        web::put()
                            .to(update_resource)
                            .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles())),
                    )
                    .route(
                        web::delete()
                            .to(delete_resource)
                            .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles())),
                    ),
            ),
    );
}
