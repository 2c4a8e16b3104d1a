use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::courses::requests::{
    CourseScopedListParams, CreateUnitRequest, UpdateUnitRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::UnitService;
use crate::utils::SafeIDI64;

// 懒加载的全局 UnitService 实例
static UNIT_SERVICE: Lazy<UnitService> = Lazy::new(UnitService::new_lazy);

pub async fn list_units(
    req: HttpRequest,
    query: web::Query<CourseScopedListParams>,
) -> ActixResult<HttpResponse> {
    UNIT_SERVICE.list_units(query.into_inner(), &req).await
}

pub async fn create_unit(
    req: HttpRequest,
    unit_data: web::Json<CreateUnitRequest>,
) -> ActixResult<HttpResponse> {
    UNIT_SERVICE.create_unit(unit_data.into_inner(), &req).await
}

pub async fn get_unit(req: HttpRequest, unit_id: SafeIDI64) -> ActixResult<HttpResponse> {
    UNIT_SERVICE.get_unit(unit_id.0, &req).await
}

pub async fn update_unit(
    req: HttpRequest,
    unit_id: SafeIDI64,
    update_data: web::Json<UpdateUnitRequest>,
) -> ActixResult<HttpResponse> {
    UNIT_SERVICE
        .update_unit(unit_id.0, update_data.into_inner(), &req)
        .await
}

pub async fn delete_unit(req: HttpRequest, unit_id: SafeIDI64) -> ActixResult<HttpResponse> {
    UNIT_SERVICE.delete_unit(unit_id.0, &req).await
}

// 配置路由
pub fn configure_unit_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/units")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_units))
                    .route(
                        web::post()
                            .to(create_unit)
                            .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles())),
                    ),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_unit))
                    .route(
                        web::put()
                            .to(update_unit)
                            .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles())),
                    )
                    .route(
                        web::delete()
                            .to(delete_unit)
                            .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles())),
                    ),
            ),
    );
}
