use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::admin::requests::{AssignCourseRequest, BulkUserActionRequest};
use crate::models::users::entities::UserRole;
use crate::services::AdminService;

// 懒加载的全局 AdminService 实例
static ADMIN_SERVICE: Lazy<AdminService> = Lazy::new(AdminService::new_lazy);

pub async fn get_stats(req: HttpRequest) -> ActixResult<HttpResponse> {
    ADMIN_SERVICE.get_stats(&req).await
}

pub async fn bulk_user_action(
    req: HttpRequest,
    action_data: web::Json<BulkUserActionRequest>,
) -> ActixResult<HttpResponse> {
    ADMIN_SERVICE
        .bulk_user_action(action_data.into_inner(), &req)
        .await
}

pub async fn assign_courses(
    req: HttpRequest,
    assign_data: web::Json<AssignCourseRequest>,
) -> ActixResult<HttpResponse> {
    ADMIN_SERVICE
        .assign_courses(assign_data.into_inner(), &req)
        .await
}

// 配置路由,整个作用域仅限管理员
pub fn configure_admin_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/admin")
            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
            .wrap(middlewares::RequireJWT)
            .route("/stats", web::get().to(get_stats))
            .route("/users/bulk", web::post().to(bulk_user_action))
            .route("/courses/assign", web::post().to(assign_courses)),
    );
}
