use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::projects::requests::{
    CreateProjectRequest, ProjectListParams, UpdateProjectRequest,
};
use crate::services::ProjectService;
use crate::utils::SafeIDI64;

// 懒加载的全局 ProjectService 实例
static PROJECT_SERVICE: Lazy<ProjectService> = Lazy::new(ProjectService::new_lazy);

pub async fn list_projects(
    req: HttpRequest,
    query: web::Query<ProjectListParams>,
) -> ActixResult<HttpResponse> {
    PROJECT_SERVICE.list_projects(query.into_inner(), &req).await
}

pub async fn create_project(
    req: HttpRequest,
    project_data: web::Json<CreateProjectRequest>,
) -> ActixResult<HttpResponse> {
    PROJECT_SERVICE
        .create_project(project_data.into_inner(), &req)
        .await
}

pub async fn get_project(req: HttpRequest, project_id: SafeIDI64) -> ActixResult<HttpResponse> {
    PROJECT_SERVICE.get_project(project_id.0, &req).await
}

pub async fn update_project(
    req: HttpRequest,
    project_id: SafeIDI64,
    update_data: web::Json<UpdateProjectRequest>,
) -> ActixResult<HttpResponse> {
    PROJECT_SERVICE
        .update_project(project_id.0, update_data.into_inner(), &req)
        .await
}

pub async fn delete_project(req: HttpRequest, project_id: SafeIDI64) -> ActixResult<HttpResponse> {
    PROJECT_SERVICE.delete_project(project_id.0, &req).await
}

// 配置路由,学生可管理自己的项目,越权由可见范围拦截
pub fn configure_project_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/projects")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_projects))
                    .route(web::post().to(create_project)),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_project))
                    .route(web::put().to(update_project))
                    .route(web::delete().to(delete_project)),
            ),
    );
}
