use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::projects::requests::{
    CreateProjectFileRequest, ProjectFileListParams, UpdateProjectFileRequest,
};
use crate::services::ProjectFileService;
use crate::utils::SafeIDI64;

// 懒加载的全局 ProjectFileService 实例
static PROJECT_FILE_SERVICE: Lazy<ProjectFileService> = Lazy::new(ProjectFileService::new_lazy);

pub async fn list_project_files(
    req: HttpRequest,
    query: web::Query<ProjectFileListParams>,
) -> ActixResult<HttpResponse> {
    PROJECT_FILE_SERVICE
        .list_project_files(query.into_inner(), &req)
        .await
}

pub async fn create_project_file(
    req: HttpRequest,
    file_data: web::Json<CreateProjectFileRequest>,
) -> ActixResult<HttpResponse> {
    PROJECT_FILE_SERVICE
        .create_project_file(file_data.into_inner(), &req)
        .await
}

pub async fn get_project_file(req: HttpRequest, file_id: SafeIDI64) -> ActixResult<HttpResponse> {
    PROJECT_FILE_SERVICE.get_project_file(file_id.0, &req).await
}

pub async fn update_project_file(
    req: HttpRequest,
    file_id: SafeIDI64,
    update_data: web::Json<UpdateProjectFileRequest>,
) -> ActixResult<HttpResponse> {
    PROJECT_FILE_SERVICE
        .update_project_file(file_id.0, update_data.into_inner(), &req)
        .await
}

pub async fn delete_project_file(
    req: HttpRequest,
    file_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    PROJECT_FILE_SERVICE
        .delete_project_file(file_id.0, &req)
        .await
}

// 配置路由,上传权限由项目可见性决定
pub fn configure_project_file_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/project-files")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_project_files))
                    .route(web::post().to(create_project_file)),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_project_file))
                    .route(web::put().to(update_project_file))
                    .route(web::delete().to(delete_project_file)),
            ),
    );
}
