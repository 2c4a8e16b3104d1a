use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::middlewares::require_jwt::RequireJWT;
use crate::models::projects::requests::{
    CreateProjectFileRequest, ProjectFileListParams, UpdateProjectFileRequest,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub struct ProjectFileService {
    storage: Option<Arc<dyn Storage>>,
}

impl ProjectFileService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 列出项目文件（可按项目过滤）
    pub async fn list_project_files(
        &self,
        query: ProjectFileListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);

        match storage.list_project_files_with_pagination(query).await {
            Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                response,
                "Project file list retrieved successfully",
            ))),
            Err(e) => Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get project file list: {e}"),
                )),
            ),
        }
    }

    // 登记项目文件（uploader 取自令牌）
    pub async fn create_project_file(
        &self,
        file_data: CreateProjectFileRequest,
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
        let storage = self.get_storage(request);

        match storage.get_project_by_id(actor, file_data.project_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::ProjectNotFound,
                    "Project not found",
                )));
            }
            Err(e) => {
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("Project file creation failed: {e}"),
                    )),
                );
            }
        }

        match storage.create_project_file(actor, file_data).await {
            Ok(file) => {
                Ok(HttpResponse::Created().json(ApiResponse::success(file, "项目文件登记成功")))
            }
            Err(e) => Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Project file creation failed: {e}"),
                )),
            ),
        }
    }

    // 根据ID获取项目文件
    pub async fn get_project_file(
        &self,
        file_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);

        match storage.get_project_file_by_id(file_id).await {
            Ok(Some(file)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                file,
                "Project file retrieved successfully",
            ))),
            Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ProjectFileNotFound,
                "Project file not found",
            ))),
            Err(e) => Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get project file: {e}"),
                )),
            ),
        }
    }

    // 更新项目文件（所属项目必须对操作者可见）
    pub async fn update_project_file(
        &self,
        file_id: i64,
        update_data: UpdateProjectFileRequest,
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
        let storage = self.get_storage(request);

        let file = match storage.get_project_file_by_id(file_id).await {
            Ok(Some(file)) => file,
            Ok(None) => {
                return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                    ErrorCode::ProjectFileNotFound,
                    "Project file not found",
                )));
            }
            Err(e) => {
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("Project file update failed: {e}"),
                    )),
                );
            }
        };

        match storage.get_project_by_id(actor, file.project_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                    ErrorCode::ProjectNotFound,
                    "Project not found",
                )));
            }
            Err(e) => {
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("Project file update failed: {e}"),
                    )),
                );
            }
        }

        match storage.update_project_file(file_id, update_data).await {
            Ok(Some(file)) => {
                Ok(HttpResponse::Ok().json(ApiResponse::success(file, "项目文件更新成功")))
            }
            Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ProjectFileNotFound,
                "Project file not found",
            ))),
            Err(e) => Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Project file update failed: {e}"),
                )),
            ),
        }
    }

    // 删除项目文件
    pub async fn delete_project_file(
        &self,
        file_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);

        match storage.delete_project_file(file_id).await {
            Ok(true) => {
                Ok(HttpResponse::Ok().json(ApiResponse::success_empty("项目文件删除成功")))
            }
            Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ProjectFileNotFound,
                "Project file not found",
            ))),
            Err(e) => Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Project file deletion failed: {e}"),
                )),
            ),
        }
    }
}
