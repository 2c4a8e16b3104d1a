use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::courses::requests::{
    CourseScopedListParams, CreateResourceRequest, UpdateResourceRequest,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub struct ResourceService {
    storage: Option<Arc<dyn Storage>>,
}

impl ResourceService {
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

    // 列出学习资料（可按课程/单元过滤）
    pub async fn list_resources(
        &self,
        query: CourseScopedListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);

        match storage.list_resources_with_pagination(query).await {
            Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                response,
                "Resource list retrieved successfully",
            ))),
            Err(e) => Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get resource list: {e}"),
                )),
            ),
        }
    }

    // 创建学习资料
    pub async fn create_resource(
        &self,
        resource_data: CreateResourceRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);

        match storage.get_course_by_id(resource_data.course_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::CourseNotFound,
                    "Course not found",
                )));
            }
            Err(e) => {
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("Resource creation failed: {e}"),
                    )),
                );
            }
        }

        match storage.create_resource(resource_data).await {
            Ok(resource) => {
                Ok(HttpResponse::Created().json(ApiResponse::success(resource, "资料创建成功")))
            }
            Err(e) => Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Resource creation failed: {e}"),
                )),
            ),
        }
    }

    // 根据ID获取学习资料
    pub async fn get_resource(
        &self,
        resource_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);

        match storage.get_resource_by_id(resource_id).await {
            Ok(Some(resource)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                resource,
                "Resource retrieved successfully",
            ))),
            Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ResourceNotFound,
                "Resource not found",
            ))),
            Err(e) => Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get resource: {e}"),
                )),
            ),
        }
    }

    // 更新学习资料
    pub async fn update_resource(
        &self,
        resource_id: i64,
        update_data: UpdateResourceRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);

        match storage.update_resource(resource_id, update_data).await {
            Ok(Some(resource)) => {
                Ok(HttpResponse::Ok().json(ApiResponse::success(resource, "资料更新成功")))
            }
            Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ResourceNotFound,
                "Resource not found",
            ))),
            Err(e) => Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Resource update failed: {e}"),
                )),
            ),
        }
    }

    // 删除学习资料
    pub async fn delete_resource(
        &self,
        resource_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);

        match storage.delete_resource(resource_id).await {
            Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("资料删除成功"))),
            Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ResourceNotFound,
                "Resource not found",
            ))),
            Err(e) => Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Resource deletion failed: {e}"),
                )),
            ),
        }
    }
}
