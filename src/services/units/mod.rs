use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::courses::requests::{
    CourseScopedListParams, CreateUnitRequest, UpdateUnitRequest,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub struct UnitService {
    storage: Option<Arc<dyn Storage>>,
}

impl UnitService {
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

    // 列出单元（按课程过滤，order 升序）
    pub async fn list_units(
        &self,
        query: CourseScopedListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);

        match storage.list_units_with_pagination(query).await {
            Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                response,
                "Unit list retrieved successfully",
            ))),
            Err(e) => Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get unit list: {e}"),
                )),
            ),
        }
    }

    // 创建单元
    pub async fn create_unit(
        &self,
        unit_data: CreateUnitRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);

        // 课程必须存在
        match storage.get_course_by_id(unit_data.course_id).await {
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
                        format!("Unit creation failed: {e}"),
                    )),
                );
            }
        }

        match storage.create_unit(unit_data).await {
            Ok(unit) => {
                Ok(HttpResponse::Created().json(ApiResponse::success(unit, "单元创建成功")))
            }
            Err(e) => Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Unit creation failed: {e}"),
                )),
            ),
        }
    }

    // 根据ID获取单元
    pub async fn get_unit(&self, unit_id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);

        match storage.get_unit_by_id(unit_id).await {
            Ok(Some(unit)) => Ok(HttpResponse::Ok()
                .json(ApiResponse::success(unit, "Unit retrieved successfully"))),
            Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::UnitNotFound,
                "Unit not found",
            ))),
            Err(e) => Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get unit: {e}"),
                )),
            ),
        }
    }

    // 更新单元
    pub async fn update_unit(
        &self,
        unit_id: i64,
        update_data: UpdateUnitRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);

        match storage.update_unit(unit_id, update_data).await {
            Ok(Some(unit)) => {
                Ok(HttpResponse::Ok().json(ApiResponse::success(unit, "单元更新成功")))
            }
            Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::UnitNotFound,
                "Unit not found",
            ))),
            Err(e) => Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Unit update failed: {e}"),
                )),
            ),
        }
    }

    // 删除单元
    pub async fn delete_unit(
        &self,
        unit_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);

        match storage.delete_unit(unit_id).await {
            Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("单元删除成功"))),
            Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::UnitNotFound,
                "Unit not found",
            ))),
            Err(e) => Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Unit deletion failed: {e}"),
                )),
            ),
        }
    }
}
