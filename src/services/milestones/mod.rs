use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::middlewares::require_jwt::RequireJWT;
use crate::models::projects::requests::{
    CreateMilestoneRequest, MilestoneListParams, UpdateMilestoneRequest,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub struct MilestoneService {
    storage: Option<Arc<dyn Storage>>,
}

impl MilestoneService {
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

    // 列出里程碑（可按项目过滤）
    pub async fn list_milestones(
        &self,
        query: MilestoneListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);

        match storage.list_milestones_with_pagination(query).await {
            Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                response,
                "Milestone list retrieved successfully",
            ))),
            Err(e) => Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get milestone list: {e}"),
                )),
            ),
        }
    }

    // 创建里程碑（项目必须对操作者可见）
    pub async fn create_milestone(
        &self,
        milestone_data: CreateMilestoneRequest,
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

        match storage
            .get_project_by_id(actor, milestone_data.project_id)
            .await
        {
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
                        format!("Milestone creation failed: {e}"),
                    )),
                );
            }
        }

        match storage.create_milestone(milestone_data).await {
            Ok(milestone) => {
                Ok(HttpResponse::Created().json(ApiResponse::success(milestone, "里程碑创建成功")))
            }
            Err(e) => Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Milestone creation failed: {e}"),
                )),
            ),
        }
    }

    // 根据ID获取里程碑
    pub async fn get_milestone(
        &self,
        milestone_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);

        match storage.get_milestone_by_id(milestone_id).await {
            Ok(Some(milestone)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                milestone,
                "Milestone retrieved successfully",
            ))),
            Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::MilestoneNotFound,
                "Milestone not found",
            ))),
            Err(e) => Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get milestone: {e}"),
                )),
            ),
        }
    }

    // 更新里程碑
    pub async fn update_milestone(
        &self,
        milestone_id: i64,
        update_data: UpdateMilestoneRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);

        match storage.update_milestone(milestone_id, update_data).await {
            Ok(Some(milestone)) => {
                Ok(HttpResponse::Ok().json(ApiResponse::success(milestone, "里程碑更新成功")))
            }
            Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::MilestoneNotFound,
                "Milestone not found",
            ))),
            Err(e) => Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Milestone update failed: {e}"),
                )),
            ),
        }
    }

    // 删除里程碑
    pub async fn delete_milestone(
        &self,
        milestone_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);

        match storage.delete_milestone(milestone_id).await {
            Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("里程碑删除成功"))),
            Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::MilestoneNotFound,
                "Milestone not found",
            ))),
            Err(e) => Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Milestone deletion failed: {e}"),
                )),
            ),
        }
    }
}
