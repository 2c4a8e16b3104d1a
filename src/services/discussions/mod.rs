use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::middlewares::require_jwt::RequireJWT;
use crate::models::messages::requests::{CreateDiscussionRequest, DiscussionListParams};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub struct DiscussionService {
    storage: Option<Arc<dyn Storage>>,
}

impl DiscussionService {
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

    // 列出课程讨论（时间升序）
    pub async fn list_discussions(
        &self,
        query: DiscussionListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);

        match storage.list_discussion_messages_with_pagination(query).await {
            Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                response,
                "Discussion list retrieved successfully",
            ))),
            Err(e) => Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get discussion list: {e}"),
                )),
            ),
        }
    }

    // 发布课程讨论（user 取自令牌）
    pub async fn create_discussion(
        &self,
        discussion_data: CreateDiscussionRequest,
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

        match storage.get_course_by_id(discussion_data.course_id).await {
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
                        format!("Discussion creation failed: {e}"),
                    )),
                );
            }
        }

        match storage.create_discussion_message(actor, discussion_data).await {
            Ok(discussion) => {
                Ok(HttpResponse::Created().json(ApiResponse::success(discussion, "讨论发布成功")))
            }
            Err(e) => Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Discussion creation failed: {e}"),
                )),
            ),
        }
    }

    // 根据ID获取课程讨论
    pub async fn get_discussion(
        &self,
        discussion_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);

        match storage.get_discussion_message_by_id(discussion_id).await {
            Ok(Some(discussion)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                discussion,
                "Discussion retrieved successfully",
            ))),
            Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::DiscussionNotFound,
                "Discussion not found",
            ))),
            Err(e) => Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get discussion: {e}"),
                )),
            ),
        }
    }

    // 删除课程讨论
    pub async fn delete_discussion(
        &self,
        discussion_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);

        match storage.delete_discussion_message(discussion_id).await {
            Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("讨论删除成功"))),
            Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::DiscussionNotFound,
                "Discussion not found",
            ))),
            Err(e) => Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Discussion deletion failed: {e}"),
                )),
            ),
        }
    }
}
