use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::middlewares::require_jwt::RequireJWT;
use crate::models::messages::requests::{
    CreateMessageRequest, MessageListParams, UpdateMessageRequest,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub struct MessageService {
    storage: Option<Arc<dyn Storage>>,
}

impl MessageService {
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

    fn unauthorized() -> HttpResponse {
        HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized access, please login",
        ))
    }

    // 列出私信（只含自己收发的，时间升序）
    pub async fn list_messages(
        &self,
        query: MessageListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let actor = match RequireJWT::extract_actor(request) {
            Some(actor) => actor,
            None => return Ok(Self::unauthorized()),
        };
        let storage = self.get_storage(request);

        match storage.list_messages_with_pagination(actor, query).await {
            Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                response,
                "Message list retrieved successfully",
            ))),
            Err(e) => Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get message list: {e}"),
                )),
            ),
        }
    }

    // 发送私信（sender 取自令牌，不信任载荷）
    pub async fn create_message(
        &self,
        message_data: CreateMessageRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let actor = match RequireJWT::extract_actor(request) {
            Some(actor) => actor,
            None => return Ok(Self::unauthorized()),
        };
        let storage = self.get_storage(request);

        // 收件人必须存在
        match storage.get_user_by_id(message_data.receiver_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::UserNotFound,
                    "Receiver not found",
                )));
            }
            Err(e) => {
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("Message creation failed: {e}"),
                    )),
                );
            }
        }

        match storage.create_message(actor, message_data).await {
            Ok(message) => {
                Ok(HttpResponse::Created().json(ApiResponse::success(message, "私信发送成功")))
            }
            Err(e) => Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Message creation failed: {e}"),
                )),
            ),
        }
    }

    // 根据ID获取私信
    pub async fn get_message(
        &self,
        message_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let actor = match RequireJWT::extract_actor(request) {
            Some(actor) => actor,
            None => return Ok(Self::unauthorized()),
        };
        let storage = self.get_storage(request);

        match storage.get_message_by_id(actor, message_id).await {
            Ok(Some(message)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                message,
                "Message retrieved successfully",
            ))),
            Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::MessageNotFound,
                "Message not found",
            ))),
            Err(e) => Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get message: {e}"),
                )),
            ),
        }
    }

    // 标记已读
    pub async fn update_message(
        &self,
        message_id: i64,
        update_data: UpdateMessageRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let actor = match RequireJWT::extract_actor(request) {
            Some(actor) => actor,
            None => return Ok(Self::unauthorized()),
        };
        let storage = self.get_storage(request);

        // 只能操作自己可见的私信
        match storage.get_message_by_id(actor, message_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                    ErrorCode::MessageNotFound,
                    "Message not found",
                )));
            }
            Err(e) => {
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("Message update failed: {e}"),
                    )),
                );
            }
        }

        match storage.update_message(message_id, update_data).await {
            Ok(Some(message)) => {
                Ok(HttpResponse::Ok().json(ApiResponse::success(message, "私信更新成功")))
            }
            Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::MessageNotFound,
                "Message not found",
            ))),
            Err(e) => Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Message update failed: {e}"),
                )),
            ),
        }
    }

    // 删除私信
    pub async fn delete_message(
        &self,
        message_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let actor = match RequireJWT::extract_actor(request) {
            Some(actor) => actor,
            None => return Ok(Self::unauthorized()),
        };
        let storage = self.get_storage(request);

        match storage.get_message_by_id(actor, message_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                    ErrorCode::MessageNotFound,
                    "Message not found",
                )));
            }
            Err(e) => {
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("Message deletion failed: {e}"),
                    )),
                );
            }
        }

        match storage.delete_message(message_id).await {
            Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("私信删除成功"))),
            Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::MessageNotFound,
                "Message not found",
            ))),
            Err(e) => Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Message deletion failed: {e}"),
                )),
            ),
        }
    }
}
