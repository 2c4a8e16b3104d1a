use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::messages::requests::{
    CreateMessageRequest, MessageListParams, UpdateMessageRequest,
};
use crate::services::MessageService;
use crate::utils::SafeIDI64;

// 懒加载的全局 MessageService 实例
static MESSAGE_SERVICE: Lazy<MessageService> = Lazy::new(MessageService::new_lazy);

pub async fn list_messages(
    req: HttpRequest,
    query: web::Query<MessageListParams>,
) -> ActixResult<HttpResponse> {
    MESSAGE_SERVICE.list_messages(query.into_inner(), &req).await
}

pub async fn create_message(
    req: HttpRequest,
    message_data: web::Json<CreateMessageRequest>,
) -> ActixResult<HttpResponse> {
    MESSAGE_SERVICE
        .create_message(message_data.into_inner(), &req)
        .await
}

pub async fn get_message(req: HttpRequest, message_id: SafeIDI64) -> ActixResult<HttpResponse> {
    MESSAGE_SERVICE.get_message(message_id.0, &req).await
}

pub async fn update_message(
    req: HttpRequest,
    message_id: SafeIDI64,
    update_data: web::Json<UpdateMessageRequest>,
) -> ActixResult<HttpResponse> {
    MESSAGE_SERVICE
        .update_message(message_id.0, update_data.into_inner(), &req)
        .await
}

pub async fn delete_message(req: HttpRequest, message_id: SafeIDI64) -> ActixResult<HttpResponse> {
    MESSAGE_SERVICE.delete_message(message_id.0, &req).await
}

// 配置路由,可见性由访问策略层控制
pub fn configure_message_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/messages")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_messages))
                    .route(web::post().to(create_message)),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_message))
                    .route(web::put().to(update_message))
                    .route(web::delete().to(delete_message)),
            ),
    );
}
