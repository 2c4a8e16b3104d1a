use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AdminService;
use crate::models::admin::requests::{BulkUserAction, BulkUserActionRequest};
use crate::models::admin::responses::BulkActionResponse;
use crate::models::users::entities::UserStatus;
use crate::models::{ApiResponse, ErrorCode};

pub async fn bulk_user_action(
    service: &AdminService,
    action_data: BulkUserActionRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    // user_ids 与 action 均为必填
    let user_ids = match action_data.user_ids {
        Some(ids) if !ids.is_empty() => ids,
        _ => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::BadRequest,
                "user_ids is required",
            )));
        }
    };

    let action = match action_data
        .action
        .as_deref()
        .and_then(|s| s.parse::<BulkUserAction>().ok())
    {
        Some(action) => action,
        None => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::BadRequest,
                "action must be one of: activate, deactivate, delete",
            )));
        }
    };

    let storage = service.get_storage(request);

    let result = match action {
        BulkUserAction::Activate => {
            storage
                .bulk_update_user_status(&user_ids, UserStatus::Active)
                .await
        }
        BulkUserAction::Deactivate => {
            storage
                .bulk_update_user_status(&user_ids, UserStatus::Inactive)
                .await
        }
        BulkUserAction::Delete => storage.bulk_delete_users(&user_ids).await,
    };

    match result {
        Ok(affected) => {
            tracing::info!("Bulk user action {:?} affected {} rows", action, affected);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                BulkActionResponse { affected },
                "Bulk action completed",
            )))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Bulk action failed: {e}"),
            )),
        ),
    }
}
