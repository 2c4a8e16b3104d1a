use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::middlewares::require_jwt::RequireJWT;
use crate::models::announcements::requests::{
    AnnouncementListParams, CreateAnnouncementRequest, UpdateAnnouncementRequest,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub struct AnnouncementService {
    storage: Option<Arc<dyn Storage>>,
}

impl AnnouncementService {
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

    // 列出公告（优先级降序、时间降序，按角色可见范围过滤）
    pub async fn list_announcements(
        &self,
        query: AnnouncementListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let actor = match RequireJWT::extract_actor(request) {
            Some(actor) => actor,
            None => return Ok(Self::unauthorized()),
        };
        let storage = self.get_storage(request);

        match storage
            .list_announcements_with_pagination(actor, query)
            .await
        {
            Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                response,
                "Announcement list retrieved successfully",
            ))),
            Err(e) => Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get announcement list: {e}"),
                )),
            ),
        }
    }

    // 发布公告（author 取自令牌）
    pub async fn create_announcement(
        &self,
        announcement_data: CreateAnnouncementRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let actor = match RequireJWT::extract_actor(request) {
            Some(actor) => actor,
            None => return Ok(Self::unauthorized()),
        };
        let storage = self.get_storage(request);

        // 课程公告必须指向存在的课程
        if let Some(course_id) = announcement_data.course_id {
            match storage.get_course_by_id(course_id).await {
                Ok(Some(_)) => {}
                Ok(None) => {
                    return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                        ErrorCode::CourseNotFound,
                        "Course not found",
                    )));
                }
                Err(e) => {
                    return Ok(HttpResponse::InternalServerError().json(
                        ApiResponse::error_empty(
                            ErrorCode::InternalServerError,
                            format!("Announcement creation failed: {e}"),
                        ),
                    ));
                }
            }
        }

        match storage.create_announcement(actor, announcement_data).await {
            Ok(announcement) => Ok(
                HttpResponse::Created().json(ApiResponse::success(announcement, "公告发布成功"))
            ),
            Err(e) => Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Announcement creation failed: {e}"),
                )),
            ),
        }
    }

    // 根据ID获取公告
    pub async fn get_announcement(
        &self,
        announcement_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let actor = match RequireJWT::extract_actor(request) {
            Some(actor) => actor,
            None => return Ok(Self::unauthorized()),
        };
        let storage = self.get_storage(request);

        match storage.get_announcement_by_id(actor, announcement_id).await {
            Ok(Some(announcement)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                announcement,
                "Announcement retrieved successfully",
            ))),
            Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::AnnouncementNotFound,
                "Announcement not found",
            ))),
            Err(e) => Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get announcement: {e}"),
                )),
            ),
        }
    }

    // 更新公告
    pub async fn update_announcement(
        &self,
        announcement_id: i64,
        update_data: UpdateAnnouncementRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let actor = match RequireJWT::extract_actor(request) {
            Some(actor) => actor,
            None => return Ok(Self::unauthorized()),
        };
        let storage = self.get_storage(request);

        // 只能操作自己可见范围内的公告
        match storage.get_announcement_by_id(actor, announcement_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                    ErrorCode::AnnouncementNotFound,
                    "Announcement not found",
                )));
            }
            Err(e) => {
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("Announcement update failed: {e}"),
                    )),
                );
            }
        }

        match storage
            .update_announcement(announcement_id, update_data)
            .await
        {
            Ok(Some(announcement)) => {
                Ok(HttpResponse::Ok().json(ApiResponse::success(announcement, "公告更新成功")))
            }
            Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::AnnouncementNotFound,
                "Announcement not found",
            ))),
            Err(e) => Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Announcement update failed: {e}"),
                )),
            ),
        }
    }

    // 删除公告
    pub async fn delete_announcement(
        &self,
        announcement_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let actor = match RequireJWT::extract_actor(request) {
            Some(actor) => actor,
            None => return Ok(Self::unauthorized()),
        };
        let storage = self.get_storage(request);

        match storage.get_announcement_by_id(actor, announcement_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                    ErrorCode::AnnouncementNotFound,
                    "Announcement not found",
                )));
            }
            Err(e) => {
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("Announcement deletion failed: {e}"),
                    )),
                );
            }
        }

        match storage.delete_announcement(announcement_id).await {
            Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("公告删除成功"))),
            Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::AnnouncementNotFound,
                "Announcement not found",
            ))),
            Err(e) => Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Announcement deletion failed: {e}"),
                )),
            ),
        }
    }
}
