pub mod assign_courses;
pub mod bulk_users;
pub mod stats;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::admin::requests::{AssignCourseRequest, BulkUserActionRequest};
use crate::storage::Storage;

pub struct AdminService {
    storage: Option<Arc<dyn Storage>>,
}

impl AdminService {
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

    // 仪表盘统计
    pub async fn get_stats(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        stats::get_stats(self, request).await
    }

    // 批量用户操作：activate / deactivate / delete
    pub async fn bulk_user_action(
        &self,
        action_data: BulkUserActionRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        bulk_users::bulk_user_action(self, action_data, request).await
    }

    // 课程指派：学生选课/退课，教师设为课程唯一授课人
    pub async fn assign_courses(
        &self,
        assign_data: AssignCourseRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        assign_courses::assign_courses(self, assign_data, request).await
    }
}
