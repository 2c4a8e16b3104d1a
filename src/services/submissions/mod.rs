use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::middlewares::require_jwt::RequireJWT;
use crate::models::assignments::requests::{
    CreateSubmissionRequest, SubmissionListParams, UpdateSubmissionRequest,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub struct SubmissionService {
    storage: Option<Arc<dyn Storage>>,
}

impl SubmissionService {
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

    // 列出作业提交（学生只能看到自己的）
    pub async fn list_submissions(
        &self,
        query: SubmissionListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let actor = match RequireJWT::extract_actor(request) {
            Some(actor) => actor,
            None => return Ok(Self::unauthorized()),
        };
        let storage = self.get_storage(request);

        match storage.list_submissions_with_pagination(actor, query).await {
            Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                response,
                "Submission list retrieved successfully",
            ))),
            Err(e) => Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get submission list: {e}"),
                )),
            ),
        }
    }

    // 创建作业提交（student 取自令牌，不信任载荷）
    pub async fn create_submission(
        &self,
        submission_data: CreateSubmissionRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let actor = match RequireJWT::extract_actor(request) {
            Some(actor) => actor,
            None => return Ok(Self::unauthorized()),
        };
        let storage = self.get_storage(request);

        // 作业必须存在
        match storage
            .get_assignment_by_id(submission_data.assignment_id)
            .await
        {
            Ok(Some(_)) => {}
            Ok(None) => {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::AssignmentNotFound,
                    "Assignment not found",
                )));
            }
            Err(e) => {
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("Submission creation failed: {e}"),
                    )),
                );
            }
        }

        match storage.create_submission(actor, submission_data).await {
            Ok(submission) => {
                Ok(HttpResponse::Created().json(ApiResponse::success(submission, "提交成功")))
            }
            Err(e) => Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Submission creation failed: {e}"),
                )),
            ),
        }
    }

    // 根据ID获取作业提交
    pub async fn get_submission(
        &self,
        submission_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let actor = match RequireJWT::extract_actor(request) {
            Some(actor) => actor,
            None => return Ok(Self::unauthorized()),
        };
        let storage = self.get_storage(request);

        match storage.get_submission_by_id(actor, submission_id).await {
            Ok(Some(submission)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                submission,
                "Submission retrieved successfully",
            ))),
            Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::SubmissionNotFound,
                "Submission not found",
            ))),
            Err(e) => Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get submission: {e}"),
                )),
            ),
        }
    }

    // 更新作业提交（学生改自己的内容，教师评分/评语）
    pub async fn update_submission(
        &self,
        submission_id: i64,
        update_data: UpdateSubmissionRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let actor = match RequireJWT::extract_actor(request) {
            Some(actor) => actor,
            None => return Ok(Self::unauthorized()),
        };
        let storage = self.get_storage(request);

        // 只能操作自己可见范围内的提交
        match storage.get_submission_by_id(actor, submission_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                    ErrorCode::SubmissionNotFound,
                    "Submission not found",
                )));
            }
            Err(e) => {
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("Submission update failed: {e}"),
                    )),
                );
            }
        }

        match storage.update_submission(submission_id, update_data).await {
            Ok(Some(submission)) => {
                Ok(HttpResponse::Ok().json(ApiResponse::success(submission, "提交更新成功")))
            }
            Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::SubmissionNotFound,
                "Submission not found",
            ))),
            Err(e) => Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Submission update failed: {e}"),
                )),
            ),
        }
    }

    // 删除作业提交
    pub async fn delete_submission(
        &self,
        submission_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let actor = match RequireJWT::extract_actor(request) {
            Some(actor) => actor,
            None => return Ok(Self::unauthorized()),
        };
        let storage = self.get_storage(request);

        match storage.get_submission_by_id(actor, submission_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                    ErrorCode::SubmissionNotFound,
                    "Submission not found",
                )));
            }
            Err(e) => {
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("Submission deletion failed: {e}"),
                    )),
                );
            }
        }

        match storage.delete_submission(submission_id).await {
            Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("提交删除成功"))),
            Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::SubmissionNotFound,
                "Submission not found",
            ))),
            Err(e) => Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Submission deletion failed: {e}"),
                )),
            ),
        }
    }
}
