use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::middlewares::require_jwt::RequireJWT;
use crate::models::exams::requests::{
    CreateExamSubmissionRequest, ExamSubmissionListParams, UpdateExamSubmissionRequest,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub struct ExamSubmissionService {
    storage: Option<Arc<dyn Storage>>,
}

impl ExamSubmissionService {
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

    // 列出考试提交（学生只能看到自己的，教师只能看到自己考试的）
    pub async fn list_exam_submissions(
        &self,
        query: ExamSubmissionListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let actor = match RequireJWT::extract_actor(request) {
            Some(actor) => actor,
            None => return Ok(Self::unauthorized()),
        };
        let storage = self.get_storage(request);

        match storage
            .list_exam_submissions_with_pagination(actor, query)
            .await
        {
            Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                response,
                "Exam submission list retrieved successfully",
            ))),
            Err(e) => Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get exam submission list: {e}"),
                )),
            ),
        }
    }

    // 创建考试提交（student 取自令牌，不信任载荷）
    pub async fn create_exam_submission(
        &self,
        submission_data: CreateExamSubmissionRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let actor = match RequireJWT::extract_actor(request) {
            Some(actor) => actor,
            None => return Ok(Self::unauthorized()),
        };
        let storage = self.get_storage(request);

        // 考试必须对操作者可见
        match storage.get_exam_by_id(actor, submission_data.exam_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::ExamNotFound,
                    "Exam not found",
                )));
            }
            Err(e) => {
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("Exam submission failed: {e}"),
                    )),
                );
            }
        }

        match storage.create_exam_submission(actor, submission_data).await {
            Ok(submission) => {
                Ok(HttpResponse::Created().json(ApiResponse::success(submission, "考试提交成功")))
            }
            Err(e) => Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Exam submission failed: {e}"),
                )),
            ),
        }
    }

    // 根据ID获取考试提交
    pub async fn get_exam_submission(
        &self,
        submission_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let actor = match RequireJWT::extract_actor(request) {
            Some(actor) => actor,
            None => return Ok(Self::unauthorized()),
        };
        let storage = self.get_storage(request);

        match storage.get_exam_submission_by_id(actor, submission_id).await {
            Ok(Some(submission)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                submission,
                "Exam submission retrieved successfully",
            ))),
            Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::SubmissionNotFound,
                "Exam submission not found",
            ))),
            Err(e) => Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get exam submission: {e}"),
                )),
            ),
        }
    }

    // 更新考试提交（教师重新评分）
    pub async fn update_exam_submission(
        &self,
        submission_id: i64,
        update_data: UpdateExamSubmissionRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let actor = match RequireJWT::extract_actor(request) {
            Some(actor) => actor,
            None => return Ok(Self::unauthorized()),
        };
        let storage = self.get_storage(request);

        // 只能操作自己可见范围内的提交
        match storage.get_exam_submission_by_id(actor, submission_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                    ErrorCode::SubmissionNotFound,
                    "Exam submission not found",
                )));
            }
            Err(e) => {
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("Exam submission update failed: {e}"),
                    )),
                );
            }
        }

        match storage
            .update_exam_submission(submission_id, update_data)
            .await
        {
            Ok(Some(submission)) => {
                Ok(HttpResponse::Ok().json(ApiResponse::success(submission, "考试提交更新成功")))
            }
            Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::SubmissionNotFound,
                "Exam submission not found",
            ))),
            Err(e) => Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Exam submission update failed: {e}"),
                )),
            ),
        }
    }

    // 删除考试提交
    pub async fn delete_exam_submission(
        &self,
        submission_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let actor = match RequireJWT::extract_actor(request) {
            Some(actor) => actor,
            None => return Ok(Self::unauthorized()),
        };
        let storage = self.get_storage(request);

        match storage.get_exam_submission_by_id(actor, submission_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                    ErrorCode::SubmissionNotFound,
                    "Exam submission not found",
                )));
            }
            Err(e) => {
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("Exam submission deletion failed: {e}"),
                    )),
                );
            }
        }

        match storage.delete_exam_submission(submission_id).await {
            Ok(true) => {
                Ok(HttpResponse::Ok().json(ApiResponse::success_empty("考试提交删除成功")))
            }
            Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::SubmissionNotFound,
                "Exam submission not found",
            ))),
            Err(e) => Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Exam submission deletion failed: {e}"),
                )),
            ),
        }
    }
}
