pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::exams::requests::{CreateExamRequest, ExamListParams, UpdateExamRequest};
use crate::storage::Storage;

pub struct ExamService {
    storage: Option<Arc<dyn Storage>>,
}

impl ExamService {
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

    // 列出考试（按角色可见范围过滤）
    pub async fn list_exams(
        &self,
        query: ExamListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_exams(self, query, request).await
    }

    // 创建考试（含嵌套试题与选项，单事务执行）
    pub async fn create_exam(
        &self,
        exam_data: CreateExamRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_exam(self, exam_data, request).await
    }

    // 根据ID获取考试
    pub async fn get_exam(&self, exam_id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::get_exam(self, exam_id, request).await
    }

    // 更新考试基本字段
    pub async fn update_exam(
        &self,
        exam_id: i64,
        update_data: UpdateExamRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_exam(self, exam_id, update_data, request).await
    }

    // 删除考试
    pub async fn delete_exam(
        &self,
        exam_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_exam(self, exam_id, request).await
    }
}
