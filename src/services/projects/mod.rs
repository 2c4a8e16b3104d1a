use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::middlewares::require_jwt::RequireJWT;
use crate::models::projects::requests::{
    CreateProjectRequest, ProjectListParams, UpdateProjectRequest,
};
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub struct ProjectService {
    storage: Option<Arc<dyn Storage>>,
}

impl ProjectService {
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

    // 列出项目（学生只能看到自己的）
    pub async fn list_projects(
        &self,
        query: ProjectListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let actor = match RequireJWT::extract_actor(request) {
            Some(actor) => actor,
            None => return Ok(Self::unauthorized()),
        };
        let storage = self.get_storage(request);

        match storage.list_projects_with_pagination(actor, query).await {
            Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                response,
                "Project list retrieved successfully",
            ))),
            Err(e) => Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get project list: {e}"),
                )),
            ),
        }
    }

    // 创建项目（student_id 必须是学生账号；学生只能为自己建项目）
    pub async fn create_project(
        &self,
        mut project_data: CreateProjectRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let actor = match RequireJWT::extract_actor(request) {
            Some(actor) => actor,
            None => return Ok(Self::unauthorized()),
        };
        let storage = self.get_storage(request);

        if actor.role == UserRole::Student {
            project_data.student_id = actor.id;
        }

        match storage.get_user_by_id(project_data.student_id).await {
            Ok(Some(user)) if user.role == UserRole::Student => {}
            Ok(Some(_)) => {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::CourseRoleInvalid,
                    "student_id must reference a student account",
                )));
            }
            Ok(None) => {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::UserNotFound,
                    "Student not found",
                )));
            }
            Err(e) => {
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("Project creation failed: {e}"),
                    )),
                );
            }
        }

        match storage.get_course_by_id(project_data.course_id).await {
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
                        format!("Project creation failed: {e}"),
                    )),
                );
            }
        }

        match storage.create_project(project_data).await {
            Ok(project) => {
                Ok(HttpResponse::Created().json(ApiResponse::success(project, "项目创建成功")))
            }
            Err(e) => Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Project creation failed: {e}"),
                )),
            ),
        }
    }

    // 根据ID获取项目（带里程碑与文件）
    pub async fn get_project(
        &self,
        project_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let actor = match RequireJWT::extract_actor(request) {
            Some(actor) => actor,
            None => return Ok(Self::unauthorized()),
        };
        let storage = self.get_storage(request);

        match storage.get_project_by_id(actor, project_id).await {
            Ok(Some(project)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                project,
                "Project retrieved successfully",
            ))),
            Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ProjectNotFound,
                "Project not found",
            ))),
            Err(e) => Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get project: {e}"),
                )),
            ),
        }
    }

    // 更新项目
    pub async fn update_project(
        &self,
        project_id: i64,
        update_data: UpdateProjectRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let actor = match RequireJWT::extract_actor(request) {
            Some(actor) => actor,
            None => return Ok(Self::unauthorized()),
        };
        let storage = self.get_storage(request);

        // 只能操作自己可见范围内的项目
        match storage.get_project_by_id(actor, project_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                    ErrorCode::ProjectNotFound,
                    "Project not found",
                )));
            }
            Err(e) => {
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("Project update failed: {e}"),
                    )),
                );
            }
        }

        match storage.update_project(project_id, update_data).await {
            Ok(Some(project)) => {
                Ok(HttpResponse::Ok().json(ApiResponse::success(project, "项目更新成功")))
            }
            Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ProjectNotFound,
                "Project not found",
            ))),
            Err(e) => Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Project update failed: {e}"),
                )),
            ),
        }
    }

    // 删除项目
    pub async fn delete_project(
        &self,
        project_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let actor = match RequireJWT::extract_actor(request) {
            Some(actor) => actor,
            None => return Ok(Self::unauthorized()),
        };
        let storage = self.get_storage(request);

        match storage.get_project_by_id(actor, project_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                    ErrorCode::ProjectNotFound,
                    "Project not found",
                )));
            }
            Err(e) => {
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("Project deletion failed: {e}"),
                    )),
                );
            }
        }

        match storage.delete_project(project_id).await {
            Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("项目删除成功"))),
            Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ProjectNotFound,
                "Project not found",
            ))),
            Err(e) => Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Project deletion failed: {e}"),
                )),
            ),
        }
    }
}
