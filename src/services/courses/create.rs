use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CourseService;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode, courses::requests::CreateCourseRequest};

pub async fn create_course(
    service: &CourseService,
    course_data: CreateCourseRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 授课教师引用必须指向教师账号
    match storage.get_user_by_id(course_data.teacher_id).await {
        Ok(Some(user)) if user.role == UserRole::Teacher => {}
        Ok(Some(_)) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::CourseRoleInvalid,
                "teacher_id must reference a teacher account",
            )));
        }
        Ok(None) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::UserNotFound,
                "Teacher not found",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Course creation failed: {e}"),
                )),
            );
        }
    }

    match storage.create_course(course_data).await {
        Ok(course) => {
            Ok(HttpResponse::Created().json(ApiResponse::success(course, "课程创建成功")))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Course creation failed: {e}"),
            )),
        ),
    }
}
