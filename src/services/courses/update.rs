use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CourseService;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode, courses::requests::UpdateCourseRequest};

pub async fn update_course(
    service: &CourseService,
    course_id: i64,
    update_data: UpdateCourseRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 换绑教师时校验角色
    if let Some(teacher_id) = update_data.teacher_id {
        match storage.get_user_by_id(teacher_id).await {
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
                        format!("Course update failed: {e}"),
                    )),
                );
            }
        }
    }

    // 整体替换选课学生时，每个引用都必须是学生账号
    if let Some(student_ids) = &update_data.student_ids {
        for &student_id in student_ids {
            match storage.get_user_by_id(student_id).await {
                Ok(Some(user)) if user.role == UserRole::Student => {}
                Ok(Some(_)) => {
                    return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                        ErrorCode::CourseRoleInvalid,
                        format!("User {student_id} is not a student"),
                    )));
                }
                Ok(None) => {
                    return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                        ErrorCode::UserNotFound,
                        format!("Student {student_id} not found"),
                    )));
                }
                Err(e) => {
                    return Ok(HttpResponse::InternalServerError().json(
                        ApiResponse::error_empty(
                            ErrorCode::InternalServerError,
                            format!("Course update failed: {e}"),
                        ),
                    ));
                }
            }
        }
    }

    match storage.update_course(course_id, update_data).await {
        Ok(Some(course)) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(course, "课程更新成功")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::CourseNotFound,
            "Course not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Course update failed: {e}"),
            )),
        ),
    }
}
