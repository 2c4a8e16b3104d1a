use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AdminService;
use crate::models::admin::requests::{AssignCourseAction, AssignCourseRequest};
use crate::models::admin::responses::BulkActionResponse;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};

pub async fn assign_courses(
    service: &AdminService,
    assign_data: AssignCourseRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user_id = match assign_data.user_id {
        Some(id) => id,
        None => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::BadRequest,
                "user_id is required",
            )));
        }
    };

    let course_ids = match assign_data.course_ids {
        Some(ids) if !ids.is_empty() => ids,
        _ => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::BadRequest,
                "course_ids is required",
            )));
        }
    };

    let action = match assign_data
        .action
        .as_deref()
        .and_then(|s| s.parse::<AssignCourseAction>().ok())
    {
        Some(action) => action,
        None => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::BadRequest,
                "action must be one of: assign, remove",
            )));
        }
    };

    let storage = service.get_storage(request);

    let user = match storage.get_user_by_id(user_id).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::UserNotFound,
                "User not found",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Course assignment failed: {e}"),
                )),
            );
        }
    };

    // 每个课程引用都必须存在
    for &course_id in &course_ids {
        match storage.get_course_by_id(course_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                    ErrorCode::CourseNotFound,
                    format!("Course {course_id} not found"),
                )));
            }
            Err(e) => {
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("Course assignment failed: {e}"),
                    )),
                );
            }
        }
    }

    let mut affected: u64 = 0;

    match (user.role, action) {
        (UserRole::Student, AssignCourseAction::Assign) => {
            for &course_id in &course_ids {
                match storage.enroll_student(course_id, user_id).await {
                    Ok(true) => affected += 1,
                    Ok(false) => {} // 已选课，幂等
                    Err(e) => {
                        return Ok(HttpResponse::InternalServerError().json(
                            ApiResponse::error_empty(
                                ErrorCode::InternalServerError,
                                format!("Course assignment failed: {e}"),
                            ),
                        ));
                    }
                }
            }
        }
        (UserRole::Student, AssignCourseAction::Remove) => {
            for &course_id in &course_ids {
                match storage.unenroll_student(course_id, user_id).await {
                    Ok(true) => affected += 1,
                    Ok(false) => {}
                    Err(e) => {
                        return Ok(HttpResponse::InternalServerError().json(
                            ApiResponse::error_empty(
                                 ErrorCode::InternalServerError,
                                format!("Course assignment failed: {e}"),
                            ),
                        ));
                    }
                }
            }
        }
        (UserRole::Teacher, AssignCourseAction::Assign) => {
            for &course_id in &course_ids {
                match storage.set_course_teacher(course_id, user_id).await {
                    Ok(true) => affected += 1,
                    Ok(false) => {}
                    Err(e) => {
                        return Ok(HttpResponse::InternalServerError().json(
                            ApiResponse::error_empty(
                                ErrorCode::InternalServerError,
                                format!("Course assignment failed: {e}"),
                            ),
                        ));
                    }
                }
            }
        }
        // 课程必须有授课教师，不支持摘除操作
        (UserRole::Teacher, AssignCourseAction::Remove) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::BadRequest,
                "Cannot remove a teacher from courses; assign another teacher instead",
            )));
        }
        (UserRole::Admin, _) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::BadRequest,
                "user_id must reference a student or teacher account",
            )));
        }
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        BulkActionResponse { affected },
        "Course assignment completed",
    )))
}
