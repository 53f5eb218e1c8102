use std::collections::HashSet;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentService;
use crate::middlewares::RequireJWT;
use crate::models::courses::entities::CourseSelection;
use crate::models::students::responses::StudentDetailResponse;
use crate::models::{ApiResponse, ErrorCode};

// 任意教师都可以查看已存在的学生，课程标记只覆盖该教师的任教课程
pub async fn handle_student_detail(
    service: &StudentService,
    student_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let teacher_id = match RequireJWT::extract_account_id(request) {
        Some(id) => id,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "Unauthorized: missing account id",
            )));
        }
    };

    let student = match storage.get_student_by_id(student_id).await {
        Ok(Some(student)) => student,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::StudentNotFound,
                "学生不存在",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to retrieve student information: {e}"),
                )),
            );
        }
    };

    let teacher_courses = match storage.list_teacher_courses(teacher_id).await {
        Ok(courses) => courses,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to retrieve course list: {e}"),
                )),
            );
        }
    };

    let enrolled_ids: HashSet<i64> = match storage.list_student_courses(student_id).await {
        Ok(courses) => courses.iter().map(|course| course.id).collect(),
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to retrieve course list: {e}"),
                )),
            );
        }
    };

    let courses = CourseSelection::mark(teacher_courses, &enrolled_ids);

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        StudentDetailResponse { student, courses },
        "Student information retrieved successfully",
    )))
}
