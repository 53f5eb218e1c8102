use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AttendanceService;
use crate::middlewares::RequireJWT;
use crate::models::attendance::responses::StudentAttendanceResponse;
use crate::models::{ApiResponse, ErrorCode};

// 学生只能查看自己的记录，account_id 直接取自 JWT
pub async fn handle_history(
    service: &AttendanceService,
    course_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let account_id = match RequireJWT::extract_account_id(request) {
        Some(id) => id,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "Unauthorized: missing account id",
            )));
        }
    };

    let course = match storage.get_course_by_id(course_id).await {
        Ok(Some(course)) => course,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::CourseNotFound,
                "课程不存在",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to retrieve course information: {e}"),
                )),
            );
        }
    };

    match storage.list_student_attendance(account_id, course_id).await {
        Ok(records) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            StudentAttendanceResponse { course, records },
            "Attendance history retrieved successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to retrieve attendance history: {e}"),
            )),
        ),
    }
}
