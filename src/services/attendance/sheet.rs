use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AttendanceService;
use crate::models::attendance::responses::AttendanceSheetResponse;
use crate::models::{ApiResponse, ErrorCode};

pub async fn handle_sheet(
    service: &AttendanceService,
    course_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

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

    let students = match storage.list_course_students(course_id).await {
        Ok(students) => students,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to retrieve roster: {e}"),
                )),
            );
        }
    };

    match storage.list_attendance_dates(course_id).await {
        Ok(dates) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            AttendanceSheetResponse {
                course,
                students,
                dates,
            },
            "Attendance sheet retrieved successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to retrieve attendance dates: {e}"),
            )),
        ),
    }
}
