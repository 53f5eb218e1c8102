use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AttendanceService;
use crate::models::attendance::requests::AttendanceRecordsQuery;
use crate::models::attendance::responses::AttendanceRecordsResponse;
use crate::models::{ApiResponse, ErrorCode};

pub async fn handle_records(
    service: &AttendanceService,
    course_id: i64,
    query: AttendanceRecordsQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage
        .list_attendance_records_by_date(course_id, query.date)
        .await
    {
        Ok(records) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            AttendanceRecordsResponse {
                date: query.date,
                records,
            },
            "Attendance records retrieved successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to retrieve attendance records: {e}"),
            )),
        ),
    }
}
