use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AttendanceService;
use crate::models::attendance::requests::SaveAttendanceSheetRequest;
use crate::models::attendance::responses::SaveAttendanceResponse;
use crate::models::{ApiResponse, ErrorCode};

pub async fn handle_save(
    service: &AttendanceService,
    course_id: i64,
    save_request: SaveAttendanceSheetRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 日期缺省为服务器本地当天
    let date = save_request
        .date
        .unwrap_or_else(|| chrono::Local::now().date_naive());

    match storage
        .upsert_attendance_marks(course_id, date, &save_request.entries)
        .await
    {
        Ok(marked) => {
            tracing::info!(
                "Attendance saved for course {}: {} records on {}",
                course_id,
                marked,
                date
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                SaveAttendanceResponse { date, marked },
                "考勤保存成功",
            )))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::AttendanceSaveFailed,
                format!("保存考勤失败: {e}"),
            )),
        ),
    }
}
