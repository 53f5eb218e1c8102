use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AttendanceService;
use crate::models::attendance::requests::EditAttendanceRequest;
use crate::models::attendance::responses::EditAttendanceResponse;
use crate::models::{ApiResponse, ErrorCode};

// 更新范围由存储层用 record_id + course_id 双条件限定，
// 不属于本课程的记录 ID 不会产生任何写入
pub async fn handle_edit(
    service: &AttendanceService,
    course_id: i64,
    edit_request: EditAttendanceRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage
        .update_attendance_statuses(course_id, &edit_request.updates)
        .await
    {
        Ok(updated) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            EditAttendanceResponse { updated },
            "考勤修正成功",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::AttendanceSaveFailed,
                format!("修正考勤失败: {e}"),
            )),
        ),
    }
}
