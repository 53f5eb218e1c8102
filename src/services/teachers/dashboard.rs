use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TeacherService;
use crate::middlewares::RequireJWT;
use crate::models::teachers::responses::TeacherDashboardResponse;
use crate::models::{ApiResponse, ErrorCode};

pub async fn handle_dashboard(
    service: &TeacherService,
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

    match storage.get_teacher_by_id(account_id).await {
        Ok(Some(teacher)) => match storage.list_teacher_courses(teacher.id).await {
            Ok(courses) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                TeacherDashboardResponse { teacher, courses },
                "Dashboard retrieved successfully",
            ))),
            Err(e) => Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to retrieve course list: {e}"),
                )),
            ),
        },
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::TeacherNotFound,
            "教师不存在",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to retrieve teacher information: {e}"),
            )),
        ),
    }
}
