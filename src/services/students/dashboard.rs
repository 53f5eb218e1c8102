use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentService;
use crate::middlewares::RequireJWT;
use crate::models::students::responses::StudentDashboardResponse;
use crate::models::{ApiResponse, ErrorCode};

pub async fn handle_dashboard(
    service: &StudentService,
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

    match storage.get_student_by_id(account_id).await {
        Ok(Some(student)) => match storage.list_student_courses(student.id).await {
            Ok(courses) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                StudentDashboardResponse { student, courses },
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
            ErrorCode::StudentNotFound,
            "学生不存在",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to retrieve student information: {e}"),
            )),
        ),
    }
}
