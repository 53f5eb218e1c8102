use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentService;
use crate::models::students::responses::RosterResponse;
use crate::models::{ApiResponse, ErrorCode};

// 课程归属校验由 RequireCourseAccess 中间件完成，这里只负责取数
pub async fn handle_roster(
    service: &StudentService,
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

    match storage.list_course_students(course_id).await {
        Ok(students) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            RosterResponse { course, students },
            "Roster retrieved successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to retrieve roster: {e}"),
            )),
        ),
    }
}
