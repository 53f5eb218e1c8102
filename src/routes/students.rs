use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};

use crate::middlewares;
use crate::models::auth::entities::AccountRole;
use crate::models::students::requests::UpdateStudentProfileRequest;
use crate::services::{AttendanceService, StudentService};
use crate::utils::SafeCourseIdI64;

static STUDENT_SERVICE: StudentService = StudentService;
static ATTENDANCE_SERVICE: AttendanceService = AttendanceService;

// HTTP处理程序
pub async fn dashboard(req: HttpRequest) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.dashboard(&req).await
}

pub async fn get_profile(req: HttpRequest) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.get_profile(&req).await
}

pub async fn update_profile(
    req: HttpRequest,
    update_data: web::Json<UpdateStudentProfileRequest>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE
        .update_profile(update_data.into_inner(), &req)
        .await
}

pub async fn attendance_history(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE.history(course_id.0, &req).await
}

// 配置路由
pub fn configure_student_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/student")
            .wrap(middlewares::RequireRole::new(&AccountRole::Student))
            .wrap(middlewares::RequireJWT)
            .route("/dashboard", web::get().to(dashboard))
            .service(
                web::resource("/profile")
                    .route(web::get().to(get_profile))
                    .route(web::put().to(update_profile)),
            )
            .service(
                web::scope("/courses/{course_id}")
                    .wrap(middlewares::RequireCourseAccess)
                    .route("/attendance", web::get().to(attendance_history)),
            ),
    );
}
