use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};

use crate::middlewares;
use crate::models::attendance::requests::{
    AttendanceRecordsQuery, EditAttendanceRequest, SaveAttendanceSheetRequest,
};
use crate::models::auth::entities::AccountRole;
use crate::models::students::requests::{CreateStudentRequest, UpdateStudentRequest};
use crate::models::teachers::requests::UpdateTeacherProfileRequest;
use crate::services::{AttendanceService, StudentService, TeacherService};
use crate::utils::{SafeCourseIdI64, SafeStudentIdI64};

static TEACHER_SERVICE: TeacherService = TeacherService;
static STUDENT_SERVICE: StudentService = StudentService;
static ATTENDANCE_SERVICE: AttendanceService = AttendanceService;

// HTTP处理程序
pub async fn dashboard(req: HttpRequest) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE.dashboard(&req).await
}

pub async fn get_profile(req: HttpRequest) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE.get_profile(&req).await
}

pub async fn update_profile(
    req: HttpRequest,
    update_data: web::Json<UpdateTeacherProfileRequest>,
) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE
        .update_profile(update_data.into_inner(), &req)
        .await
}

pub async fn create_student(
    req: HttpRequest,
    create_data: web::Json<CreateStudentRequest>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE
        .create_student(create_data.into_inner(), &req)
        .await
}

pub async fn student_detail(
    req: HttpRequest,
    student_id: SafeStudentIdI64,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.student_detail(student_id.0, &req).await
}

pub async fn update_student(
    req: HttpRequest,
    student_id: SafeStudentIdI64,
    update_data: web::Json<UpdateStudentRequest>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE
        .update_student(student_id.0, update_data.into_inner(), &req)
        .await
}

pub async fn roster(req: HttpRequest, course_id: SafeCourseIdI64) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.roster(course_id.0, &req).await
}

pub async fn attendance_sheet(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE.sheet(course_id.0, &req).await
}

pub async fn save_attendance(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
    save_data: web::Json<SaveAttendanceSheetRequest>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .save(course_id.0, save_data.into_inner(), &req)
        .await
}

pub async fn attendance_records(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
    query: web::Query<AttendanceRecordsQuery>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .records(course_id.0, query.into_inner(), &req)
        .await
}

pub async fn edit_attendance(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
    edit_data: web::Json<EditAttendanceRequest>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .edit(course_id.0, edit_data.into_inner(), &req)
        .await
}

// 配置路由
//
// 注意 wrap 的执行顺序与注册顺序相反：RequireJWT 先解析身份，
// RequireRole 再做角色校验，课程子路由最后由 RequireCourseAccess
// 校验任教关系。
pub fn configure_teacher_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/teacher")
            .wrap(middlewares::RequireRole::new(&AccountRole::Teacher))
            .wrap(middlewares::RequireJWT)
            .route("/dashboard", web::get().to(dashboard))
            .service(
                web::resource("/profile")
                    .route(web::get().to(get_profile))
                    .route(web::put().to(update_profile)),
            )
            .route("/students", web::post().to(create_student))
            .service(
                web::resource("/students/{student_id}")
                    .route(web::get().to(student_detail))
                    .route(web::put().to(update_student)),
            )
            .service(
                web::scope("/courses/{course_id}")
                    .wrap(middlewares::RequireCourseAccess)
                    .route("/students", web::get().to(roster))
                    .service(
                        web::resource("/attendance")
                            .route(web::get().to(attendance_sheet))
                            .route(web::post().to(save_attendance)),
                    )
                    .service(
                        web::resource("/attendance/records")
                            .route(web::get().to(attendance_records))
                            .route(web::put().to(edit_attendance)),
                    ),
            ),
    );
}
