use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};

use crate::services::CourseService;

static COURSE_SERVICE: CourseService = CourseService;

// 课程目录是公开接口，注册页在登录前就需要它
pub async fn list_courses(req: HttpRequest) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.list_courses(&req).await
}

// 配置路由
pub fn configure_courses_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/api/v1/courses").route("", web::get().to(list_courses)));
}
