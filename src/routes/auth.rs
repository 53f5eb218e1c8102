use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};

use crate::middlewares;
use crate::models::auth::entities::AccountRole;
use crate::models::auth::requests::{
    LoginRequest, StudentRegisterRequest, TeacherRegisterRequest,
};
use crate::services::AuthService;

static AUTH_SERVICE: AuthService = AuthService;

pub async fn teacher_login(
    req: HttpRequest,
    login_data: web::Json<LoginRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE
        .login(AccountRole::Teacher, login_data.into_inner(), &req)
        .await
}

pub async fn student_login(
    req: HttpRequest,
    login_data: web::Json<LoginRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE
        .login(AccountRole::Student, login_data.into_inner(), &req)
        .await
}

pub async fn teacher_register(
    req: HttpRequest,
    create_data: web::Json<TeacherRegisterRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE
        .register_teacher(create_data.into_inner(), &req)
        .await
}

pub async fn student_register(
    req: HttpRequest,
    create_data: web::Json<StudentRegisterRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE
        .register_student(create_data.into_inner(), &req)
        .await
}

pub async fn refresh_token(request: HttpRequest) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.refresh_token(&request).await
}

pub async fn logout(request: HttpRequest) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.logout(&request).await
}

pub async fn verify_token(request: HttpRequest) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.verify_token(&request).await
}

pub async fn get_account(request: HttpRequest) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.get_account(&request).await
}

// 配置路由
pub fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/auth")
            .service(
                web::resource("/teacher/login").route(
                    web::post()
                        .to(teacher_login)
                        .wrap(middlewares::RateLimit::login()),
                ),
            )
            .service(
                web::resource("/student/login").route(
                    web::post()
                        .to(student_login)
                        .wrap(middlewares::RateLimit::login()),
                ),
            )
            .service(
                web::resource("/teacher/register").route(
                    web::post()
                        .to(teacher_register)
                        .wrap(middlewares::RateLimit::register()),
                ),
            )
            .service(
                web::resource("/student/register").route(
                    web::post()
                        .to(student_register)
                        .wrap(middlewares::RateLimit::register()),
                ),
            )
            .service(
                web::resource("/refresh").route(
                    web::post()
                        .to(refresh_token)
                        .wrap(middlewares::RateLimit::refresh_token()),
                ),
            )
            .route("/logout", web::post().to(logout))
            .service(
                web::scope("")
                    .wrap(middlewares::RequireJWT)
                    .route("/verify-token", web::get().to(verify_token))
                    .route("/me", web::get().to(get_account)),
            ),
    );
}
