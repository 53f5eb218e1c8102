use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::auth::entities::{AccountRole, AuthAccount};
use crate::models::auth::requests::LoginRequest;
use crate::models::auth::responses::LoginResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::jwt::JwtUtils;
use crate::utils::password::verify_password;

use super::AuthService;

// 账号不存在与密码错误返回同一提示，避免探测已注册邮箱
fn auth_failed() -> HttpResponse {
    HttpResponse::Unauthorized().json(ApiResponse::error_empty(
        ErrorCode::AuthFailed,
        "Email or password is incorrect",
    ))
}

pub async fn handle_login(
    service: &AuthService,
    role: AccountRole,
    login_request: LoginRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let config = service.get_config();

    // 按角色在对应表中查找，取出展示信息和密码哈希
    let lookup = match role {
        AccountRole::Teacher => storage
            .get_teacher_by_email(&login_request.email)
            .await
            .map(|found| {
                found.map(|teacher| (AuthAccount::from_teacher(&teacher), teacher.password_hash))
            }),
        AccountRole::Student => storage
            .get_student_by_email(&login_request.email)
            .await
            .map(|found| {
                found.map(|student| (AuthAccount::from_student(&student), student.password_hash))
            }),
    };

    let found = match lookup {
        Ok(found) => found,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Login failed: {e}"),
                )),
            );
        }
    };

    let Some((account, password_hash)) = found else {
        return Ok(auth_failed());
    };
    if !verify_password(&login_request.password, &password_hash) {
        return Ok(auth_failed());
    }

    // 勾选「记住我」时 refresh token 用更长的有效期
    let remember = login_request
        .remember_me
        .then(|| chrono::Duration::days(config.jwt.refresh_token_remember_me_expiry));

    let token_pair = match account.generate_token_pair(remember) {
        Ok(pair) => pair,
        Err(e) => {
            tracing::error!("Failed to generate JWT token: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Login failed, unable to generate token",
                )),
            );
        }
    };

    tracing::info!("{} {} logged in successfully", account.role, account.email);

    let refresh_cookie = JwtUtils::create_refresh_token_cookie(&token_pair.refresh_token);
    let response = LoginResponse {
        access_token: token_pair.access_token,
        // access_token_expiry 配置单位是分钟
        expires_in: config.jwt.access_token_expiry * 60,
        account,
        created_at: chrono::Utc::now(),
    };

    Ok(HttpResponse::Ok()
        .cookie(refresh_cookie)
        .json(ApiResponse::success(response, "Login successful")))
}
