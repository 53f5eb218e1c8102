use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use jsonwebtoken::errors::ErrorKind;

use crate::middlewares::require_jwt::RequireJWT;
use crate::models::auth::responses::{
    AccountInfoResponse, RefreshTokenResponse, TokenVerificationResponse,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::jwt::JwtUtils;

use super::AuthService;

fn login_required() -> HttpResponse {
    HttpResponse::Unauthorized().json(ApiResponse::error_empty(
        ErrorCode::Unauthorized,
        "Unauthorized access, please login",
    ))
}

pub async fn handle_refresh_token(
    service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(refresh_token) = JwtUtils::extract_refresh_token_from_cookie(request) else {
        return Ok(login_required());
    };

    let new_access_token = match JwtUtils::refresh_access_token(&refresh_token) {
        Ok(token) => token,
        Err(e) => {
            tracing::error!("Refresh token failed: {}", e);

            // 区分过期与非法，前端据此决定是否跳转登录页
            let code = match e.kind() {
                ErrorKind::ExpiredSignature => ErrorCode::TokenExpired,
                _ => ErrorCode::TokenInvalid,
            };

            // 同时清掉失效的 refresh token cookie
            return Ok(HttpResponse::Unauthorized()
                .cookie(JwtUtils::create_empty_refresh_token_cookie())
                .json(ApiResponse::error_empty(
                    code,
                    "Login expired or invalid, please login again",
                )));
        }
    };

    let response = RefreshTokenResponse {
        access_token: new_access_token,
        // access_token_expiry 配置单位是分钟，响应里给秒
        expires_in: service.get_config().jwt.access_token_expiry * 60,
    };
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        response,
        "Token refreshed successfully",
    )))
}

pub async fn handle_verify_token(
    _service: &AuthService,
    _request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    // 能到这里说明 JWT 中间件已放行
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        TokenVerificationResponse { is_valid: true },
        "Token is valid",
    )))
}

pub async fn handle_get_account(
    _service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(account) = RequireJWT::extract_account(request) else {
        return Ok(login_required());
    };
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        AccountInfoResponse { account },
        "Account information retrieved successfully",
    )))
}
