//! 认证授权中间件
//!
//! - `RequireJWT`: 验证 access token 并将账号注入请求扩展
//! - `RequireRole`: 校验账号角色（教师/学生）
//! - `RequireCourseAccess`: 校验账号与路径中课程的关联边
//! - `RateLimit`: 固定窗口限流

pub mod rate_limit;
pub mod require_course_access;
pub mod require_jwt;
pub mod require_role;

pub use rate_limit::RateLimit;
pub use require_course_access::RequireCourseAccess;
pub use require_jwt::RequireJWT;
pub use require_role::RequireRole;

use actix_web::{HttpResponse, http::StatusCode, http::header::CONTENT_TYPE};

use crate::models::{ApiResponse, ErrorCode};

// 辅助函数：创建统一的错误响应
pub(crate) fn create_error_response(
    status: StatusCode,
    code: ErrorCode,
    message: &str,
) -> HttpResponse {
    HttpResponse::build(status)
        .insert_header((CONTENT_TYPE, "application/json; charset=utf-8"))
        .json(ApiResponse::<()>::error_empty(code, message))
}
