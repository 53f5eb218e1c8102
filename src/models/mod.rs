//! 数据模型定义
//!
//! 按业务域划分：auth（认证）、teachers（教师）、students（学生）、
//! courses（课程）、attendance（考勤）、system（系统）。
//! `common` 提供统一的 API 响应包装。

pub mod attendance;
pub mod auth;
pub mod common;
pub mod courses;
pub mod students;
pub mod system;
pub mod teachers;

pub use common::response::ApiResponse;

/// 应用启动时间（注入 app_data，用于系统状态接口）
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

/// 业务错误码
///
/// 约定：0 表示成功，4xxxx 对应客户端错误，5xxxx 对应服务端错误，
/// 前三位与 HTTP 状态码保持一致。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Success = 0,

    // 400 参数错误
    BadRequest = 40000,
    InvalidName = 40001,
    InvalidEmail = 40002,
    InvalidPassword = 40003,
    CourseSelectionRequired = 40004,

    // 401 认证错误
    Unauthorized = 40100,
    AuthFailed = 40101,
    TokenExpired = 40102,
    TokenInvalid = 40103,

    // 403 权限错误
    Forbidden = 40300,
    CoursePermissionDenied = 40301,

    // 404 资源不存在
    TeacherNotFound = 40400,
    StudentNotFound = 40401,
    CourseNotFound = 40402,

    // 409 冲突
    EmailAlreadyExists = 40900,

    // 429 频率限制
    RateLimitExceeded = 42900,

    // 5xx 服务端错误
    InternalServerError = 50000,
    RegisterFailed = 50001,
    ProfileUpdateFailed = 50002,
    StudentCreateFailed = 50003,
    StudentUpdateFailed = 50004,
    AttendanceSaveFailed = 50005,
}
