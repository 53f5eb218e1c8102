//! 业务服务层
//!
//! 每个领域一个无状态 facade，路由层持有静态实例并转发请求。
//! 存储句柄不落在 facade 上，统一从 actix 的 app_data 取。

pub mod attendance;
pub mod auth;
pub mod courses;
pub mod students;
pub mod system;
pub mod teachers;

pub use attendance::AttendanceService;
pub use auth::AuthService;
pub use courses::CourseService;
pub use students::StudentService;
pub use system::SystemService;
pub use teachers::TeacherService;

use actix_web::HttpRequest;
use std::sync::Arc;

use crate::storage::Storage;

/// 从请求的 app_data 取存储句柄。启动时一定已注册，取不到属于装配错误
pub(crate) fn request_storage(request: &HttpRequest) -> Arc<dyn Storage> {
    request
        .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
        .expect("Storage not found in app data")
        .get_ref()
        .clone()
}
