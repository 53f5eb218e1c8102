//! 课堂考勤系统后端
//!
//! 面向师生两种角色的点名与考勤记录服务，基于 Actix Web 构建。
//! 对外暴露 `/api/v1` 下的 JSON 接口和内嵌的前端静态资源；
//! 内部按 routes -> services -> storage 分层，认证与限流等
//! 横切逻辑在 middlewares，账号缓存在 cache。

pub mod cache;
pub mod config;
pub mod entity;
pub mod errors;
pub mod middlewares;
pub mod models;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;
