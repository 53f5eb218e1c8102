//! JWT 认证中间件
//!
//! 校验 `Authorization: Bearer <token>` 中的 access token，按令牌里的
//! 角色从教师表或学生表解析出账号并写入请求扩展，失败统一返回 401。
//! 解析结果以 token 为键缓存，登出时由登出接口主动失效。
//!
//! 处理程序里用 [`RequireJWT::extract_account`] 读取注入的账号。

use crate::cache::{CacheResult, ObjectCache};
use crate::config::AppConfig;
use crate::middlewares::create_error_response;
use crate::models::auth::entities::{AccountRole, AuthAccount};
use crate::models::ErrorCode;
use crate::storage::Storage;
use crate::utils::jwt::{Claims, JwtUtils};
use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::{Method, StatusCode, header::AUTHORIZATION},
    web::Data,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::{rc::Rc, sync::Arc};
use tracing::{debug, info};

const BEARER_PREFIX: &str = "Bearer ";

#[derive(Clone)]
pub struct RequireJWT;

impl RequireJWT {
    /// 取出中间件注入的账号，只应在挂了本中间件的路由里调用
    pub fn extract_account(req: &actix_web::HttpRequest) -> Option<AuthAccount> {
        req.extensions().get::<AuthAccount>().cloned()
    }

    /// 同上，只取账号 ID
    pub fn extract_account_id(req: &actix_web::HttpRequest) -> Option<i64> {
        req.extensions().get::<AuthAccount>().map(|a| a.id)
    }
}

fn bearer_token(req: &ServiceRequest) -> Option<&str> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix(BEARER_PREFIX)
}

async fn cached_account(cache: &dyn ObjectCache, key: &str) -> Option<AuthAccount> {
    let CacheResult::Found(json) = cache.get_raw(key).await else {
        return None;
    };
    match serde_json::from_str(&json) {
        Ok(account) => Some(account),
        Err(_) => {
            // 反序列化失败说明缓存内容与当前结构不兼容，丢弃重查
            cache.remove(key).await;
            None
        }
    }
}

async fn account_from_storage(
    req: &ServiceRequest,
    claims: &Claims,
) -> Result<AuthAccount, String> {
    let storage = req
        .app_data::<Data<Arc<dyn Storage>>>()
        .expect("Storage not found in app data")
        .get_ref()
        .clone();

    let account_id = claims
        .sub
        .parse::<i64>()
        .map_err(|_| "Invalid account ID in JWT".to_string())?;
    let role = claims
        .role
        .parse::<AccountRole>()
        .map_err(|_| "Invalid role in JWT".to_string())?;

    match role {
        AccountRole::Teacher => storage
            .get_teacher_by_id(account_id)
            .await
            .map_err(|_| "Failed to retrieve teacher from storage".to_string())?
            .map(|teacher| AuthAccount::from_teacher(&teacher))
            .ok_or_else(|| "Teacher not found".to_string()),
        AccountRole::Student => storage
            .get_student_by_id(account_id)
            .await
            .map_err(|_| "Failed to retrieve student from storage".to_string())?
            .map(|student| AuthAccount::from_student(&student))
            .ok_or_else(|| "Student not found".to_string()),
    }
}

/// 令牌校验加账号解析的完整流程，错误文本会拼进 401 响应
async fn resolve_account(req: &ServiceRequest) -> Result<AuthAccount, String> {
    let token =
        bearer_token(req).ok_or_else(|| "Missing or invalid Authorization header".to_string())?;

    let claims = JwtUtils::verify_access_token(token).map_err(|err| {
        info!("JWT token validation failed: {}", err);
        "Invalid JWT token".to_string()
    })?;

    let cache = req
        .app_data::<Data<Arc<dyn ObjectCache>>>()
        .expect("Cache not found in app data")
        .get_ref()
        .clone();

    let cache_key = format!("account:{token}");
    if let Some(account) = cached_account(cache.as_ref(), &cache_key).await {
        return Ok(account);
    }

    let account = account_from_storage(req, &claims).await?;

    // 回填，TTL 用全局默认值
    if let Ok(json) = serde_json::to_string(&account) {
        cache
            .insert_raw(cache_key, json, AppConfig::get().cache.default_ttl)
            .await;
    }

    Ok(account)
}

impl<S, B> Transform<S, ServiceRequest> for RequireJWT
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireJWTMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireJWTMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireJWTMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireJWTMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        Box::pin(async move {
            // CORS 预检直接放行为空响应
            if req.method() == Method::OPTIONS {
                return Ok(
                    req.into_response(HttpResponse::NoContent().finish().map_into_right_body())
                );
            }

            match resolve_account(&req).await {
                Ok(account) => {
                    debug!("JWT authentication successful for ID: {}", account.id);
                    req.extensions_mut().insert(account);
                    Ok(srv.call(req).await?.map_into_left_body())
                }
                Err(err) => {
                    info!(
                        "JWT authentication failed for request to {}: {}",
                        req.path(),
                        err
                    );
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::UNAUTHORIZED,
                            ErrorCode::Unauthorized,
                            &format!("Unauthorized: {err}"),
                        )
                        .map_into_right_body(),
                    ))
                }
            }
        })
    }
}
