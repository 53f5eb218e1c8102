//! 固定窗口限流中间件
//!
//! 挂在认证相关端点上防暴力尝试。限制键默认按客户端 IP，
//! 已登录请求按账号 ID。超限返回 429 与 Retry-After 头。
//!
//! ```rust,ignore
//! web::scope("/api/v1/auth")
//!     .wrap(RateLimit::login())
//!     .route("/login", web::post().to(login_handler))
//! ```

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    http::header::CONTENT_TYPE,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use moka::future::Cache;
use once_cell::sync::Lazy;
use std::net::IpAddr;
use std::rc::Rc;
use std::time::Duration;
use tracing::warn;

use crate::models::auth::entities::AuthAccount;
use crate::models::{ApiResponse, ErrorCode};

/// 计数器存储，键为 "作用域:身份"，一分钟后自动过期
static COUNTERS: Lazy<Cache<String, u32>> = Lazy::new(|| {
    Cache::builder()
        .time_to_live(Duration::from_secs(60))
        .max_capacity(100_000)
        .build()
});

/// 原子自增指定键的计数并返回新值
async fn bump(key: String) -> u32 {
    COUNTERS
        .entry(key)
        .and_upsert_with(|prev| std::future::ready(prev.map(|e| *e.value()).unwrap_or(0) + 1))
        .await
        .into_value()
}

#[derive(Clone)]
pub struct RateLimit {
    /// 窗口内允许的请求数
    quota: u32,
    /// 窗口长度
    window: Duration,
    /// 作用域名，不同端点的计数互不影响
    scope: &'static str,
}

impl RateLimit {
    pub fn new(quota: u32, window: Duration, scope: &'static str) -> Self {
        Self {
            quota,
            window,
            scope,
        }
    }

    /// 登录端点：每分钟 5 次
    pub fn login() -> Self {
        Self::new(5, Duration::from_secs(60), "login")
    }

    /// 注册端点：每分钟 3 次
    pub fn register() -> Self {
        Self::new(3, Duration::from_secs(60), "register")
    }

    /// 刷新令牌：每分钟 10 次
    pub fn refresh_token() -> Self {
        Self::new(10, Duration::from_secs(60), "refresh")
    }

    /// 通用 API：每分钟 100 次
    pub fn api() -> Self {
        Self::new(100, Duration::from_secs(60), "api")
    }

    /// 本次请求的限流键。优先用账号 ID，未认证时退到客户端 IP
    fn limit_key(&self, req: &ServiceRequest) -> String {
        let identity = match authenticated_account_id(req) {
            Some(id) => format!("account:{id}"),
            None => format!("ip:{}", client_ip(req)),
        };
        format!("{}:{}", self.scope, identity)
    }
}

fn authenticated_account_id(req: &ServiceRequest) -> Option<i64> {
    req.extensions().get::<AuthAccount>().map(|a| a.id)
}

/// 从指定头取第一个合法 IP（X-Forwarded-For 可能是逗号分隔列表）
fn header_ip(req: &ServiceRequest, name: &str) -> Option<String> {
    let value = req.headers().get(name)?.to_str().ok()?;
    let candidate = value.split(',').next()?.trim();
    candidate.parse::<IpAddr>().ok().map(|ip| ip.to_string())
}

/// 客户端 IP。直连时取连接地址即可；反向代理部署依赖代理
/// 正确设置转发头，这些头可伪造，所以始终先校验格式
fn client_ip(req: &ServiceRequest) -> String {
    let direct = req
        .connection_info()
        .realip_remote_addr()
        .map(str::to_string);

    if let Some(ip) = direct.as_deref()
        && ip.parse::<IpAddr>().is_ok()
    {
        return ip.to_string();
    }

    header_ip(req, "X-Forwarded-For")
        .or_else(|| header_ip(req, "X-Real-IP"))
        .or(direct)
        .unwrap_or_else(|| "unknown".to_string())
}

fn too_many_requests(window: Duration) -> HttpResponse {
    HttpResponse::build(StatusCode::TOO_MANY_REQUESTS)
        .insert_header((CONTENT_TYPE, "application/json; charset=utf-8"))
        .insert_header(("Retry-After", window.as_secs().to_string()))
        .json(ApiResponse::error_empty(
            ErrorCode::RateLimitExceeded,
            "请求过于频繁，请稍后再试",
        ))
}

impl<S, B> Transform<S, ServiceRequest> for RateLimit
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RateLimitMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddleware {
            service: Rc::new(service),
            limit: self.clone(),
        }))
    }
}

pub struct RateLimitMiddleware<S> {
    service: Rc<S>,
    limit: RateLimit,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddleware<S>
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
        let limit = self.limit.clone();

        Box::pin(async move {
            let key = limit.limit_key(&req);
            let count = bump(key.clone()).await;

            if count > limit.quota {
                warn!("Rate limit exceeded for {} ({}/{})", key, count, limit.quota);
                return Ok(req.into_response(too_many_requests(limit.window).map_into_right_body()));
            }

            Ok(srv.call(req).await?.map_into_left_body())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        let login = RateLimit::login();
        assert_eq!(login.quota, 5);
        assert_eq!(login.window, Duration::from_secs(60));
        assert_eq!(login.scope, "login");

        assert_eq!(RateLimit::register().quota, 3);
        assert_eq!(RateLimit::refresh_token().quota, 10);
    }

    #[tokio::test]
    async fn test_bump_counts_per_key() {
        for expected in 1..=3u32 {
            assert_eq!(bump("test:counter-a".to_string()).await, expected);
        }
        // 其他键互不影响
        assert_eq!(bump("test:counter-b".to_string()).await, 1);
    }
}
