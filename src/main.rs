use std::time::Duration;

use actix_cors::Cors;
use actix_web::middleware::{Compress, DefaultHeaders};
use actix_web::{App, HttpServer, web};
use dotenv::dotenv;
use human_panic::setup_panic;
use tracing::{debug, warn};

use rust_attendance_next::config::AppConfig;
use rust_attendance_next::models::AppStartTime;
use rust_attendance_next::routes;
use rust_attendance_next::runtime::lifetime;
use rust_attendance_next::utils::{json_error_handler, query_error_handler};

/// 初始化 tracing，返回的 guard 在 main 存活期间持有，
/// 否则非阻塞 writer 的后台线程会提前退出丢日志
fn init_tracing(config: &AppConfig) -> tracing_appender::non_blocking::WorkerGuard {
    let (writer, guard) = tracing_appender::non_blocking(std::io::stdout());
    let builder = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&config.app.log_level))
        .with_writer(writer)
        .event_format(
            tracing_subscriber::fmt::format()
                .with_level(true)
                .with_ansi(true),
        );

    // 开发环境输出带文件行号的明文，生产环境输出 JSON
    if config.is_development() {
        builder.with_file(true).with_line_number(true).init();
    } else {
        builder.json().init();
    }
    guard
}

/// 按配置构建 CORS 策略，列表含 "*" 时放开对应维度
fn build_cors(config: &AppConfig) -> Cors {
    let mut cors = if config.cors.allowed_origins.iter().any(|o| o == "*") {
        Cors::default().allow_any_origin()
    } else {
        let mut restricted = Cors::default();
        for origin in &config.cors.allowed_origins {
            restricted = restricted.allowed_origin(origin);
        }
        restricted
    };

    cors = if config.cors.allowed_headers.iter().any(|h| h == "*") {
        cors.allow_any_header()
    } else {
        cors.allowed_headers(config.cors.allowed_headers.iter().map(String::as_str))
    };

    cors.allowed_methods(config.cors.allowed_methods.iter().map(String::as_str))
        .max_age(config.cors.max_age)
}

fn default_headers(config: &AppConfig) -> DefaultHeaders {
    let keep_alive = format!("timeout={}, max=1000", config.server.timeouts.keep_alive);
    DefaultHeaders::new()
        .add(("Connection", "keep-alive"))
        .add(("Keep-Alive", keep_alive))
        .add(("Cache-Control", "no-cache, no-store, must-revalidate"))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    setup_panic!();

    let started_at = AppStartTime {
        start_datetime: chrono::Utc::now(),
    };

    AppConfig::init().expect("Failed to initialize configuration");
    let config = AppConfig::get();
    let _tracing_guard = init_tracing(config);

    warn!(
        "{} v{} starting (env: {})",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        config.app.environment
    );

    let startup = lifetime::startup::prepare_server_startup().await;
    let storage = startup.storage.clone();
    let cache = startup.cache.clone();

    debug!(
        "Initialization took {} ms",
        chrono::Utc::now()
            .signed_duration_since(started_at.start_datetime)
            .num_milliseconds()
    );

    warn!("Spawning {} worker(s)", config.server.workers);

    let timeouts = &config.server.timeouts;
    let server = HttpServer::new(move || {
        App::new()
            .wrap(build_cors(config))
            .wrap(Compress::default())
            .wrap(default_headers(config))
            // 参数解析失败也走统一的响应包装
            .app_data(web::QueryConfig::default().error_handler(query_error_handler))
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .app_data(web::PayloadConfig::new(
                config.server.limits.max_payload_size,
            ))
            .app_data(web::Data::new(storage.clone()))
            .app_data(web::Data::new(cache.clone()))
            .app_data(web::Data::new(started_at.clone()))
            .configure(routes::configure_auth_routes)
            .configure(routes::configure_courses_routes)
            .configure(routes::configure_teacher_routes)
            .configure(routes::configure_student_routes)
            .configure(routes::configure_system_routes)
            // 前端兜底路由必须放在所有 API scope 之后
            .configure(routes::configure_frontend_routes)
    })
    .keep_alive(Duration::from_secs(timeouts.keep_alive))
    .client_request_timeout(Duration::from_millis(timeouts.client_request))
    .client_disconnect_timeout(Duration::from_millis(timeouts.client_disconnect))
    .workers(config.server.workers);

    #[cfg(unix)]
    let server = match config.unix_socket_path() {
        Some(socket_path) => {
            warn!("Listening on Unix socket: {}", socket_path);
            // 残留的旧 socket 文件会让 bind 失败
            if std::path::Path::new(socket_path).exists() {
                std::fs::remove_file(socket_path)?;
            }
            server.bind_uds(socket_path)?
        }
        None => {
            let addr = config.server_bind_address();
            warn!("Listening at http://{}", addr);
            server.bind(addr)?
        }
    };

    #[cfg(not(unix))]
    let server = {
        let addr = config.server_bind_address();
        warn!("Listening at http://{}", addr);
        server.bind(addr)?
    };

    tokio::select! {
        outcome = server.run() => {
            outcome?;
        }
        _ = lifetime::shutdown::listen_for_shutdown() => {
            warn!("Graceful shutdown complete");
        }
    }

    Ok(())
}
