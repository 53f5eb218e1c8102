use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, middleware, web};

use crate::services::SystemService;

static SYSTEM_SERVICE: SystemService = SystemService;

pub async fn get_status(request: HttpRequest) -> ActixResult<HttpResponse> {
    SYSTEM_SERVICE.get_status(&request).await
}

// 配置路由
pub fn configure_system_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/system")
            .wrap(middleware::Compress::default())
            .route("/status", web::get().to(get_status)),
    );
}
