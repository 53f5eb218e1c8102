//! 前端静态资源路由
//!
//! rust-embed 把前端构建产物打进二进制，部署时单文件即可。
//! 未命中的路径一律回退到 index.html，由前端路由接管。

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use rust_embed::Embed;
use std::path::Path;

#[derive(Embed)]
#[folder = "frontend/dist/"]
struct WebDist;

fn content_type_for(path: &str) -> &'static str {
    let ext = Path::new(path)
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("");

    match ext {
        "html" => "text/html; charset=utf-8",
        "js" | "mjs" => "application/javascript; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "json" | "map" => "application/json; charset=utf-8",
        "svg" => "image/svg+xml",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "ico" => "image/x-icon",
        "webp" => "image/webp",
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "ttf" => "font/ttf",
        "txt" => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    }
}

/// 构建产物带内容 hash 的资源可以长缓存，HTML 入口必须每次回源
fn cache_control_for(path: &str) -> &'static str {
    let ext = Path::new(path)
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("");

    match ext {
        "js" | "mjs" | "css" | "woff" | "woff2" | "ttf" | "png" | "jpg" | "jpeg" | "svg"
        | "webp" => "public, max-age=31536000, immutable",
        _ => "no-cache, no-store, must-revalidate",
    }
}

/// 解析请求路径到嵌入文件，未命中时回退 SPA 入口
fn resolve(path: &str) -> Option<(&str, Vec<u8>)> {
    if !path.is_empty()
        && let Some(file) = WebDist::get(path)
    {
        return Some((path, file.data.into_owned()));
    }
    WebDist::get("index.html").map(|file| ("index.html", file.data.into_owned()))
}

pub async fn serve_frontend(req: HttpRequest) -> ActixResult<HttpResponse> {
    let requested = req.match_info().query("tail").trim_start_matches('/');

    match resolve(requested) {
        Some((path, data)) => Ok(HttpResponse::Ok()
            .content_type(content_type_for(path))
            .insert_header(("Cache-Control", cache_control_for(path)))
            .body(data)),
        // 没有任何嵌入产物时给出提示页，方便裸跑后端时排查
        None => Ok(HttpResponse::NotFound()
            .content_type("text/html; charset=utf-8")
            .body(
                r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>Attendance System</title></head>
<body>
  <h1>Web assets missing</h1>
  <p>No frontend build was embedded in this binary.</p>
  <p>Run <code>cd frontend &amp;&amp; npm run build</code> and rebuild the server.</p>
</body>
</html>"#,
            )),
    }
}

/// 配置前端路由，挂在所有 API scope 之后兜底
pub fn configure_frontend_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/{tail:.*}", web::get().to(serve_frontend));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_for() {
        assert_eq!(content_type_for("index.html"), "text/html; charset=utf-8");
        assert_eq!(
            content_type_for("assets/app-4f2a.js"),
            "application/javascript; charset=utf-8"
        );
        assert_eq!(content_type_for("style.css"), "text/css; charset=utf-8");
        assert_eq!(content_type_for("logo.png"), "image/png");
        assert_eq!(content_type_for("random.bin"), "application/octet-stream");
    }

    #[test]
    fn test_cache_control_for() {
        assert_eq!(
            cache_control_for("assets/app-4f2a.js"),
            "public, max-age=31536000, immutable"
        );
        assert_eq!(
            cache_control_for("index.html"),
            "no-cache, no-store, must-revalidate"
        );
        assert_eq!(
            cache_control_for("manifest.json"),
            "no-cache, no-store, must-revalidate"
        );
    }
}
