//! 管理后台前端静态资源
//!
//! 构建产物通过 rust-embed 嵌入二进制，`./frontend-custom/` 下的同名文件优先（本地调试用）。
//! 未知的 `/api/` 路径返回 JSON 404，其余路径回退到 `index.html`。

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::header, web};
use rust_embed::Embed;
use std::borrow::Cow;
use std::path::Path;

use crate::config::AppConfig;
use crate::models::{ApiResponse, ErrorCode};

const INDEX_FILE: &str = "index.html";
const CUSTOM_DIR: &str = "./frontend-custom";

#[derive(Embed)]
#[folder = "frontend/dist/"]
struct AdminAssets;

fn extension(path: &str) -> &str {
    Path::new(path)
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
}

fn content_type_for(path: &str) -> &'static str {
    match extension(path) {
        "html" => "text/html; charset=utf-8",
        "js" | "mjs" => "application/javascript; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "json" | "map" | "webmanifest" => "application/json; charset=utf-8",
        "svg" => "image/svg+xml",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        "ico" => "image/x-icon",
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "ttf" => "font/ttf",
        "txt" => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    }
}

/// 带 hash 的静态资源可以长期缓存，HTML 不缓存
fn is_immutable_asset(path: &str) -> bool {
    path.starts_with("assets/")
        && matches!(
            extension(path),
            "js" | "css" | "woff" | "woff2" | "ttf" | "png" | "jpg" | "jpeg" | "svg" | "webp"
        )
}

fn load_asset(path: &str) -> Option<Cow<'static, [u8]>> {
    if path.contains("..") {
        return None;
    }
    if let Ok(data) = std::fs::read(format!("{CUSTOM_DIR}/{path}")) {
        return Some(Cow::Owned(data));
    }
    AdminAssets::get(path).map(|file| file.data)
}

/// `%APP_NAME%` 替换为配置中的系统名称
fn render_index(raw: &[u8], system_name: &str) -> Vec<u8> {
    String::from_utf8_lossy(raw)
        .replace("%APP_NAME%", system_name)
        .into_bytes()
}

fn missing_frontend_page(system_name: &str) -> HttpResponse {
    HttpResponse::NotFound()
        .content_type("text/html; charset=utf-8")
        .body(format!(
            r#"<!DOCTYPE html>
<html lang="ko">
<head><meta charset="utf-8"><title>{system_name}</title></head>
<body>
    <h1>{system_name}</h1>
    <p>The admin frontend has not been built.</p>
</body>
</html>"#
        ))
}

pub async fn serve_frontend(req: HttpRequest) -> ActixResult<HttpResponse> {
    let path = req.match_info().query("tail").trim_start_matches('/');

    // API 路径不做前端回退
    if path == "api" || path.starts_with("api/") {
        return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::NotFound,
            "API endpoint not found",
        )));
    }

    let system_name = &AppConfig::get().app.system_name;
    let (file_path, data) = match (!path.is_empty()).then(|| load_asset(path)).flatten() {
        Some(data) => (path, data),
        None => match load_asset(INDEX_FILE) {
            Some(data) => (INDEX_FILE, data),
            None => return Ok(missing_frontend_page(system_name)),
        },
    };

    let content_type = content_type_for(file_path);
    let cache_control = if is_immutable_asset(file_path) {
        "public, max-age=31536000, immutable"
    } else {
        "no-cache"
    };

    let body = if file_path == INDEX_FILE {
        render_index(&data, system_name)
    } else {
        data.into_owned()
    };

    Ok(HttpResponse::Ok()
        .content_type(content_type)
        .insert_header((header::CACHE_CONTROL, cache_control))
        .body(body))
}

/// 前端兜底路由，必须最后注册
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
            content_type_for("assets/app.mjs"),
            "application/javascript; charset=utf-8"
        );
        assert_eq!(content_type_for("unknown.xyz"), "application/octet-stream");
    }

    #[test]
    fn test_immutable_only_under_assets() {
        assert!(is_immutable_asset("assets/index-3f2a.js"));
        assert!(!is_immutable_asset("logo.png"));
        assert!(!is_immutable_asset("assets/data.json"));
    }

    #[test]
    fn test_render_index_replaces_name() {
        let html = render_index(b"<title>%APP_NAME%</title>", "Seoul Academy");
        assert_eq!(html, b"<title>Seoul Academy</title>".to_vec());
    }

    #[test]
    fn test_load_asset_rejects_traversal() {
        assert!(load_asset("../Cargo.toml").is_none());
    }

    #[actix_web::test]
    async fn test_unknown_api_path_returns_json_404() {
        let req = actix_web::test::TestRequest::get()
            .uri("/api/v1/unknown")
            .param("tail", "api/v1/unknown")
            .to_http_request();
        let resp = serve_frontend(req).await.unwrap();
        assert_eq!(resp.status(), actix_web::http::StatusCode::NOT_FOUND);
    }
}
