use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};

use super::SystemService;
use crate::models::{ApiResponse, AppStartTime, system::HealthResponse};

pub async fn health(service: &SystemService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let config = service.get_config();

    let uptime_seconds = request
        .app_data::<web::Data<AppStartTime>>()
        .map(|start| {
            chrono::Utc::now()
                .signed_duration_since(start.start_datetime)
                .num_seconds()
        })
        .unwrap_or_default();

    let response = HealthResponse {
        status: "healthy".to_string(),
        app: config.app.system_name.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Service is healthy")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[actix_web::test]
    async fn test_health_reports_uptime() {
        let start = AppStartTime {
            start_datetime: chrono::Utc::now() - chrono::Duration::seconds(90),
        };
        let req = actix_web::test::TestRequest::default()
            .app_data(web::Data::new(start))
            .to_http_request();

        let resp = health(&SystemService::new_lazy(), &req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }
}
