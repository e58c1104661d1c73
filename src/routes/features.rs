use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::features::ToggleFeatureRequest;
use crate::models::users::entities::UserRole;
use crate::services::FeatureService;
use crate::utils::SafeFeatureCode;

static FEATURE_SERVICE: Lazy<FeatureService> = Lazy::new(FeatureService::new_lazy);

pub async fn list_features(req: HttpRequest) -> ActixResult<HttpResponse> {
    FEATURE_SERVICE.list_features(&req).await
}

pub async fn toggle_feature(
    req: HttpRequest,
    code: SafeFeatureCode,
    toggle: web::Json<ToggleFeatureRequest>,
) -> ActixResult<HttpResponse> {
    FEATURE_SERVICE
        .toggle_feature(&req, code.0, toggle.into_inner())
        .await
}

// 配置路由
pub fn configure_features_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/features")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("").route(
                    web::get()
                        .to(list_features)
                        .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles())),
                ),
            )
            .service(
                web::resource("/{code}").route(
                    web::put()
                        .to(toggle_feature)
                        .wrap(middlewares::RequireRole::new(&UserRole::Admin)),
                ),
            ),
    );
}
