use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::FeatureService;
use crate::models::{
    ApiResponse, ErrorCode,
    features::{FeatureResponse, ToggleFeatureRequest, find_feature},
};
use crate::services::common::{current_user, internal_error, not_found};

pub async fn toggle_feature(
    service: &FeatureService,
    request: &HttpRequest,
    code: String,
    toggle: ToggleFeatureRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    let Some(definition) = find_feature(&code) else {
        return Ok(not_found(ErrorCode::FeatureNotFound, "Feature not found"));
    };

    let storage = service.get_storage(request)?;
    match storage
        .upsert_academy_feature(user.academy_id, definition.code, toggle.enabled, toggle.settings)
        .await
    {
        Ok(feature) => {
            tracing::info!(
                "Feature {} {} for academy {}",
                definition.code,
                if feature.enabled { "enabled" } else { "disabled" },
                user.academy_id
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                FeatureResponse::merge(definition, Some(&feature)),
                "Feature updated successfully",
            )))
        }
        Err(e) => Ok(internal_error("Failed to update feature", e)),
    }
}
