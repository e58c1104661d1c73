use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::FeatureService;
use crate::models::{
    ApiResponse,
    features::{AcademyFeature, FEATURE_CATALOG, FeatureResponse},
};
use crate::services::common::{current_user, internal_error};

/// 按目录顺序合并学院的开关
pub(crate) fn merge_catalog(toggles: &[AcademyFeature]) -> Vec<FeatureResponse> {
    FEATURE_CATALOG
        .iter()
        .map(|definition| {
            let toggle = toggles.iter().find(|t| t.feature_code == definition.code);
            FeatureResponse::merge(definition, toggle)
        })
        .collect()
}

pub async fn list_features(
    service: &FeatureService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request)?;

    match storage.list_academy_features(user.academy_id).await {
        Ok(toggles) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            merge_catalog(&toggles),
            "Features retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to retrieve features", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_catalog_keeps_order_and_defaults() {
        let toggles = vec![AcademyFeature {
            academy_id: 1,
            feature_code: "billing".to_string(),
            enabled: false,
            enabled_at: None,
            settings: None,
        }];
        let merged = merge_catalog(&toggles);

        assert_eq!(merged.len(), FEATURE_CATALOG.len());
        assert_eq!(merged[0].code, FEATURE_CATALOG[0].code);
        for feature in &merged {
            assert_eq!(feature.enabled, feature.code != "billing");
        }
    }
}
