pub mod list;
pub mod toggle;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::features::ToggleFeatureRequest;
use crate::storage::Storage;

use super::common::storage_from_request;

pub struct FeatureService {
    storage: Option<Arc<dyn Storage>>,
}

impl FeatureService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => storage_from_request(request),
        }
    }

    // 功能目录与学院开关
    pub async fn list_features(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_features(self, request).await
    }

    pub async fn toggle_feature(
        &self,
        request: &HttpRequest,
        code: String,
        toggle: ToggleFeatureRequest,
    ) -> ActixResult<HttpResponse> {
        toggle::toggle_feature(self, request, code, toggle).await
    }
}
