pub mod profile;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::academies::UpdateAcademyRequest;
use crate::storage::Storage;

use super::common::storage_from_request;

pub struct AcademyService {
    storage: Option<Arc<dyn Storage>>,
}

impl AcademyService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => storage_from_request(request),
        }
    }

    // 当前学院信息
    pub async fn get_academy(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        profile::get_academy(self, request).await
    }

    pub async fn update_academy(
        &self,
        request: &HttpRequest,
        update: UpdateAcademyRequest,
    ) -> ActixResult<HttpResponse> {
        profile::update_academy(self, request, update).await
    }
}
