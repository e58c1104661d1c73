pub mod create;
pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::users::requests::CreateStaffRequest;
use crate::storage::Storage;

use super::common::storage_from_request;

pub struct StaffService {
    storage: Option<Arc<dyn Storage>>,
}

impl StaffService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => storage_from_request(request),
        }
    }

    pub async fn list_staff(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_staff(self, request).await
    }

    // 创建教职工账号
    pub async fn create_staff(
        &self,
        request: &HttpRequest,
        staff: CreateStaffRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_staff(self, request, staff).await
    }
}
