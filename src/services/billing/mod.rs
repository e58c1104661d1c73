pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod me;
pub mod payments;
pub mod stats;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::billing::requests::{
    BillingQueryParams, CreateBillingRequest, CreatePaymentRequest, UpdateBillingRequest,
};
use crate::storage::Storage;

use super::common::storage_from_request;

pub struct BillingService {
    storage: Option<Arc<dyn Storage>>,
}

impl BillingService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => storage_from_request(request),
        }
    }

    pub async fn list_billings(
        &self,
        request: &HttpRequest,
        query: BillingQueryParams,
    ) -> ActixResult<HttpResponse> {
        list::list_billings(self, request, query).await
    }

    pub async fn create_billing(
        &self,
        request: &HttpRequest,
        data: CreateBillingRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_billing(self, request, data).await
    }

    pub async fn get_billing(
        &self,
        request: &HttpRequest,
        billing_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::get_billing(self, request, billing_id).await
    }

    pub async fn update_billing(
        &self,
        request: &HttpRequest,
        billing_id: i64,
        data: UpdateBillingRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_billing(self, request, billing_id, data).await
    }

    pub async fn delete_billing(
        &self,
        request: &HttpRequest,
        billing_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_billing(self, request, billing_id).await
    }

    // 登记收款，关联账单时同步已付金额
    pub async fn create_payment(
        &self,
        request: &HttpRequest,
        data: CreatePaymentRequest,
    ) -> ActixResult<HttpResponse> {
        payments::create_payment(self, request, data).await
    }

    pub async fn list_payments(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        payments::list_payments(self, request).await
    }

    // 本月收费统计
    pub async fn get_stats(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        stats::get_stats(self, request).await
    }

    pub async fn get_my_billings(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        me::get_my_billings(self, request).await
    }
}
