use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::BillingService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{current_user, internal_error, not_found};

pub async fn get_billing(
    service: &BillingService,
    request: &HttpRequest,
    billing_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request)?;

    match storage.get_billing(user.academy_id, billing_id).await {
        Ok(Some(billing)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            billing,
            "Billing retrieved successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::BillingNotFound, "Billing not found")),
        Err(e) => Ok(internal_error("Failed to get billing", e)),
    }
}
