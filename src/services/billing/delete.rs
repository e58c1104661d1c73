use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::BillingService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{current_user, internal_error, not_found};

pub async fn delete_billing(
    service: &BillingService,
    request: &HttpRequest,
    billing_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request)?;

    match storage.delete_billing(user.academy_id, billing_id).await {
        Ok(true) => {
            tracing::info!("Billing {} deleted by user {}", billing_id, user.id);
            Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
                "Billing deleted successfully",
            )))
        }
        Ok(false) => Ok(not_found(ErrorCode::BillingNotFound, "Billing not found")),
        Err(e) => Ok(internal_error("Billing deletion failed", e)),
    }
}
