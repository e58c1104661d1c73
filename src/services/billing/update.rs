use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::BillingService;
use super::create::invalid_amount;
use crate::models::{ApiResponse, ErrorCode, billing::requests::UpdateBillingRequest};
use crate::services::common::{current_user, internal_error, not_found, validation_error};
use crate::utils::validate::validate_required_text;

pub async fn update_billing(
    service: &BillingService,
    request: &HttpRequest,
    billing_id: i64,
    mut data: UpdateBillingRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    if data.amount.is_some_and(|amount| amount <= 0) {
        return Ok(invalid_amount());
    }
    if data.paid_amount.is_some_and(|paid| paid < 0) {
        return Ok(validation_error("paid_amount must not be negative"));
    }
    if let Some(title) = &data.title {
        if let Err(e) = validate_required_text(title, 200) {
            return Ok(validation_error(format!("title: {e}")));
        }
        data.title = Some(title.trim().to_string());
    }

    let storage = service.get_storage(request)?;

    match storage.update_billing(user.academy_id, billing_id, data).await {
        Ok(Some(billing)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            billing,
            "Billing updated successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::BillingNotFound, "Billing not found")),
        Err(e) => Ok(internal_error("Billing update failed", e)),
    }
}
