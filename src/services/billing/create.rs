use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::BillingService;
use crate::models::{ApiResponse, ErrorCode, billing::requests::CreateBillingRequest};
use crate::services::common::{current_user, internal_error, not_found, validation_error};
use crate::storage::Storage;
use crate::utils::validate::validate_required_text;

pub(crate) fn invalid_amount() -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(
        ErrorCode::InvalidAmount,
        "Amount must be greater than 0",
    ))
}

/// 学生必须属于当前学院
pub(crate) async fn ensure_student(
    storage: &Arc<dyn Storage>,
    academy_id: i64,
    student_id: i64,
) -> Result<(), HttpResponse> {
    match storage.get_student(academy_id, student_id).await {
        Ok(Some(_)) => Ok(()),
        Ok(None) => Err(not_found(ErrorCode::StudentNotFound, "Student not found")),
        Err(e) => Err(internal_error("Failed to get student information", e)),
    }
}

pub async fn create_billing(
    service: &BillingService,
    request: &HttpRequest,
    mut data: CreateBillingRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    if data.amount <= 0 {
        return Ok(invalid_amount());
    }
    if let Err(e) = validate_required_text(&data.title, 200) {
        return Ok(validation_error(format!("title: {e}")));
    }
    if let (Some(billing_date), Some(due_date)) = (data.billing_date, data.due_date)
        && due_date < billing_date
    {
        return Ok(validation_error("due_date must not be before billing_date"));
    }
    data.title = data.title.trim().to_string();

    let storage = service.get_storage(request)?;
    if let Err(resp) = ensure_student(&storage, user.academy_id, data.student_id).await {
        return Ok(resp);
    }

    match storage.create_billing(user.academy_id, data).await {
        Ok(billing) => {
            tracing::info!("Billing {} created by user {}", billing.id, user.id);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                billing,
                "Billing created successfully",
            )))
        }
        Err(e) => Ok(internal_error("Billing creation failed", e)),
    }
}
