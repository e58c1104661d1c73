use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::BillingService;
use super::create::{ensure_student, invalid_amount};
use crate::models::{
    ApiResponse, ErrorCode,
    billing::{requests::CreatePaymentRequest, responses::PaymentListResponse},
};
use crate::services::common::{current_user, internal_error, storage_error_response};

const PAYMENT_LIST_LIMIT: u64 = 50;

pub async fn create_payment(
    service: &BillingService,
    request: &HttpRequest,
    data: CreatePaymentRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    if data.amount <= 0 {
        return Ok(invalid_amount());
    }

    let storage = service.get_storage(request)?;
    if let Err(resp) = ensure_student(&storage, user.academy_id, data.student_id).await {
        return Ok(resp);
    }

    match storage.create_payment(user.academy_id, user.id, data).await {
        Ok(payment) => {
            tracing::info!(
                "Payment {} of {} recorded for student {} by user {}",
                payment.id,
                payment.amount,
                payment.student_id,
                user.id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                payment,
                "Payment recorded successfully",
            )))
        }
        Err(e) => Ok(storage_error_response(
            "Failed to record payment",
            &e,
            ErrorCode::BillingNotFound,
        )),
    }
}

pub async fn list_payments(
    service: &BillingService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request)?;

    match storage.list_payments(user.academy_id, PAYMENT_LIST_LIMIT).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            PaymentListResponse { items },
            "Payments retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to retrieve payments", e)),
    }
}
