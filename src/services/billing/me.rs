use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::BillingService;
use crate::models::{ApiResponse, billing::responses::StudentBillingResponse};
use crate::services::common::{current_user, internal_error};

pub async fn get_my_billings(
    service: &BillingService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request)?;

    match storage.list_student_billings(user.academy_id, user.id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            StudentBillingResponse { items },
            "Billing records retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to retrieve billing records", e)),
    }
}
