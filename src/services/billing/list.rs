use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::BillingService;
use crate::models::{
    ApiResponse,
    billing::requests::{BillingListQuery, BillingQueryParams},
};
use crate::services::common::{current_user, internal_error};

pub async fn list_billings(
    service: &BillingService,
    request: &HttpRequest,
    query: BillingQueryParams,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request)?;

    let (page, size) = query.pagination.normalized();
    let list_query = BillingListQuery {
        academy_id: user.academy_id,
        page,
        size,
        status: query.status,
        student_id: query.student_id,
    };

    match storage.list_billings_with_pagination(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Billing list retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to retrieve billing list", e)),
    }
}
