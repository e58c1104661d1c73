use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StaffService;
use crate::models::{ApiResponse, users::responses::StaffListResponse};
use crate::services::common::{current_user, internal_error};

pub async fn list_staff(service: &StaffService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request)?;

    match storage.list_staff(user.academy_id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            StaffListResponse { items },
            "Staff list retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to retrieve staff list", e)),
    }
}
