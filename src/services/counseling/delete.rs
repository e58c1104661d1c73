use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CounselingService;
use super::get::load_visible;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{current_user, internal_error, not_found};

pub async fn delete_counseling(
    service: &CounselingService,
    request: &HttpRequest,
    counseling_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request)?;

    if let Err(resp) = load_visible(&storage, &user, counseling_id).await {
        return Ok(resp);
    }

    match storage.delete_counseling(user.academy_id, counseling_id).await {
        Ok(true) => {
            tracing::info!("Counseling note {} deleted by user {}", counseling_id, user.id);
            Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
                "Counseling note deleted successfully",
            )))
        }
        Ok(false) => Ok(not_found(
            ErrorCode::CounselingNotFound,
            "Counseling note not found",
        )),
        Err(e) => Ok(internal_error("Counseling note deletion failed", e)),
    }
}
