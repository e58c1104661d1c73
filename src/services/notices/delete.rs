use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::NoticeService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{current_user, internal_error, not_found};

pub async fn delete_notice(
    service: &NoticeService,
    request: &HttpRequest,
    notice_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request)?;

    match storage.delete_notice(user.academy_id, notice_id).await {
        Ok(true) => {
            tracing::info!("Notice {} deleted by user {}", notice_id, user.id);
            Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
                "Notice deleted successfully",
            )))
        }
        Ok(false) => Ok(not_found(ErrorCode::NoticeNotFound, "Notice not found")),
        Err(e) => Ok(internal_error("Notice deletion failed", e)),
    }
}
