use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::NoticeService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{current_user, internal_error, not_found};

pub async fn publish_notice(
    service: &NoticeService,
    request: &HttpRequest,
    notice_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request)?;

    match storage.publish_notice(user.academy_id, notice_id).await {
        Ok(Some(notice)) => {
            tracing::info!("Notice {} published by user {}", notice_id, user.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                notice,
                "Notice published successfully",
            )))
        }
        Ok(None) => Ok(not_found(ErrorCode::NoticeNotFound, "Notice not found")),
        Err(e) => Ok(internal_error("Failed to publish notice", e)),
    }
}
