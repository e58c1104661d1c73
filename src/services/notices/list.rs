use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::NoticeService;
use crate::models::{ApiResponse, notices::responses::NoticeListResponse};
use crate::services::common::{current_user, internal_error};

pub async fn list_notices(
    service: &NoticeService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request)?;

    let result = if user.is_staff() {
        storage.list_notices(user.academy_id).await
    } else {
        storage
            .list_student_notices(user.academy_id, user.id, None)
            .await
    };

    match result {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            NoticeListResponse { items },
            "Notice list retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to retrieve notice list", e)),
    }
}
