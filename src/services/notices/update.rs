use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::NoticeService;
use super::create::{validate_body, validate_title};
use crate::models::{ApiResponse, ErrorCode, notices::requests::UpdateNoticeRequest};
use crate::services::common::{
    check_class_ids, current_user, internal_error, not_found, validation_error,
};

pub async fn update_notice(
    service: &NoticeService,
    request: &HttpRequest,
    notice_id: i64,
    mut data: UpdateNoticeRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    if let Some(title) = &data.title {
        if let Err(msg) = validate_title(title) {
            return Ok(validation_error(msg));
        }
        data.title = Some(title.trim().to_string());
    }
    if let Some(body) = &data.body
        && let Err(msg) = validate_body(body)
    {
        return Ok(validation_error(msg));
    }

    let storage = service.get_storage(request)?;
    if let Some(class_ids) = data.class_ids.as_mut()
        && let Err(resp) = check_class_ids(&storage, user.academy_id, class_ids).await
    {
        return Ok(resp);
    }

    match storage.update_notice(user.academy_id, notice_id, data).await {
        Ok(Some(notice)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            notice,
            "Notice updated successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::NoticeNotFound, "Notice not found")),
        Err(e) => Ok(internal_error("Notice update failed", e)),
    }
}
