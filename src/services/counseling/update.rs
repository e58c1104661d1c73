use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CounselingService;
use super::create::{MAX_CONTENT_LEN, validate_duration};
use super::get::load_visible;
use crate::models::{ApiResponse, ErrorCode, counseling::UpdateCounselingRequest};
use crate::services::common::{current_user, internal_error, not_found, validation_error};
use crate::utils::validate::validate_required_text;

pub async fn update_counseling(
    service: &CounselingService,
    request: &HttpRequest,
    counseling_id: i64,
    data: UpdateCounselingRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    if let Some(content) = &data.content
        && let Err(e) = validate_required_text(content, MAX_CONTENT_LEN)
    {
        return Ok(validation_error(format!("content: {e}")));
    }
    if let Err(msg) = validate_duration(data.duration) {
        return Ok(validation_error(msg));
    }

    let storage = service.get_storage(request)?;
    if let Err(resp) = load_visible(&storage, &user, counseling_id).await {
        return Ok(resp);
    }

    match storage
        .update_counseling(user.academy_id, counseling_id, data)
        .await
    {
        Ok(Some(note)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            note,
            "Counseling note updated successfully",
        ))),
        Ok(None) => Ok(not_found(
            ErrorCode::CounselingNotFound,
            "Counseling note not found",
        )),
        Err(e) => Ok(internal_error("Counseling note update failed", e)),
    }
}
