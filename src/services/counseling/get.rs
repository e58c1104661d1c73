use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::{CounselingService, can_view};
use crate::models::{
    ApiResponse, ErrorCode, auth::entities::CurrentUser, counseling::CounselingRecord,
};
use crate::services::common::{current_user, internal_error, not_found};
use crate::storage::Storage;

/// 读取当前用户可见的咨询记录，不可见时视为不存在
pub(crate) async fn load_visible(
    storage: &Arc<dyn Storage>,
    user: &CurrentUser,
    counseling_id: i64,
) -> Result<CounselingRecord, HttpResponse> {
    match storage.get_counseling(user.academy_id, counseling_id).await {
        Ok(Some(record)) if can_view(user, &record.note) => Ok(record),
        Ok(_) => Err(not_found(
            ErrorCode::CounselingNotFound,
            "Counseling note not found",
        )),
        Err(e) => Err(internal_error("Failed to get counseling note", e)),
    }
}

pub async fn get_counseling(
    service: &CounselingService,
    request: &HttpRequest,
    counseling_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request)?;

    match load_visible(&storage, &user, counseling_id).await {
        Ok(record) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            record,
            "Counseling note retrieved successfully",
        ))),
        Err(resp) => Ok(resp),
    }
}
