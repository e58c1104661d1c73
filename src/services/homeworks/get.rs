use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::HomeworkService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{current_user, internal_error, not_found};

pub async fn get_homework(
    service: &HomeworkService,
    request: &HttpRequest,
    homework_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request)?;

    match storage.get_homework(user.academy_id, homework_id).await {
        Ok(Some(homework)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            homework,
            "Homework retrieved successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::HomeworkNotFound, "Homework not found")),
        Err(e) => Ok(internal_error("Failed to get homework", e)),
    }
}
