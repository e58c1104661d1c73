use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::HomeworkService;
use crate::models::{ApiResponse, homeworks::responses::HomeworkListResponse};
use crate::services::common::{current_user, internal_error};

pub async fn list_homeworks(
    service: &HomeworkService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request)?;

    match storage.list_homeworks(user.academy_id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            HomeworkListResponse { items },
            "Homework list retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to retrieve homework list", e)),
    }
}
