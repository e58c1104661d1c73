use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ClassService;
use crate::models::{ApiResponse, ErrorCode, classes::responses::ClassDetailResponse};
use crate::services::common::{current_user, internal_error, not_found};

pub async fn get_class(
    service: &ClassService,
    request: &HttpRequest,
    class_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request)?;

    let class = match storage.get_class(user.academy_id, class_id).await {
        Ok(Some(class)) => class,
        Ok(None) => return Ok(not_found(ErrorCode::ClassNotFound, "Class not found")),
        Err(e) => return Ok(internal_error("Failed to get class information", e)),
    };

    match storage.list_class_members(class.id).await {
        Ok(students) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ClassDetailResponse { class, students },
            "Class information retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to get class members", e)),
    }
}
