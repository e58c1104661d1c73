use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::HomeworkService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{current_user, internal_error, not_found};

pub async fn delete_homework(
    service: &HomeworkService,
    request: &HttpRequest,
    homework_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request)?;

    match storage.delete_homework(user.academy_id, homework_id).await {
        Ok(true) => {
            tracing::info!("Homework {} deleted by user {}", homework_id, user.id);
            Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
                "Homework deleted successfully",
            )))
        }
        Ok(false) => Ok(not_found(ErrorCode::HomeworkNotFound, "Homework not found")),
        Err(e) => Ok(internal_error("Homework deletion failed", e)),
    }
}
