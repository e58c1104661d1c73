use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::HomeworkService;
use crate::models::{ApiResponse, ErrorCode, homeworks::requests::UpdateHomeworkRequest};
use crate::services::common::{current_user, internal_error, not_found, validation_error};
use crate::utils::validate::validate_required_text;

pub async fn update_homework(
    service: &HomeworkService,
    request: &HttpRequest,
    homework_id: i64,
    mut data: UpdateHomeworkRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    if let Some(title) = &data.title {
        if let Err(e) = validate_required_text(title, 255) {
            return Ok(validation_error(format!("title: {e}")));
        }
        data.title = Some(title.trim().to_string());
    }

    let storage = service.get_storage(request)?;

    match storage
        .update_homework(user.academy_id, homework_id, data)
        .await
    {
        Ok(Some(homework)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            homework,
            "Homework updated successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::HomeworkNotFound, "Homework not found")),
        Err(e) => Ok(internal_error("Homework update failed", e)),
    }
}
