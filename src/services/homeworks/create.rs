use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::HomeworkService;
use crate::models::{ApiResponse, homeworks::requests::CreateHomeworkRequest};
use crate::services::common::{check_class_ids, current_user, internal_error, validation_error};
use crate::utils::validate::validate_required_text;

pub async fn create_homework(
    service: &HomeworkService,
    request: &HttpRequest,
    mut data: CreateHomeworkRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    if let Err(e) = validate_required_text(&data.title, 255) {
        return Ok(validation_error(format!("title: {e}")));
    }
    data.title = data.title.trim().to_string();

    let storage = service.get_storage(request)?;
    if let Err(resp) = check_class_ids(&storage, user.academy_id, &mut data.class_ids).await {
        return Ok(resp);
    }

    match storage.create_homework(user.academy_id, user.id, data).await {
        Ok(homework) => {
            tracing::info!(
                "Homework {} created by user {} with {} targets",
                homework.homework.id,
                user.id,
                homework.target_count
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                homework,
                "Homework created successfully",
            )))
        }
        Err(e) => Ok(internal_error("Homework creation failed", e)),
    }
}
