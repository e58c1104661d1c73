use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ClassService;
use super::create::{check_teacher, validate_period};
use crate::models::{ApiResponse, ErrorCode, classes::requests::UpdateClassRequest};
use crate::services::common::{current_user, internal_error, not_found, validation_error};
use crate::utils::validate::validate_required_text;

pub async fn update_class(
    service: &ClassService,
    request: &HttpRequest,
    class_id: i64,
    mut update_data: UpdateClassRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    if let Some(name) = &update_data.name {
        if let Err(e) = validate_required_text(name, 100) {
            return Ok(validation_error(format!("name: {e}")));
        }
        update_data.name = Some(name.trim().to_string());
    }

    let storage = service.get_storage(request)?;

    // 查询班级信息，合并后校验起止日期
    let class = match storage.get_class(user.academy_id, class_id).await {
        Ok(Some(class)) => class,
        Ok(None) => return Ok(not_found(ErrorCode::ClassNotFound, "Class not found")),
        Err(e) => return Ok(internal_error("Failed to get class information", e)),
    };
    if let Err(msg) = validate_period(
        update_data.start_date.or(class.start_date),
        update_data.end_date.or(class.end_date),
    ) {
        return Ok(validation_error(msg));
    }
    if let Err(resp) = check_teacher(&storage, user.academy_id, update_data.teacher_id).await {
        return Ok(resp);
    }

    match storage.update_class(user.academy_id, class_id, update_data).await {
        Ok(Some(class)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            class,
            "Class information updated successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::ClassNotFound, "Class not found")),
        Err(e) => Ok(internal_error("Class update failed", e)),
    }
}
