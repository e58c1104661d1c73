use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{StudentService, create::validate_contact};
use crate::models::{ApiResponse, ErrorCode, students::requests::UpdateStudentRequest};
use crate::models::users::entities::UserRole;
use crate::services::common::{
    current_user, forget_principal, internal_error, not_found, validation_error,
};
use crate::utils::validate::validate_required_text;

pub async fn update_student(
    service: &StudentService,
    request: &HttpRequest,
    id: i64,
    mut update: UpdateStudentRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    if let Some(name) = &update.name {
        if let Err(e) = validate_required_text(name, 50) {
            return Ok(validation_error(format!("name: {e}")));
        }
        update.name = Some(name.trim().to_string());
    }
    if let Err(msg) = validate_contact(
        update.phone.as_deref(),
        update.parent_phone.as_deref(),
        update.email.as_deref(),
    ) {
        return Ok(validation_error(msg));
    }

    let storage = service.get_storage(request)?;
    match storage.update_student(user.academy_id, id, update).await {
        Ok(Some(student)) => {
            // 状态可能变化
            forget_principal(request, UserRole::Student, student.id).await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                student,
                "Student updated successfully",
            )))
        }
        Ok(None) => Ok(not_found(ErrorCode::StudentNotFound, "Student not found")),
        Err(e) => Ok(internal_error("Failed to update student", e)),
    }
}

pub async fn deactivate_student(
    service: &StudentService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request)?;

    match storage.deactivate_student(user.academy_id, id).await {
        Ok(true) => {
            forget_principal(request, UserRole::Student, id).await;
            tracing::info!("Student {} deactivated by user {}", id, user.id);
            Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
                "Student deactivated successfully",
            )))
        }
        Ok(false) => Ok(not_found(ErrorCode::StudentNotFound, "Student not found")),
        Err(e) => Ok(internal_error("Failed to deactivate student", e)),
    }
}
