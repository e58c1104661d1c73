use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{StudentService, invite::create_invite};
use crate::models::{
    ApiResponse,
    students::{requests::CreateStudentRequest, responses::StudentCreatedResponse},
};
use crate::services::common::{current_user, internal_error, validation_error};
use crate::utils::validate::{validate_email, validate_phone, validate_required_text};

/// 校验可选的联系方式，空字符串视为未填写
pub(crate) fn validate_contact(
    phone: Option<&str>,
    parent_phone: Option<&str>,
    email: Option<&str>,
) -> Result<(), String> {
    if let Some(phone) = phone.filter(|p| !p.is_empty()) {
        validate_phone(phone).map_err(|e| format!("phone: {e}"))?;
    }
    if let Some(phone) = parent_phone.filter(|p| !p.is_empty()) {
        validate_phone(phone).map_err(|e| format!("parent_phone: {e}"))?;
    }
    if let Some(email) = email.filter(|e| !e.is_empty()) {
        validate_email(email)?;
    }
    Ok(())
}

pub async fn create_student(
    service: &StudentService,
    request: &HttpRequest,
    mut student: CreateStudentRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    if let Err(e) = validate_required_text(&student.name, 50) {
        return Ok(validation_error(format!("name: {e}")));
    }
    if let Err(msg) = validate_contact(
        student.phone.as_deref(),
        student.parent_phone.as_deref(),
        student.email.as_deref(),
    ) {
        return Ok(validation_error(msg));
    }
    student.name = student.name.trim().to_string();

    let storage = service.get_storage(request)?;

    let created = match storage.create_student(user.academy_id, student).await {
        Ok(created) => created,
        Err(e) => return Ok(internal_error("Failed to create student", e)),
    };

    let invite = match create_invite(&storage, &created).await {
        Ok(invite) => invite,
        Err(e) => return Ok(internal_error("Student created but invite generation failed", e)),
    };

    tracing::info!(
        "Student {} created in academy {} by user {}",
        created.id,
        user.academy_id,
        user.id
    );

    Ok(HttpResponse::Created().json(ApiResponse::success(
        StudentCreatedResponse {
            student: created,
            invite,
        },
        "Student created successfully",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_contact() {
        assert!(validate_contact(None, None, None).is_ok());
        assert!(validate_contact(Some("010-1234-5678"), Some(""), Some("")).is_ok());
        assert!(validate_contact(Some("abc"), None, None).is_err());
        let err = validate_contact(None, Some("12"), None).unwrap_err();
        assert!(err.starts_with("parent_phone"));
        assert!(validate_contact(None, None, Some("nope")).is_err());
    }
}
