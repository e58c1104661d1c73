use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StaffService;
use crate::models::{
    ApiResponse, ErrorCode,
    users::requests::{CreateStaffRequest, CreateUser},
};
use crate::services::common::{current_user, internal_error, validation_error};
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_email, validate_password, validate_required_text};

fn validate_staff(staff: &CreateStaffRequest) -> Result<(), String> {
    validate_email(staff.email.trim())?;
    validate_password(&staff.password)?;
    validate_required_text(&staff.name, 50).map_err(|e| format!("name: {e}"))?;
    if !staff.role.is_staff() {
        return Err("Role must be admin or teacher".to_string());
    }
    Ok(())
}

fn email_conflict() -> HttpResponse {
    HttpResponse::Conflict().json(ApiResponse::error_empty(
        ErrorCode::Conflict,
        "Email is already registered",
    ))
}

pub async fn create_staff(
    service: &StaffService,
    request: &HttpRequest,
    staff: CreateStaffRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    if let Err(msg) = validate_staff(&staff) {
        return Ok(validation_error(msg));
    }

    let storage = service.get_storage(request)?;
    let email = staff.email.trim().to_lowercase();

    match storage.get_user_by_email(&email).await {
        Ok(Some(_)) => return Ok(email_conflict()),
        Ok(None) => {}
        Err(e) => return Ok(internal_error("Failed to create staff account", e)),
    }

    let password_hash = match hash_password(&staff.password) {
        Ok(hash) => hash,
        Err(e) => return Ok(internal_error("Failed to create staff account", e)),
    };

    let create = CreateUser {
        academy_id: user.academy_id,
        email,
        password_hash,
        name: staff.name.trim().to_string(),
        role: staff.role,
    };

    match storage.create_user(create).await {
        Ok(created) => {
            tracing::info!(
                "Staff account {} ({}) created by user {}",
                created.email,
                created.role,
                user.id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                created,
                "Staff account created successfully",
            )))
        }
        // 并发创建同一邮箱时由唯一索引兜底
        Err(e) if e.message().contains("UNIQUE") || e.message().contains("Duplicate") => {
            Ok(email_conflict())
        }
        Err(e) => Ok(internal_error("Failed to create staff account", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::UserRole;

    fn request(email: &str, password: &str, role: UserRole) -> CreateStaffRequest {
        CreateStaffRequest {
            email: email.to_string(),
            password: password.to_string(),
            name: "박선생".to_string(),
            role,
        }
    }

    #[test]
    fn test_validate_staff() {
        assert!(validate_staff(&request("t@academy.test", "Teach3rPass", UserRole::Teacher)).is_ok());
        assert!(validate_staff(&request("bad-email", "Teach3rPass", UserRole::Teacher)).is_err());
        assert!(validate_staff(&request("t@academy.test", "short", UserRole::Admin)).is_err());
        assert!(validate_staff(&request("t@academy.test", "Teach3rPass", UserRole::Student)).is_err());
    }
}
