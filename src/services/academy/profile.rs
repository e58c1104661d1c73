use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AcademyService;
use crate::models::{ApiResponse, ErrorCode, academies::UpdateAcademyRequest};
use crate::services::common::{current_user, internal_error, not_found, validation_error};
use crate::utils::validate::{validate_email, validate_phone, validate_required_text};

pub async fn get_academy(
    service: &AcademyService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request)?;

    match storage.get_academy_by_id(user.academy_id).await {
        Ok(Some(academy)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            academy,
            "Academy retrieved successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::AcademyNotFound, "Academy not found")),
        Err(e) => Ok(internal_error("Failed to retrieve academy", e)),
    }
}

fn validate_update(update: &UpdateAcademyRequest) -> Result<(), String> {
    if let Some(name) = &update.name {
        validate_required_text(name, 100).map_err(|e| format!("name: {e}"))?;
    }
    if let Some(email) = update.contact_email.as_deref().filter(|e| !e.is_empty()) {
        validate_email(email)?;
    }
    if let Some(phone) = update.contact_phone.as_deref().filter(|p| !p.is_empty()) {
        validate_phone(phone)?;
    }
    Ok(())
}

pub async fn update_academy(
    service: &AcademyService,
    request: &HttpRequest,
    update: UpdateAcademyRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    if let Err(msg) = validate_update(&update) {
        return Ok(validation_error(msg));
    }

    let storage = service.get_storage(request)?;
    match storage.update_academy(user.academy_id, update).await {
        Ok(Some(academy)) => {
            tracing::info!("Academy {} updated by user {}", academy.id, user.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                academy,
                "Academy updated successfully",
            )))
        }
        Ok(None) => Ok(not_found(ErrorCode::AcademyNotFound, "Academy not found")),
        Err(e) => Ok(internal_error("Failed to update academy", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_update() {
        assert!(validate_update(&UpdateAcademyRequest::default()).is_ok());

        let update = UpdateAcademyRequest {
            name: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(validate_update(&update).is_err());

        let update = UpdateAcademyRequest {
            contact_email: Some("not-an-email".to_string()),
            ..Default::default()
        };
        assert!(validate_update(&update).is_err());

        let update = UpdateAcademyRequest {
            name: Some("해오름 수학학원".to_string()),
            contact_phone: Some("02-123-4567".to_string()),
            contact_email: Some(String::new()),
            ..Default::default()
        };
        assert!(validate_update(&update).is_ok());
    }
}
