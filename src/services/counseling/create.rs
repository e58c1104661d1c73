use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CounselingService;
use crate::models::{ApiResponse, ErrorCode, counseling::CreateCounselingRequest};
use crate::services::common::{current_user, internal_error, not_found, validation_error};
use crate::utils::validate::validate_required_text;

pub(crate) const MAX_CONTENT_LEN: usize = 10_000;

/// 咨询时长（分钟）
pub(crate) fn validate_duration(duration: Option<i32>) -> Result<(), &'static str> {
    match duration {
        Some(minutes) if !(1..=600).contains(&minutes) => {
            Err("duration must be between 1 and 600 minutes")
        }
        _ => Ok(()),
    }
}

pub async fn create_counseling(
    service: &CounselingService,
    request: &HttpRequest,
    data: CreateCounselingRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    if let Err(e) = validate_required_text(&data.content, MAX_CONTENT_LEN) {
        return Ok(validation_error(format!("content: {e}")));
    }
    if data.topic.as_ref().is_some_and(|t| t.chars().count() > 200) {
        return Ok(validation_error("topic is too long"));
    }
    if let Err(msg) = validate_duration(data.duration) {
        return Ok(validation_error(msg));
    }

    let storage = service.get_storage(request)?;

    match storage.get_student(user.academy_id, data.student_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Ok(not_found(ErrorCode::StudentNotFound, "Student not found")),
        Err(e) => return Ok(internal_error("Failed to get student information", e)),
    }

    match storage
        .create_counseling(user.academy_id, user.id, data)
        .await
    {
        Ok(note) => Ok(HttpResponse::Created().json(ApiResponse::success(
            note,
            "Counseling note created successfully",
        ))),
        Err(e) => Ok(internal_error("Counseling note creation failed", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_duration() {
        assert!(validate_duration(None).is_ok());
        assert!(validate_duration(Some(50)).is_ok());
        assert!(validate_duration(Some(0)).is_err());
        assert!(validate_duration(Some(601)).is_err());
    }
}
