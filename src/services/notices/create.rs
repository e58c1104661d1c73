use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::NoticeService;
use crate::models::{
    ApiResponse,
    notices::requests::{CreateNoticeRequest, NoticeAttachmentInput},
};
use crate::services::common::{check_class_ids, current_user, internal_error, validation_error};
use crate::utils::extractor::is_safe_file_key;
use crate::utils::validate::validate_required_text;

const MAX_ATTACHMENTS: usize = 10;
const MAX_BODY_LEN: usize = 20_000;

pub(crate) fn validate_title(title: &str) -> Result<(), String> {
    validate_required_text(title, 255).map_err(|e| format!("title: {e}"))
}

pub(crate) fn validate_body(body: &str) -> Result<(), String> {
    validate_required_text(body, MAX_BODY_LEN).map_err(|e| format!("body: {e}"))
}

fn validate_attachments(attachments: &[NoticeAttachmentInput]) -> Result<(), String> {
    if attachments.len() > MAX_ATTACHMENTS {
        return Err(format!("At most {MAX_ATTACHMENTS} attachments are allowed"));
    }
    for attachment in attachments {
        if !is_safe_file_key(&attachment.file_key) {
            return Err(format!("Invalid file key: {}", attachment.file_key));
        }
        if attachment.file_name.trim().is_empty() || attachment.file_url.trim().is_empty() {
            return Err("file_name and file_url are required".to_string());
        }
    }
    Ok(())
}

pub async fn create_notice(
    service: &NoticeService,
    request: &HttpRequest,
    mut data: CreateNoticeRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    if let Err(msg) = validate_title(&data.title)
        .and_then(|_| validate_body(&data.body))
        .and_then(|_| validate_attachments(&data.attachments))
    {
        return Ok(validation_error(msg));
    }
    data.title = data.title.trim().to_string();

    let storage = service.get_storage(request)?;
    if let Err(resp) = check_class_ids(&storage, user.academy_id, &mut data.class_ids).await {
        return Ok(resp);
    }

    match storage.create_notice(user.academy_id, user.id, data).await {
        Ok(notice) => {
            tracing::info!("Notice {} created by user {}", notice.notice.id, user.id);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                notice,
                "Notice created successfully",
            )))
        }
        Err(e) => Ok(internal_error("Notice creation failed", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_and_body_rules() {
        assert!(validate_title("휴원 안내").is_ok());
        assert!(validate_title("   ").is_err());
        assert!(validate_title(&"가".repeat(256)).is_err());
        assert!(validate_title(&"가".repeat(255)).is_ok());
        assert!(validate_body("").is_err());
    }

    #[test]
    fn test_attachment_keys_are_checked() {
        let attachment = |key: &str| NoticeAttachmentInput {
            file_key: key.to_string(),
            file_name: "안내문.pdf".to_string(),
            file_url: format!("/uploads/{key}"),
            file_size: None,
            mime_type: None,
        };
        assert!(validate_attachments(&[attachment("homework/a.pdf")]).is_ok());
        assert!(validate_attachments(&[attachment("../secret")]).is_err());
    }
}
