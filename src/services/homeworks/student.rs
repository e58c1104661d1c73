use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::HomeworkService;
use crate::models::{
    ApiResponse, ErrorCode,
    homeworks::{
        requests::{SubmissionFileInput, SubmitHomeworkRequest},
        responses::StudentHomeworkListResponse,
    },
};
use crate::services::common::{
    current_user, internal_error, not_found, storage_error_response, validation_error,
};
use crate::utils::extractor::is_safe_file_key;

const MAX_FILES: usize = 10;
const MAX_CONTENT_LEN: usize = 10_000;

/// 提交内容与附件不能同时为空
pub(crate) fn validate_submission(data: &SubmitHomeworkRequest) -> Result<(), String> {
    let has_content = data
        .content
        .as_ref()
        .is_some_and(|c| !c.trim().is_empty());
    if !has_content && data.files.is_empty() {
        return Err("content or files is required".to_string());
    }
    if data
        .content
        .as_ref()
        .is_some_and(|c| c.chars().count() > MAX_CONTENT_LEN)
    {
        return Err("content is too long".to_string());
    }
    if data.files.len() > MAX_FILES {
        return Err(format!("At most {MAX_FILES} files can be attached"));
    }
    data.files.iter().try_for_each(validate_file)
}

fn validate_file(file: &SubmissionFileInput) -> Result<(), String> {
    if !is_safe_file_key(&file.file_key) || !file.file_key.starts_with("homework/") {
        return Err(format!("Invalid file key: {}", file.file_key));
    }
    if file.file_name.trim().is_empty() || file.file_url.trim().is_empty() {
        return Err("file_name and file_url are required".to_string());
    }
    if file.file_size.is_some_and(|size| size < 0) {
        return Err("file_size must not be negative".to_string());
    }
    Ok(())
}

pub async fn list_my_homeworks(
    service: &HomeworkService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request)?;

    match storage
        .list_student_homeworks(user.academy_id, user.id)
        .await
    {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            StudentHomeworkListResponse { items },
            "Homework retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to retrieve homework", e)),
    }
}

pub async fn submit_homework(
    service: &HomeworkService,
    request: &HttpRequest,
    homework_id: i64,
    data: SubmitHomeworkRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    if let Err(msg) = validate_submission(&data) {
        return Ok(validation_error(msg));
    }

    let storage = service.get_storage(request)?;

    match storage.get_homework(user.academy_id, homework_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Ok(not_found(ErrorCode::HomeworkNotFound, "Homework not found")),
        Err(e) => return Ok(internal_error("Failed to get homework", e)),
    }

    match storage.is_homework_target(homework_id, user.id).await {
        Ok(true) => {}
        Ok(false) => {
            return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                ErrorCode::NotHomeworkTarget,
                "This homework is not assigned to you",
            )));
        }
        Err(e) => return Ok(internal_error("Failed to verify homework target", e)),
    }

    match storage.submit_homework(homework_id, user.id, data).await {
        Ok(submission) => {
            tracing::info!(
                "Student {} submitted homework {} ({} files)",
                user.id,
                homework_id,
                submission.files.len()
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                submission,
                "Homework submitted successfully",
            )))
        }
        Err(e) => Ok(storage_error_response(
            "Homework submission failed",
            &e,
            ErrorCode::HomeworkNotFound,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(key: &str) -> SubmissionFileInput {
        SubmissionFileInput {
            file_key: key.to_string(),
            file_name: "answer.pdf".to_string(),
            file_url: format!("/uploads/{key}"),
            file_size: Some(1024),
            mime_type: Some("application/pdf".to_string()),
        }
    }

    #[test]
    fn test_submission_requires_content_or_files() {
        let empty = SubmitHomeworkRequest {
            content: Some("   ".to_string()),
            files: Vec::new(),
        };
        assert!(validate_submission(&empty).is_err());

        let text_only = SubmitHomeworkRequest {
            content: Some("풀이".to_string()),
            files: Vec::new(),
        };
        assert!(validate_submission(&text_only).is_ok());

        let files_only = SubmitHomeworkRequest {
            content: None,
            files: vec![file("homework/abc.pdf")],
        };
        assert!(validate_submission(&files_only).is_ok());
    }

    #[test]
    fn test_submission_rejects_foreign_file_keys() {
        for key in ["notices/abc.pdf", "homework/../etc", "abc.pdf"] {
            let data = SubmitHomeworkRequest {
                content: None,
                files: vec![file(key)],
            };
            assert!(validate_submission(&data).is_err(), "{key}");
        }
    }
}
