use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::HomeworkService;
use crate::models::{
    ApiResponse, ErrorCode,
    homeworks::{requests::GradeSubmissionRequest, responses::SubmissionListResponse},
};
use crate::services::common::{current_user, internal_error, not_found, validation_error};
use crate::utils::validate::validate_required_text;

const MAX_FEEDBACK_LEN: usize = 2000;

pub async fn list_submissions(
    service: &HomeworkService,
    request: &HttpRequest,
    homework_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request)?;

    // 先确认作业属于当前学院
    match storage.get_homework(user.academy_id, homework_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Ok(not_found(ErrorCode::HomeworkNotFound, "Homework not found")),
        Err(e) => return Ok(internal_error("Failed to get homework", e)),
    }

    match storage.list_homework_submissions(homework_id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            SubmissionListResponse { homework_id, items },
            "Submissions retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to retrieve submissions", e)),
    }
}

pub async fn grade_submission(
    service: &HomeworkService,
    request: &HttpRequest,
    submission_id: i64,
    mut data: GradeSubmissionRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    if let Err(e) = validate_required_text(&data.grade, 20) {
        return Ok(validation_error(format!("grade: {e}")));
    }
    if data
        .feedback
        .as_ref()
        .is_some_and(|f| f.chars().count() > MAX_FEEDBACK_LEN)
    {
        return Ok(validation_error("feedback is too long"));
    }
    data.grade = data.grade.trim().to_string();

    let storage = service.get_storage(request)?;

    match storage
        .grade_submission(user.academy_id, submission_id, user.id, data)
        .await
    {
        Ok(Some(submission)) => {
            tracing::info!("Submission {} graded by user {}", submission_id, user.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                submission,
                "Submission graded successfully",
            )))
        }
        Ok(None) => Ok(not_found(ErrorCode::SubmissionNotFound, "Submission not found")),
        Err(e) => Ok(internal_error("Grading failed", e)),
    }
}
