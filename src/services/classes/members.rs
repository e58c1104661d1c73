use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ClassService;
use crate::models::{ApiResponse, ErrorCode, classes::responses::AddClassStudentsResponse};
use crate::services::common::{
    current_user, internal_error, not_found, storage_error_response, validation_error,
};

const MAX_BATCH: usize = 200;

pub async fn add_students(
    service: &ClassService,
    request: &HttpRequest,
    class_id: i64,
    mut student_ids: Vec<i64>,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    student_ids.sort_unstable();
    student_ids.dedup();
    if student_ids.is_empty() {
        return Ok(validation_error("student_ids must not be empty"));
    }
    if student_ids.len() > MAX_BATCH {
        return Ok(validation_error(format!(
            "At most {MAX_BATCH} students can be added at once"
        )));
    }

    let storage = service.get_storage(request)?;

    match storage.get_class(user.academy_id, class_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Ok(not_found(ErrorCode::ClassNotFound, "Class not found")),
        Err(e) => return Ok(internal_error("Failed to get class information", e)),
    }

    match storage
        .add_class_students(user.academy_id, class_id, &student_ids)
        .await
    {
        Ok(added) => {
            tracing::info!(
                "{} students added to class {} by user {}",
                added.len(),
                class_id,
                user.id
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                AddClassStudentsResponse { added },
                "Students added to class successfully",
            )))
        }
        Err(e) => Ok(storage_error_response(
            "Failed to add students",
            &e,
            ErrorCode::StudentNotFound,
        )),
    }
}

pub async fn remove_student(
    service: &ClassService,
    request: &HttpRequest,
    class_id: i64,
    student_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request)?;

    match storage.get_class(user.academy_id, class_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Ok(not_found(ErrorCode::ClassNotFound, "Class not found")),
        Err(e) => return Ok(internal_error("Failed to get class information", e)),
    }

    match storage.remove_class_student(class_id, student_id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
            "Student removed from class successfully",
        ))),
        Ok(false) => Ok(not_found(
            ErrorCode::ClassMemberNotFound,
            "Student is not a member of this class",
        )),
        Err(e) => Ok(internal_error("Failed to remove student", e)),
    }
}
