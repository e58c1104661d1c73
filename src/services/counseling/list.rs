use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CounselingService;
use crate::models::{
    ApiResponse,
    counseling::{CounselingListQuery, CounselingQueryParams},
};
use crate::services::common::{current_user, internal_error};

pub async fn list_counseling(
    service: &CounselingService,
    request: &HttpRequest,
    query: CounselingQueryParams,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request)?;

    let (page, size) = query.pagination.normalized();
    let list_query = CounselingListQuery {
        academy_id: user.academy_id,
        page,
        size,
        student_id: query.student_id,
        viewer_id: (!user.is_admin()).then_some(user.id),
    };

    match storage.list_counseling_with_pagination(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Counseling notes retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to retrieve counseling notes", e)),
    }
}
