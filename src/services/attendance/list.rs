use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AttendanceService;
use crate::models::{
    ApiResponse,
    attendance::{requests::AttendanceDateQuery, responses::AttendanceListResponse},
};
use crate::services::common::{current_user, internal_error};
use crate::utils::time::today;

pub async fn list_attendance(
    service: &AttendanceService,
    request: &HttpRequest,
    query: AttendanceDateQuery,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request)?;
    let date = query.date.unwrap_or_else(today);

    match storage.list_attendance_by_date(user.academy_id, date).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            AttendanceListResponse {
                date: Some(date),
                items,
            },
            "Attendance list retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to retrieve attendance list", e)),
    }
}
