use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::Datelike;

use super::AttendanceService;
use crate::models::{
    ApiResponse,
    attendance::{
        requests::AttendanceMonthQuery,
        responses::{AttendanceListResponse, AttendanceRecord},
    },
};
use crate::services::common::{current_user, internal_error, validation_error};
use crate::utils::time::{month_range, today};
use crate::utils::validate::parse_month;

pub async fn get_my_attendance(
    service: &AttendanceService,
    request: &HttpRequest,
    query: AttendanceMonthQuery,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    let (year, month) = match query.month.as_deref() {
        Some(month) => match parse_month(month) {
            Ok(parsed) => parsed,
            Err(msg) => return Ok(validation_error(msg)),
        },
        None => {
            let today = today();
            (today.year(), today.month())
        }
    };
    let Some((first, next)) = month_range(year, month) else {
        return Ok(validation_error("Invalid month"));
    };

    let storage = service.get_storage(request)?;

    match storage
        .list_student_attendance(user.academy_id, user.id, first, next)
        .await
    {
        Ok(records) => {
            let items: Vec<AttendanceRecord> = records
                .into_iter()
                .map(|attendance| AttendanceRecord {
                    attendance,
                    student_name: user.name.clone(),
                    student_number: None,
                })
                .collect();
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                AttendanceListResponse { date: None, items },
                "Attendance retrieved successfully",
            )))
        }
        Err(e) => Ok(internal_error("Failed to retrieve attendance", e)),
    }
}
