use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AttendanceService;
use crate::models::{
    ApiResponse, ErrorCode,
    attendance::{
        entities::CheckMethod,
        requests::{CreateAttendanceRequest, UpdateAttendanceRequest, UpsertAttendance},
    },
};
use crate::services::common::{current_user, internal_error, not_found, validation_error};
use crate::utils::time::today;

const MAX_MEMO_LEN: usize = 500;

fn validate_times(
    check_in: Option<chrono::DateTime<chrono::Utc>>,
    check_out: Option<chrono::DateTime<chrono::Utc>>,
) -> Result<(), &'static str> {
    match (check_in, check_out) {
        (Some(check_in), Some(check_out)) if check_out < check_in => {
            Err("check_out_time must not be before check_in_time")
        }
        _ => Ok(()),
    }
}

pub async fn create_attendance(
    service: &AttendanceService,
    request: &HttpRequest,
    data: CreateAttendanceRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    if data.memo.as_ref().is_some_and(|m| m.chars().count() > MAX_MEMO_LEN) {
        return Ok(validation_error("memo is too long"));
    }
    if let Err(msg) = validate_times(data.check_in_time, data.check_out_time) {
        return Ok(validation_error(msg));
    }

    let storage = service.get_storage(request)?;

    match storage.get_student(user.academy_id, data.student_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Ok(not_found(ErrorCode::StudentNotFound, "Student not found")),
        Err(e) => return Ok(internal_error("Failed to get student information", e)),
    }

    let record = UpsertAttendance {
        academy_id: user.academy_id,
        student_id: data.student_id,
        date: data.date.unwrap_or_else(today),
        status: data.status,
        check_in_method: data.check_in_time.map(|_| CheckMethod::Manual),
        check_out_method: data.check_out_time.map(|_| CheckMethod::Manual),
        check_in_time: data.check_in_time,
        check_out_time: data.check_out_time,
        memo: data.memo,
        marked_by: Some(user.id),
    };

    match storage.upsert_attendance(record).await {
        Ok(attendance) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            attendance,
            "Attendance recorded successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to record attendance", e)),
    }
}

pub async fn update_attendance(
    service: &AttendanceService,
    request: &HttpRequest,
    attendance_id: i64,
    data: UpdateAttendanceRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    if data.memo.as_ref().is_some_and(|m| m.chars().count() > MAX_MEMO_LEN) {
        return Ok(validation_error("memo is too long"));
    }

    let storage = service.get_storage(request)?;

    let existing = match storage.get_attendance(user.academy_id, attendance_id).await {
        Ok(Some(attendance)) => attendance,
        Ok(None) => {
            return Ok(not_found(
                ErrorCode::AttendanceNotFound,
                "Attendance record not found",
            ));
        }
        Err(e) => return Ok(internal_error("Failed to get attendance record", e)),
    };
    if let Err(msg) = validate_times(
        data.check_in_time.or(existing.check_in_time),
        data.check_out_time.or(existing.check_out_time),
    ) {
        return Ok(validation_error(msg));
    }

    match storage
        .update_attendance(user.academy_id, attendance_id, data)
        .await
    {
        Ok(Some(attendance)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            attendance,
            "Attendance updated successfully",
        ))),
        Ok(None) => Ok(not_found(
            ErrorCode::AttendanceNotFound,
            "Attendance record not found",
        )),
        Err(e) => Ok(internal_error("Failed to update attendance", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    #[test]
    fn test_validate_times() {
        let now = Utc::now();
        assert!(validate_times(Some(now), Some(now + Duration::hours(2))).is_ok());
        assert!(validate_times(Some(now), None).is_ok());
        assert!(validate_times(Some(now), Some(now - Duration::minutes(1))).is_err());
    }
}
