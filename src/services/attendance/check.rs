use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::Utc;
use std::sync::Arc;

use super::AttendanceService;
use crate::models::{
    ApiResponse, ErrorCode,
    attendance::{
        entities::{AttendanceStatus, CheckMethod, QrCode},
        requests::{QrCheckRequest, UpsertAttendance},
    },
};
use crate::services::common::{current_user, internal_error};
use crate::storage::Storage;
use crate::utils::time::today;

fn invalid_qr() -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(
        ErrorCode::QrCodeInvalid,
        "QR code is invalid or expired",
    ))
}

/// 二维码必须启用、未过期且属于学生所在学院
async fn load_usable_qr(
    storage: &Arc<dyn Storage>,
    academy_id: i64,
    code: &str,
) -> Result<QrCode, HttpResponse> {
    let code = code.trim();
    if code.is_empty() {
        return Err(invalid_qr());
    }
    match storage.get_qr_code_by_code(code).await {
        Ok(Some(qr)) if qr.academy_id == academy_id && qr.is_usable_at(Utc::now()) => Ok(qr),
        Ok(_) => Err(invalid_qr()),
        Err(e) => Err(internal_error("Failed to verify QR code", e)),
    }
}

pub async fn check_in(
    service: &AttendanceService,
    request: &HttpRequest,
    data: QrCheckRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request)?;

    if let Err(resp) = load_usable_qr(&storage, user.academy_id, &data.qr_code).await {
        return Ok(resp);
    }

    let date = today();
    let existing = match storage
        .get_attendance_for_day(user.academy_id, user.id, date)
        .await
    {
        Ok(existing) => existing,
        Err(e) => return Ok(internal_error("Failed to get attendance record", e)),
    };

    // 重复签到保留首次签到时间
    if let Some(attendance) = existing.filter(|a| a.check_in_time.is_some()) {
        return Ok(HttpResponse::Ok().json(ApiResponse::success(
            attendance,
            "Already checked in today",
        )));
    }

    let record = UpsertAttendance {
        academy_id: user.academy_id,
        student_id: user.id,
        date,
        status: AttendanceStatus::Present,
        check_in_time: Some(Utc::now()),
        check_out_time: None,
        check_in_method: Some(CheckMethod::Qr),
        check_out_method: None,
        memo: None,
        marked_by: None,
    };

    match storage.upsert_attendance(record).await {
        Ok(attendance) => {
            tracing::info!("Student {} checked in (academy {})", user.id, user.academy_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                attendance,
                "Checked in successfully",
            )))
        }
        Err(e) => Ok(internal_error("Check-in failed", e)),
    }
}

pub async fn check_out(
    service: &AttendanceService,
    request: &HttpRequest,
    data: QrCheckRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request)?;

    if let Err(resp) = load_usable_qr(&storage, user.academy_id, &data.qr_code).await {
        return Ok(resp);
    }

    let date = today();
    let attendance = match storage
        .get_attendance_for_day(user.academy_id, user.id, date)
        .await
    {
        Ok(Some(attendance)) if attendance.check_in_time.is_some() => attendance,
        Ok(_) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::CheckInRequired,
                "Check-in is required before check-out",
            )));
        }
        Err(e) => return Ok(internal_error("Failed to get attendance record", e)),
    };

    let record = UpsertAttendance {
        academy_id: user.academy_id,
        student_id: user.id,
        date,
        status: attendance.status,
        check_in_time: None,
        check_out_time: Some(Utc::now()),
        check_in_method: None,
        check_out_method: Some(CheckMethod::Qr),
        memo: None,
        marked_by: None,
    };

    match storage.upsert_attendance(record).await {
        Ok(attendance) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            attendance,
            "Checked out successfully",
        ))),
        Err(e) => Ok(internal_error("Check-out failed", e)),
    }
}
