use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::Utc;

use super::AttendanceService;
use crate::models::{
    ApiResponse, ErrorCode,
    attendance::{requests::CreateQrCodeRequest, responses::QrCodeListResponse},
};
use crate::services::common::{current_user, internal_error, not_found, validation_error};
use crate::utils::random_code::generate_random_code;

const QR_CODE_LENGTH: usize = 32;
const DEFAULT_CODE_TYPE: &str = "attendance";

pub async fn create_qr_code(
    service: &AttendanceService,
    request: &HttpRequest,
    data: CreateQrCodeRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    if data.expires_at.is_some_and(|t| t <= Utc::now()) {
        return Ok(validation_error("expires_at must be in the future"));
    }
    let code_type = data
        .code_type
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| DEFAULT_CODE_TYPE.to_string());
    if code_type.chars().count() > 20 {
        return Ok(validation_error("type is too long"));
    }

    let storage = service.get_storage(request)?;
    let code = generate_random_code(QR_CODE_LENGTH);

    match storage
        .create_qr_code(
            user.academy_id,
            &code,
            &code_type,
            data.expires_at.map(|t| t.timestamp()),
            user.id,
        )
        .await
    {
        Ok(qr) => Ok(HttpResponse::Created().json(ApiResponse::success(
            qr,
            "QR code created successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to create QR code", e)),
    }
}

pub async fn list_qr_codes(
    service: &AttendanceService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request)?;

    match storage.list_qr_codes(user.academy_id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            QrCodeListResponse { items },
            "QR codes retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to retrieve QR codes", e)),
    }
}

pub async fn deactivate_qr_code(
    service: &AttendanceService,
    request: &HttpRequest,
    qr_code_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request)?;

    match storage.deactivate_qr_code(user.academy_id, qr_code_id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
            "QR code deactivated successfully",
        ))),
        Ok(false) => Ok(not_found(ErrorCode::QrCodeInvalid, "QR code not found")),
        Err(e) => Ok(internal_error("Failed to deactivate QR code", e)),
    }
}
