pub mod check;
pub mod list;
pub mod me;
pub mod qr_codes;
pub mod record;
pub mod stats;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::attendance::requests::{
    AttendanceDateQuery, AttendanceMonthQuery, CreateAttendanceRequest, CreateQrCodeRequest,
    QrCheckRequest, UpdateAttendanceRequest,
};
use crate::storage::Storage;

use super::common::storage_from_request;

pub struct AttendanceService {
    storage: Option<Arc<dyn Storage>>,
}

impl AttendanceService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => storage_from_request(request),
        }
    }

    // 某天的出勤记录，默认今天
    pub async fn list_attendance(
        &self,
        request: &HttpRequest,
        query: AttendanceDateQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_attendance(self, request, query).await
    }

    pub async fn create_attendance(
        &self,
        request: &HttpRequest,
        data: CreateAttendanceRequest,
    ) -> ActixResult<HttpResponse> {
        record::create_attendance(self, request, data).await
    }

    pub async fn update_attendance(
        &self,
        request: &HttpRequest,
        attendance_id: i64,
        data: UpdateAttendanceRequest,
    ) -> ActixResult<HttpResponse> {
        record::update_attendance(self, request, attendance_id, data).await
    }

    pub async fn get_stats(
        &self,
        request: &HttpRequest,
        query: AttendanceDateQuery,
    ) -> ActixResult<HttpResponse> {
        stats::get_stats(self, request, query).await
    }

    // 学生本人的月度出勤
    pub async fn get_my_attendance(
        &self,
        request: &HttpRequest,
        query: AttendanceMonthQuery,
    ) -> ActixResult<HttpResponse> {
        me::get_my_attendance(self, request, query).await
    }

    pub async fn check_in(
        &self,
        request: &HttpRequest,
        data: QrCheckRequest,
    ) -> ActixResult<HttpResponse> {
        check::check_in(self, request, data).await
    }

    pub async fn check_out(
        &self,
        request: &HttpRequest,
        data: QrCheckRequest,
    ) -> ActixResult<HttpResponse> {
        check::check_out(self, request, data).await
    }

    pub async fn create_qr_code(
        &self,
        request: &HttpRequest,
        data: CreateQrCodeRequest,
    ) -> ActixResult<HttpResponse> {
        qr_codes::create_qr_code(self, request, data).await
    }

    pub async fn list_qr_codes(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        qr_codes::list_qr_codes(self, request).await
    }

    pub async fn deactivate_qr_code(
        &self,
        request: &HttpRequest,
        qr_code_id: i64,
    ) -> ActixResult<HttpResponse> {
        qr_codes::deactivate_qr_code(self, request, qr_code_id).await
    }
}
