use serde::Deserialize;
use ts_rs::TS;

use super::entities::AttendanceStatus;

// 按日期查询
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct AttendanceDateQuery {
    pub date: Option<chrono::NaiveDate>,
}

// 按月份查询（YYYY-MM）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct AttendanceMonthQuery {
    pub month: Option<String>,
}

// 手动登记出勤
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct CreateAttendanceRequest {
    pub student_id: i64,
    pub status: AttendanceStatus,
    pub date: Option<chrono::NaiveDate>,
    pub check_in_time: Option<chrono::DateTime<chrono::Utc>>,
    pub check_out_time: Option<chrono::DateTime<chrono::Utc>>,
    pub memo: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct UpdateAttendanceRequest {
    pub status: Option<AttendanceStatus>,
    pub check_in_time: Option<chrono::DateTime<chrono::Utc>>,
    pub check_out_time: Option<chrono::DateTime<chrono::Utc>>,
    pub memo: Option<String>,
}

// 扫码签到 / 签退
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct QrCheckRequest {
    pub qr_code: String,
}

// 生成二维码
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct CreateQrCodeRequest {
    #[serde(default, rename = "type")]
    #[ts(rename = "type")]
    pub code_type: Option<String>,
    pub expires_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// 写入出勤记录（存储层）
#[derive(Debug, Clone)]
pub struct UpsertAttendance {
    pub academy_id: i64,
    pub student_id: i64,
    pub date: chrono::NaiveDate,
    pub status: AttendanceStatus,
    pub check_in_time: Option<chrono::DateTime<chrono::Utc>>,
    pub check_out_time: Option<chrono::DateTime<chrono::Utc>>,
    pub check_in_method: Option<super::entities::CheckMethod>,
    pub check_out_method: Option<super::entities::CheckMethod>,
    pub memo: Option<String>,
    pub marked_by: Option<i64>,
}
