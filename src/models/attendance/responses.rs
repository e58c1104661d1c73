use serde::Serialize;
use ts_rs::TS;

use super::entities::{Attendance, QrCode};

// 带学生信息的出勤记录
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct AttendanceRecord {
    #[serde(flatten)]
    #[ts(flatten)]
    pub attendance: Attendance,
    pub student_name: String,
    pub student_number: Option<String>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct AttendanceListResponse {
    pub date: Option<chrono::NaiveDate>,
    pub items: Vec<AttendanceRecord>,
}

// 出勤统计
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct AttendanceStats {
    pub date: chrono::NaiveDate,
    pub total: i64,
    pub present: i64,
    pub late: i64,
    pub absent: i64,
    pub excused: i64,
    /// (present + late) / total * 100，保留一位小数
    pub attendance_rate: f64,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct QrCodeListResponse {
    pub items: Vec<QrCode>,
}
