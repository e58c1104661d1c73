use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::string_enum;

string_enum! {
    /// 出勤状态
    pub enum AttendanceStatus("出勤状态", "../frontend/src/types/generated/attendance.ts") {
        Present => "present",
        Late => "late",
        Absent => "absent",
        Excused => "excused",
    }
}

string_enum! {
    /// 签到方式
    pub enum CheckMethod("签到方式", "../frontend/src/types/generated/attendance.ts") {
        Qr => "qr",
        Manual => "manual",
    }
}

// 出勤记录
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct Attendance {
    pub id: i64,
    pub academy_id: i64,
    pub student_id: i64,
    pub date: chrono::NaiveDate,
    pub check_in_time: Option<chrono::DateTime<chrono::Utc>>,
    pub check_out_time: Option<chrono::DateTime<chrono::Utc>>,
    pub status: AttendanceStatus,
    pub check_in_method: Option<CheckMethod>,
    pub check_out_method: Option<CheckMethod>,
    pub memo: Option<String>,
    pub marked_by: Option<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 签到二维码
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct QrCode {
    pub id: i64,
    pub academy_id: i64,
    pub code: String,
    pub code_type: String,
    pub is_active: bool,
    pub expires_at: Option<chrono::DateTime<chrono::Utc>>,
    pub created_by: Option<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl QrCode {
    /// 启用且未过期
    pub fn is_usable_at(&self, now: chrono::DateTime<chrono::Utc>) -> bool {
        self.is_active && self.expires_at.is_none_or(|expires_at| expires_at > now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    #[test]
    fn test_qr_code_usable() {
        let now = Utc::now();
        let mut qr = QrCode {
            id: 1,
            academy_id: 1,
            code: "abc".to_string(),
            code_type: "attendance".to_string(),
            is_active: true,
            expires_at: None,
            created_by: None,
            created_at: now,
        };
        assert!(qr.is_usable_at(now));

        qr.expires_at = Some(now - Duration::minutes(1));
        assert!(!qr.is_usable_at(now));

        qr.expires_at = Some(now + Duration::minutes(1));
        qr.is_active = false;
        assert!(!qr.is_usable_at(now));
    }

    #[test]
    fn test_status_parse() {
        assert_eq!("late".parse::<AttendanceStatus>().unwrap(), AttendanceStatus::Late);
        assert!("sick".parse::<AttendanceStatus>().is_err());
    }
}
