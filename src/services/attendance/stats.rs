use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::NaiveDate;

use super::AttendanceService;
use crate::models::{
    ApiResponse,
    attendance::{
        entities::AttendanceStatus,
        requests::AttendanceDateQuery,
        responses::{AttendanceRecord, AttendanceStats},
    },
};
use crate::services::common::{current_user, internal_error};
use crate::utils::time::today;

/// 按状态汇总，出勤率 = (出勤 + 迟到) / 总数，保留一位小数
pub(crate) fn summarize(date: NaiveDate, records: &[AttendanceRecord]) -> AttendanceStats {
    let count = |status: AttendanceStatus| {
        records
            .iter()
            .filter(|r| r.attendance.status == status)
            .count() as i64
    };
    let total = records.len() as i64;
    let present = count(AttendanceStatus::Present);
    let late = count(AttendanceStatus::Late);

    let attendance_rate = if total > 0 {
        ((present + late) as f64 / total as f64 * 1000.0).round() / 10.0
    } else {
        0.0
    };

    AttendanceStats {
        date,
        total,
        present,
        late,
        absent: count(AttendanceStatus::Absent),
        excused: count(AttendanceStatus::Excused),
        attendance_rate,
    }
}

pub async fn get_stats(
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
        Ok(records) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            summarize(date, &records),
            "Attendance statistics retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to retrieve attendance statistics", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::attendance::entities::Attendance;
    use chrono::Utc;

    fn record(id: i64, status: AttendanceStatus) -> AttendanceRecord {
        let now = Utc::now();
        AttendanceRecord {
            attendance: Attendance {
                id,
                academy_id: 1,
                student_id: id,
                date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
                check_in_time: None,
                check_out_time: None,
                status,
                check_in_method: None,
                check_out_method: None,
                memo: None,
                marked_by: None,
                created_at: now,
                updated_at: now,
            },
            student_name: format!("학생{id}"),
            student_number: None,
        }
    }

    #[test]
    fn test_summarize_rate_rounding() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let records = vec![
            record(1, AttendanceStatus::Present),
            record(2, AttendanceStatus::Late),
            record(3, AttendanceStatus::Absent),
        ];
        let stats = summarize(date, &records);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.present, 1);
        assert_eq!(stats.late, 1);
        assert_eq!(stats.absent, 1);
        assert_eq!(stats.excused, 0);
        assert_eq!(stats.attendance_rate, 66.7);
    }

    #[test]
    fn test_summarize_empty_day() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let stats = summarize(date, &[]);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.attendance_rate, 0.0);
    }
}
