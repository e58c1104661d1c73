//! 仪表盘最近动态

use chrono::{DateTime, Utc};

use crate::models::{
    attendance::{entities::AttendanceStatus, responses::AttendanceRecord},
    billing::responses::PaymentRecord,
    dashboard::ActivityItem,
    students::entities::Student,
};
use crate::utils::time::time_ago;

pub(crate) const RECENT_STUDENT_LIMIT: u64 = 3;
pub(crate) const RECENT_PAYMENT_LIMIT: u64 = 3;
const RECENT_CHECK_IN_LIMIT: usize = 3;
const MAX_ACTIVITY: usize = 10;

fn item(activity_type: &str, message: String, timestamp: DateTime<Utc>, now: i64) -> ActivityItem {
    ActivityItem {
        activity_type: activity_type.to_string(),
        message,
        time_ago: time_ago(timestamp.timestamp(), now),
        timestamp,
    }
}

/// 合并学生注册、今日签到与收款，按时间倒序取前 10 条
pub(crate) fn merge_activity(
    students: &[Student],
    attendance: &[AttendanceRecord],
    payments: &[PaymentRecord],
    now: i64,
) -> Vec<ActivityItem> {
    let mut check_ins: Vec<(&str, DateTime<Utc>)> = attendance
        .iter()
        .filter(|r| r.attendance.status == AttendanceStatus::Present)
        .filter_map(|r| {
            r.attendance
                .check_in_time
                .map(|t| (r.student_name.as_str(), t))
        })
        .collect();
    check_ins.sort_by(|a, b| b.1.cmp(&a.1));

    let mut items: Vec<ActivityItem> = students
        .iter()
        .map(|s| {
            item(
                "student_registered",
                format!("{} registered as a student", s.name),
                s.created_at,
                now,
            )
        })
        .chain(
            check_ins
                .into_iter()
                .take(RECENT_CHECK_IN_LIMIT)
                .map(|(name, at)| item("attendance", format!("{name} checked in"), at, now)),
        )
        .chain(payments.iter().map(|p| {
            item(
                "payment",
                format!("Payment of {} received from {}", p.payment.amount, p.student_name),
                p.payment.paid_at,
                now,
            )
        }))
        .collect();

    items.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    items.truncate(MAX_ACTIVITY);
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        attendance::entities::{Attendance, CheckMethod},
        billing::entities::{Payment, PaymentMethod, PaymentStatus},
        students::entities::StudentStatus,
    };
    use chrono::{Duration, NaiveDate};

    fn student(id: i64, created_at: DateTime<Utc>) -> Student {
        Student {
            id,
            academy_id: 1,
            name: format!("학생{id}"),
            student_number: None,
            phone: None,
            email: None,
            grade: None,
            parent_phone: None,
            parent_name: None,
            memo: None,
            status: StudentStatus::Active,
            is_linked: false,
            linked_at: None,
            created_at,
            updated_at: created_at,
        }
    }

    fn check_in(id: i64, at: DateTime<Utc>, status: AttendanceStatus) -> AttendanceRecord {
        AttendanceRecord {
            attendance: Attendance {
                id,
                academy_id: 1,
                student_id: id,
                date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
                check_in_time: Some(at),
                check_out_time: None,
                status,
                check_in_method: Some(CheckMethod::Qr),
                check_out_method: None,
                memo: None,
                marked_by: None,
                created_at: at,
                updated_at: at,
            },
            student_name: format!("출석{id}"),
            student_number: None,
        }
    }

    fn payment(id: i64, at: DateTime<Utc>) -> PaymentRecord {
        PaymentRecord {
            payment: Payment {
                id,
                academy_id: 1,
                student_id: id,
                billing_id: None,
                amount: 150_000,
                payment_method: PaymentMethod::Card,
                status: PaymentStatus::Completed,
                paid_at: at,
                notes: None,
                created_by: None,
            },
            student_name: format!("결제{id}"),
        }
    }

    #[test]
    fn test_merge_orders_newest_first_and_caps() {
        let now = Utc::now();
        let students: Vec<Student> = (0..3)
            .map(|i| student(i, now - Duration::days(i + 1)))
            .collect();
        let attendance: Vec<AttendanceRecord> = (0..5)
            .map(|i| check_in(i, now - Duration::minutes(i * 10 + 5), AttendanceStatus::Present))
            .collect();
        let payments: Vec<PaymentRecord> = (0..3)
            .map(|i| payment(i, now - Duration::hours(i + 2)))
            .collect();

        let items = merge_activity(&students, &attendance, &payments, now.timestamp());
        // 3 + 3 + 3，签到只取最近 3 条
        assert_eq!(items.len(), 9);
        assert_eq!(items[0].activity_type, "attendance");
        assert_eq!(items[0].time_ago, "5 minutes ago");
        assert!(items.windows(2).all(|w| w[0].timestamp >= w[1].timestamp));
        assert_eq!(items.last().unwrap().activity_type, "student_registered");
    }

    #[test]
    fn test_merge_skips_non_present_records() {
        let now = Utc::now();
        let attendance = vec![check_in(1, now, AttendanceStatus::Late)];
        let items = merge_activity(&[], &attendance, &[], now.timestamp());
        assert!(items.is_empty());
    }
}
