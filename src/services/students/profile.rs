use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::{Datelike, NaiveDate};

use super::StudentService;
use crate::models::{
    ApiResponse, ErrorCode,
    attendance::entities::{Attendance, AttendanceStatus},
    notices::responses::NoticeSummary,
    students::responses::{RecentNotice, StudentProfileResponse, StudentStats},
};
use crate::services::common::{current_user, internal_error, not_found};
use crate::utils::time::{days_ago_label, local_date, month_range, today};

const RECENT_NOTICE_LIMIT: u64 = 5;

fn count_present(records: &[Attendance]) -> i64 {
    records
        .iter()
        .filter(|r| r.status == AttendanceStatus::Present)
        .count() as i64
}

fn recent_notice(summary: NoticeSummary, today: NaiveDate) -> RecentNotice {
    let notice = summary.notice;
    let shown_at = notice.published_at.unwrap_or(notice.created_at);
    let date = local_date(shown_at.timestamp()).unwrap_or(today);
    RecentNotice {
        id: notice.id,
        title: notice.title,
        is_important: notice.is_important,
        date: days_ago_label(date, today),
    }
}

pub async fn get_my_profile(
    service: &StudentService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request)?;

    let student = match storage.get_student(user.academy_id, user.id).await {
        Ok(Some(student)) => student,
        Ok(None) => return Ok(not_found(ErrorCode::StudentNotFound, "Student not found")),
        Err(e) => return Ok(internal_error("Failed to retrieve profile", e)),
    };

    let academy_name = match storage.get_academy_by_id(user.academy_id).await {
        Ok(academy) => academy.map(|a| a.name).unwrap_or_default(),
        Err(e) => return Ok(internal_error("Failed to retrieve profile", e)),
    };

    // 本月出勤
    let today = today();
    let attendance = match month_range(today.year(), today.month()) {
        Some((first, next)) => {
            match storage
                .list_student_attendance(user.academy_id, student.id, first, next)
                .await
            {
                Ok(records) => count_present(&records),
                Err(e) => return Ok(internal_error("Failed to retrieve attendance", e)),
            }
        }
        None => 0,
    };

    let pending_homework = match storage
        .count_pending_homework(user.academy_id, student.id)
        .await
    {
        Ok(count) => count as i64,
        Err(e) => return Ok(internal_error("Failed to retrieve homework", e)),
    };

    let recent_notices = match storage
        .list_student_notices(user.academy_id, student.id, Some(RECENT_NOTICE_LIMIT))
        .await
    {
        Ok(notices) => notices
            .into_iter()
            .map(|n| recent_notice(n, today))
            .collect(),
        Err(e) => return Ok(internal_error("Failed to retrieve notices", e)),
    };

    let response = StudentProfileResponse {
        id: student.id,
        name: student.name,
        academy_name,
        student_number: student.student_number,
        grade: student.grade,
        stats: StudentStats {
            attendance,
            pending_homework,
        },
        recent_notices,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        response,
        "Profile retrieved successfully",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::notices::entities::{Notice, NoticeStatus};
    use chrono::{Duration, Utc};

    #[test]
    fn test_recent_notice_uses_publish_date() {
        let now = Utc::now();
        let notice = Notice {
            id: 9,
            academy_id: 1,
            title: "휴원 안내".to_string(),
            body: "본문".to_string(),
            status: NoticeStatus::Published,
            is_important: true,
            is_pinned: false,
            view_count: 0,
            published_at: Some(now - Duration::days(3)),
            created_at: now - Duration::days(10),
            updated_at: now,
            created_by: None,
        };
        let today = local_date(now.timestamp()).unwrap();
        let summary = NoticeSummary {
            notice,
            target_count: 1,
            attachment_count: 0,
        };

        let recent = recent_notice(summary, today);
        assert_eq!(recent.id, 9);
        assert!(recent.is_important);
        assert_eq!(recent.date, "3일 전");
    }
}
