use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::DashboardService;
use super::activity::{RECENT_PAYMENT_LIMIT, RECENT_STUDENT_LIMIT, merge_activity};
use crate::models::{
    ApiResponse,
    attendance::entities::AttendanceStatus,
    dashboard::{DashboardResponse, DashboardStats},
};
use crate::services::billing::stats::current_month_window;
use crate::services::common::{current_user, internal_error};
use crate::utils::time::{now_ts, today};

pub async fn get_stats(
    service: &DashboardService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request)?;
    let academy_id = user.academy_id;

    let academy_name = match storage.get_academy_by_id(academy_id).await {
        Ok(academy) => academy.map(|a| a.name).unwrap_or_default(),
        Err(e) => return Ok(internal_error("Failed to get academy information", e)),
    };

    let total_students = match storage.count_active_students(academy_id).await {
        Ok(count) => count as i64,
        Err(e) => return Ok(internal_error("Failed to count students", e)),
    };

    let attendance = match storage.list_attendance_by_date(academy_id, today()).await {
        Ok(records) => records,
        Err(e) => return Ok(internal_error("Failed to retrieve attendance", e)),
    };
    let today_attendance = attendance
        .iter()
        .filter(|r| r.attendance.status == AttendanceStatus::Present)
        .count() as i64;

    let monthly_revenue = match current_month_window() {
        Some((month, from_ts, to_ts)) => {
            match storage
                .billing_stats(academy_id, &month, from_ts, to_ts)
                .await
            {
                Ok(stats) => stats.monthly_revenue,
                Err(e) => return Ok(internal_error("Failed to retrieve revenue", e)),
            }
        }
        None => 0,
    };

    let students = match storage
        .list_recent_students(academy_id, RECENT_STUDENT_LIMIT)
        .await
    {
        Ok(students) => students,
        Err(e) => return Ok(internal_error("Failed to retrieve recent students", e)),
    };
    let payments = match storage.list_payments(academy_id, RECENT_PAYMENT_LIMIT).await {
        Ok(payments) => payments,
        Err(e) => return Ok(internal_error("Failed to retrieve recent payments", e)),
    };

    let response = DashboardResponse {
        academy_name,
        stats: DashboardStats {
            total_students,
            today_attendance,
            monthly_revenue,
        },
        recent_activity: merge_activity(&students, &attendance, &payments, now_ts()),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        response,
        "Dashboard statistics retrieved successfully",
    )))
}
