use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::Datelike;

use super::BillingService;
use crate::models::ApiResponse;
use crate::services::common::{current_user, internal_error};
use crate::utils::time::{month_label, month_range, start_of_day_ts, today};

/// 本月 [月初, 下月初) 的时间戳区间
pub(crate) fn current_month_window() -> Option<(String, i64, i64)> {
    let today = today();
    let (first, next) = month_range(today.year(), today.month())?;
    Some((
        month_label(first),
        start_of_day_ts(first),
        start_of_day_ts(next),
    ))
}

pub async fn get_stats(service: &BillingService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request)?;

    let Some((month, from_ts, to_ts)) = current_month_window() else {
        return Ok(internal_error("Failed to compute billing period", "invalid date"));
    };

    match storage
        .billing_stats(user.academy_id, &month, from_ts, to_ts)
        .await
    {
        Ok(stats) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            stats,
            "Billing statistics retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to retrieve billing statistics", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_month_window() {
        let (month, from_ts, to_ts) = current_month_window().unwrap();
        assert_eq!(month.len(), 7);
        assert!(from_ts < to_ts);
        // 28 到 31 天
        let days = (to_ts - from_ts) / 86_400;
        assert!((28..=31).contains(&days));
    }
}
