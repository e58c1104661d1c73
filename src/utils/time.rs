use chrono::{Datelike, Duration, FixedOffset, NaiveDate, Offset, TimeZone, Utc};

use crate::config::AppConfig;

/// 当前 Unix 时间戳（秒）
pub fn now_ts() -> i64 {
    Utc::now().timestamp()
}

/// 学院所在时区
pub fn local_offset() -> FixedOffset {
    let hours = AppConfig::get().app.utc_offset_hours.clamp(-23, 23);
    FixedOffset::east_opt(hours * 3600).unwrap_or(Utc.fix())
}

/// 本地“今天”
pub fn today() -> NaiveDate {
    Utc::now().with_timezone(&local_offset()).date_naive()
}

/// 时间戳对应的本地日期
pub fn local_date(ts: i64) -> Option<NaiveDate> {
    local_offset()
        .timestamp_opt(ts, 0)
        .single()
        .map(|dt| dt.date_naive())
}

/// 本地日期当天 00:00 的时间戳
pub fn start_of_day_ts(date: NaiveDate) -> i64 {
    let naive = date.and_hms_opt(0, 0, 0).unwrap_or_default();
    local_offset()
        .from_local_datetime(&naive)
        .single()
        .map(|dt| dt.timestamp())
        .unwrap_or_else(|| naive.and_utc().timestamp())
}

/// 某月的第一天与下个月的第一天
pub fn month_range(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((first, next))
}

/// 格式化为 YYYY-MM
pub fn month_label(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

/// 相对时间描述，用于仪表盘动态
pub fn time_ago(ts: i64, now: i64) -> String {
    let diff = Duration::seconds((now - ts).max(0));
    if diff.num_days() > 0 {
        format!("{} days ago", diff.num_days())
    } else if diff.num_hours() > 0 {
        format!("{} hours ago", diff.num_hours())
    } else if diff.num_minutes() > 0 {
        format!("{} minutes ago", diff.num_minutes())
    } else {
        "just now".to_string()
    }
}

/// 学生端公告使用的日期描述
pub fn days_ago_label(date: NaiveDate, today: NaiveDate) -> String {
    let days = (today - date).num_days();
    if days <= 0 {
        "오늘".to_string()
    } else {
        format!("{days}일 전")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_range() {
        let (first, next) = month_range(2025, 12).unwrap();
        assert_eq!(first, NaiveDate::from_ymd_opt(2025, 12, 1).unwrap());
        assert_eq!(next, NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
        assert!(month_range(2025, 13).is_none());
    }

    #[test]
    fn test_month_label() {
        assert_eq!(month_label(NaiveDate::from_ymd_opt(2025, 3, 9).unwrap()), "2025-03");
    }

    #[test]
    fn test_time_ago() {
        let now = 1_000_000;
        assert_eq!(time_ago(now - 30, now), "just now");
        assert_eq!(time_ago(now - 120, now), "2 minutes ago");
        assert_eq!(time_ago(now - 3 * 3600, now), "3 hours ago");
        assert_eq!(time_ago(now - 2 * 86400, now), "2 days ago");
        assert_eq!(time_ago(now + 10, now), "just now");
    }

    #[test]
    fn test_days_ago_label() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        assert_eq!(days_ago_label(today, today), "오늘");
        assert_eq!(
            days_ago_label(NaiveDate::from_ymd_opt(2025, 3, 7).unwrap(), today),
            "3일 전"
        );
    }

    #[test]
    fn test_start_of_day_roundtrip() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        assert_eq!(local_date(start_of_day_ts(date)), Some(date));
    }
}
