//! 时间工具函数
//!
//! 所有时间戳统一为 Unix millis (UTC)，
//! repository 层只接收 `i64`。

use chrono::{DateTime, Datelike, Duration, Utc, Weekday};

/// 当前 Unix 时间戳 (毫秒)
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// 本周一 00:00:00 UTC 的 Unix millis
///
/// 营收统计以周一为一周的开始。
pub fn start_of_week_millis(now: DateTime<Utc>) -> i64 {
    let days_from_monday = now.weekday().num_days_from_monday() as i64;
    let monday = (now - Duration::days(days_from_monday)).date_naive();
    monday
        .and_hms_opt(0, 0, 0)
        .expect("midnight is always valid")
        .and_utc()
        .timestamp_millis()
}

/// 周一到周日的标签，顺序固定
pub const WEEKDAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// millis 时间戳 → 周内索引 (Mon = 0 ... Sun = 6)
pub fn weekday_index(millis: i64) -> usize {
    let dt = DateTime::<Utc>::from_timestamp_millis(millis).unwrap_or_else(Utc::now);
    match dt.weekday() {
        Weekday::Mon => 0,
        Weekday::Tue => 1,
        Weekday::Wed => 2,
        Weekday::Thu => 3,
        Weekday::Fri => 4,
        Weekday::Sat => 5,
        Weekday::Sun => 6,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_start_of_week_is_monday_midnight() {
        // 2026-08-06 is a Thursday
        let now = Utc.with_ymd_and_hms(2026, 8, 6, 15, 30, 0).unwrap();
        let start = start_of_week_millis(now);
        let start_dt = DateTime::<Utc>::from_timestamp_millis(start).unwrap();

        assert_eq!(start_dt.weekday(), Weekday::Mon);
        assert_eq!(start_dt.date_naive().to_string(), "2026-08-03");
        assert_eq!(start_dt.time().to_string(), "00:00:00");
    }

    #[test]
    fn test_start_of_week_on_monday() {
        let monday = Utc.with_ymd_and_hms(2026, 8, 3, 0, 0, 0).unwrap();
        assert_eq!(start_of_week_millis(monday), monday.timestamp_millis());
    }

    #[test]
    fn test_weekday_index() {
        let thursday = Utc.with_ymd_and_hms(2026, 8, 6, 12, 0, 0).unwrap();
        assert_eq!(weekday_index(thursday.timestamp_millis()), 3);

        let sunday = Utc.with_ymd_and_hms(2026, 8, 9, 12, 0, 0).unwrap();
        assert_eq!(weekday_index(sunday.timestamp_millis()), 6);
    }
}
