use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, Utc};

/// `[midnight, next midnight)` of the UTC calendar day containing `at`.
pub fn day_bounds(at: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = at
        .date_naive()
        .and_hms_opt(0, 0, 0)
        .unwrap()
        .and_utc();
    (start, start + Duration::days(1))
}

/// Accepts an RFC 3339 instant, a naive `YYYY-MM-DDTHH:MM:SS` (taken as
/// UTC), or a bare `YYYY-MM-DD` (taken as UTC midnight).
pub fn parse_record_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt.and_utc());
    }
    if let Ok(d) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(d.and_hms_opt(0, 0, 0).unwrap().and_utc());
    }
    None
}

/// A resolved reporting window plus the label attached to the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthWindow {
    pub start: DateTime<Utc>,
    /// Inclusive upper bound.
    pub end: DateTime<Utc>,
    pub label: String,
}

/// Resolves a `YYYY-MM` query parameter into a UTC month window.
///
/// A well-formed month yields `[first instant, 23:59:59.999 of the last
/// day]`. Anything else falls back to `[first of the current UTC month,
/// now]` with the end clamped so it never precedes the start; the same
/// fallback applies at every call site.
pub fn resolve_month(month: Option<&str>) -> MonthWindow {
    resolve_month_at(month, Utc::now())
}

fn resolve_month_at(month: Option<&str>, now: DateTime<Utc>) -> MonthWindow {
    if let Some(raw) = month {
        if let Some((year, mon)) = parse_year_month(raw) {
            let start = NaiveDate::from_ymd_opt(year, mon, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
                .and_utc();
            let next_month = if mon == 12 {
                NaiveDate::from_ymd_opt(year + 1, 1, 1)
            } else {
                NaiveDate::from_ymd_opt(year, mon + 1, 1)
            }
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
            .and_utc();

            return MonthWindow {
                start,
                end: next_month - Duration::milliseconds(1),
                label: raw.to_string(),
            };
        }
    }

    let start = NaiveDate::from_ymd_opt(now.year(), now.month(), 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
        .and_utc();
    MonthWindow {
        start,
        end: now.max(start),
        label: format!("{:04}-{:02}", now.year(), now.month()),
    }
}

/// Strict `YYYY-MM`: four digits, dash, two digits, month 01..=12.
fn parse_year_month(raw: &str) -> Option<(i32, u32)> {
    let (y, m) = raw.split_once('-')?;
    if y.len() != 4 || m.len() != 2 {
        return None;
    }
    if !y.bytes().all(|b| b.is_ascii_digit()) || !m.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year: i32 = y.parse().ok()?;
    let month: u32 = m.parse().ok()?;
    if !(1..=12).contains(&month) {
        return None;
    }
    Some((year, month))
}
