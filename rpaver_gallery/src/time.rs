// Copyright 2025 the RPAVER Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use chrono::{DateTime, FixedOffset, Timelike, Utc};
use serde_json::Value;

/// Placeholder shown for a missing or unreadable timestamp.
pub const NO_DATE: &str = "날짜 없음";

/// Korea Standard Time, which has no daylight saving.
const KST_OFFSET_SECS: i32 = 9 * 3600;

/// Renders an RFC 3339 timestamp in Korea Standard Time as
/// `YYYY. MM. DD. 오전|오후 hh:mm:ss` (12-hour clock, `12` for noon and
/// midnight).
///
/// `None`, blank input or an unparsable string renders [`NO_DATE`].
///
/// ```
/// use rpaver_gallery::format_created_at;
///
/// assert_eq!(
///     format_created_at(Some("2024-03-05T05:07:09.000Z")),
///     "2024. 03. 05. 오후 02:07:09"
/// );
/// assert_eq!(format_created_at(None), "날짜 없음");
/// ```
#[must_use]
pub fn format_created_at(timestamp: Option<&str>) -> String {
    timestamp
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
        .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
        .map_or_else(|| NO_DATE.to_owned(), |at| format_kst(at.with_timezone(&Utc)))
}

/// Renders a stored timestamp field like [`format_created_at`].
///
/// Accepts an RFC 3339 string or a `{"seconds", "nanoseconds"}` object as
/// exported by the hosted document database. Anything else renders
/// [`NO_DATE`].
#[must_use]
pub fn format_timestamp_value(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(raw)) => format_created_at(Some(raw)),
        Some(Value::Object(fields)) => {
            let seconds = fields.get("seconds").and_then(Value::as_i64);
            let nanos = fields
                .get("nanoseconds")
                .and_then(Value::as_u64)
                .and_then(|nanos| u32::try_from(nanos).ok())
                .unwrap_or(0);
            seconds
                .and_then(|seconds| DateTime::from_timestamp(seconds, nanos))
                .map_or_else(|| NO_DATE.to_owned(), format_kst)
        }
        _ => NO_DATE.to_owned(),
    }
}

fn format_kst(at: DateTime<Utc>) -> String {
    let Some(kst) = FixedOffset::east_opt(KST_OFFSET_SECS) else {
        return NO_DATE.to_owned();
    };
    let local = at.with_timezone(&kst);
    let (pm, hour) = local.hour12();
    let meridiem = if pm { "오후" } else { "오전" };
    format!(
        "{} {meridiem} {hour:02}:{:02}:{:02}",
        local.format("%Y. %m. %d."),
        local.minute(),
        local.second()
    )
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{NO_DATE, format_created_at, format_timestamp_value};

    #[test]
    fn conversion_crosses_the_date_line() {
        assert_eq!(
            format_created_at(Some("2024-12-31T15:30:00Z")),
            "2025. 01. 01. 오전 12:30:00"
        );
    }

    #[test]
    fn noon_is_twelve_pm() {
        assert_eq!(
            format_created_at(Some("2024-01-01T03:00:00+00:00")),
            "2024. 01. 01. 오후 12:00:00"
        );
    }

    #[test]
    fn offsets_are_honoured() {
        assert_eq!(
            format_created_at(Some("2024-03-05T14:07:09+09:00")),
            "2024. 03. 05. 오후 02:07:09"
        );
    }

    #[test]
    fn unreadable_input_has_no_date() {
        for raw in ["", "   ", "yesterday", "2024-13-01T00:00:00Z"] {
            assert_eq!(format_created_at(Some(raw)), NO_DATE, "{raw:?}");
        }
    }

    #[test]
    fn stored_timestamp_objects_are_accepted() {
        let value = json!({ "seconds": 1_709_615_229_i64, "nanoseconds": 0 });
        assert_eq!(
            format_timestamp_value(Some(&value)),
            "2024. 03. 05. 오후 02:07:09"
        );
        assert_eq!(
            format_timestamp_value(Some(&json!("2024-03-05T05:07:09Z"))),
            "2024. 03. 05. 오후 02:07:09"
        );
        assert_eq!(format_timestamp_value(Some(&json!(42))), NO_DATE);
        assert_eq!(format_timestamp_value(Some(&json!({}))), NO_DATE);
        assert_eq!(format_timestamp_value(None), NO_DATE);
    }
}
