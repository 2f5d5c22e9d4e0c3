//! Display formatting for dates and peso amounts.
//!
//! Dates render in the offset carried by the value; nothing is converted to
//! the viewer's zone. Amounts use Philippine-peso conventions.

#[cfg(test)]
#[path = "formatter_test.rs"]
mod formatter_test;

use std::fmt::Display;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone};

/// Offset used for timestamps that arrive without one (Asia/Manila).
const MANILA_OFFSET_SECS: i32 = 8 * 3600;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    #[error("unrecognized timestamp: {0}")]
    InvalidTimestamp(String),
}

/// `Jan 5, 2024`
pub fn format_date<Tz: TimeZone>(value: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    value.format("%b %-d, %Y").to_string()
}

/// `Jan 5, 2024, 3:07 PM`
pub fn format_date_time<Tz: TimeZone>(value: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    value.format("%b %-d, %Y, %-I:%M %p").to_string()
}

/// `₱1,234.56`, `-₱1,234.56`
///
/// Any negative input keeps its sign, including `-0.0` and amounts that
/// round to zero (`-₱0.00`), as `en-PH` currency formatting does.
pub fn format_currency(value: f64) -> String {
    if value.is_nan() {
        return "₱NaN".to_owned();
    }
    let sign = if value.is_sign_negative() { "-" } else { "" };
    if value.is_infinite() {
        return format!("{sign}₱∞");
    }

    let fixed = format!("{:.2}", value.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    format!("{sign}₱{}.{cents}", group_thousands(whole))
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Parse an API timestamp: RFC 3339, `YYYY-MM-DD HH:MM:SS`, or `YYYY-MM-DD`.
/// Values without an offset are read as Manila time.
///
/// # Errors
///
/// Returns [`FormatError::InvalidTimestamp`] if none of the forms match.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<FixedOffset>, FormatError> {
    let raw = raw.trim();
    if let Ok(value) = DateTime::parse_from_rfc3339(raw) {
        return Ok(value);
    }
    let manila = FixedOffset::east_opt(MANILA_OFFSET_SECS).ok_or_else(|| FormatError::InvalidTimestamp(raw.to_owned()))?;
    let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .ok_or_else(|| FormatError::InvalidTimestamp(raw.to_owned()))?;
    manila
        .from_local_datetime(&naive)
        .single()
        .ok_or_else(|| FormatError::InvalidTimestamp(raw.to_owned()))
}
