//! Vendor date handling.
//!
//! The WSF API serializes timestamps as escaped JSON strings of the form
//! `"\/Date(1468339200000-0700)\/"`: epoch milliseconds followed by a UTC
//! offset. [`repair`] rewrites every such token in a raw payload to the bare
//! millisecond integer so it decodes as a number.

use std::borrow::Cow;
use std::sync::LazyLock;

use chrono::{DateTime, FixedOffset, Utc};
use regex::{Captures, Regex};

/// A whole vendor date string literal, as it appears in raw JSON text.
static ESCAPED_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""\\/Date\((\d+)-\d*\)\\/""#).expect("valid regex"));

/// A decoded vendor date string, with its offset.
static DECODED_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^/Date\((-?\d+)(?:([+-])(\d{2})(\d{2}))?\)/$").expect("valid regex")
});

/// Rewrite vendor date tokens in raw JSON text to epoch milliseconds.
///
/// Text without tokens is returned borrowed and unchanged. A token whose
/// millisecond value does not fit an `i64` is left as it is.
///
/// ```
/// use wsf_client::datefix::repair;
///
/// let raw = r#"{"LeftDock":"\/Date(1468339200000-0700)\/","Name":"Tacoma"}"#;
/// assert_eq!(repair(raw), r#"{"LeftDock":1468339200000,"Name":"Tacoma"}"#);
/// ```
pub fn repair(text: &str) -> Cow<'_, str> {
    ESCAPED_TOKEN.replace_all(text, |caps: &Captures| match caps[1].parse::<i64>() {
        Ok(millis) => millis.to_string(),
        Err(_) => caps[0].to_string(),
    })
}

/// Parse a decoded vendor date string (`/Date(ms-offset)/`) into a
/// timestamp carrying its original offset.
///
/// Useful when date repair is disabled and dates arrive as strings. The
/// offset is optional; without one the timestamp is in UTC.
pub fn parse_vendor_date(value: &str) -> Option<DateTime<FixedOffset>> {
    let caps = DECODED_TOKEN.captures(value)?;
    let millis: i64 = caps[1].parse().ok()?;

    let offset = match (caps.get(2), caps.get(3), caps.get(4)) {
        (Some(sign), Some(hours), Some(minutes)) => {
            let secs = hours.as_str().parse::<i32>().ok()? * 3600
                + minutes.as_str().parse::<i32>().ok()? * 60;
            if sign.as_str() == "-" {
                FixedOffset::west_opt(secs)?
            } else {
                FixedOffset::east_opt(secs)?
            }
        }
        _ => FixedOffset::east_opt(0)?,
    };

    Some(from_epoch_millis(millis)?.with_timezone(&offset))
}

/// Convert a repaired date (epoch milliseconds) into a UTC timestamp.
pub fn from_epoch_millis(millis: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis)
}
