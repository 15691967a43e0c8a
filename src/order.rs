//! The temporal ordering function.
//!
//! Records store their moment as two free-text fields: a `MM/dd/yyyy` date
//! and a 12-hour `hh:mm AM/PM` time. Chronological order is derived from
//! these at read time as a 24-hour `yyyy-MM-dd HH:mm` key, which is never
//! persisted. The conversion lives in exactly one place, [`temporal_key`],
//! which is also registered as a deterministic SQL scalar of the same name, so
//! the paged listing, the search queries and any Rust-side re-sort all order
//! by the identical computation.
//!
//! Unparseable date/time combinations yield the empty string, which is the
//! smallest possible key. Under the descending order used everywhere this
//! pushes malformed rows to the bottom instead of failing the whole query.

use chrono::NaiveDate;
use rusqlite::Connection;
use rusqlite::functions::FunctionFlags;

use crate::record::DATE_FORMAT;

/// SQL fragment shared by every listing and search statement.
pub const ORDER_BY_TEMPORAL_DESC: &str = "order by temporal_key(date, time) desc";

/// Derives the sortable key, or `""` when either part does not parse.
///
/// The 12-hour conversion follows fixed rules: the hour token is everything
/// before the first `:`; a `PM` suffix on an hour other than `12` adds 12,
/// an `AM` suffix on hour `12` yields `00`, and any other hour passes
/// through unchanged (zero-padded). Minutes follow unchanged.
pub fn temporal_key(date: &str, time: &str) -> String {
    let Ok(day) = NaiveDate::parse_from_str(date.trim(), DATE_FORMAT) else {
        return String::new();
    };
    let time = time.trim();
    let Some(colon) = time.find(':') else {
        return String::new();
    };
    let Ok(hour) = time[..colon].trim().parse::<u32>() else {
        return String::new();
    };
    let minute_digits: String = time[colon + 1..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    if minute_digits.is_empty() || minute_digits.len() > 2 {
        return String::new();
    }
    let Ok(minute) = minute_digits.parse::<u32>() else {
        return String::new();
    };
    let suffix = time.to_ascii_uppercase();
    let hour = if suffix.ends_with("PM") && hour != 12 {
        hour + 12
    } else if suffix.ends_with("AM") && hour == 12 {
        0
    } else {
        hour
    };
    if hour > 23 || minute > 59 {
        return String::new();
    }
    format!("{} {:02}:{:02}", day.format("%Y-%m-%d"), hour, minute)
}

/// Registers `temporal_key(date, time)` on the connection so SQL `ORDER BY`
/// clauses recompute the exact same key as the library function. NULL
/// arguments are treated as empty strings and sort to the bottom like any
/// other unparseable input.
pub fn register(conn: &Connection) -> rusqlite::Result<()> {
    conn.create_scalar_function(
        "temporal_key",
        2,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let date = ctx.get::<Option<String>>(0)?.unwrap_or_default();
            let time = ctx.get::<Option<String>>(1)?.unwrap_or_default();
            Ok(temporal_key(&date, &time))
        },
    )
}
