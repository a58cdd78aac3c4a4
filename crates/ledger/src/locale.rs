//! India-locale (`en-IN`) renderings of split timestamps.
//!
//! Dates render as `d/m/yyyy` without zero padding, times as a 12-hour clock
//! with lowercase meridiem (`3:07:09 pm`).

use chrono::{DateTime, FixedOffset, Offset, Utc};

/// Display offset used when none is configured: IST (UTC+05:30).
pub const IST_OFFSET_MINUTES: i32 = 5 * 60 + 30;

/// IST as a fixed offset.
pub fn ist() -> FixedOffset {
    FixedOffset::east_opt(IST_OFFSET_MINUTES * 60).unwrap_or_else(|| Utc.fix())
}

pub fn format_date(instant: DateTime<Utc>, offset: FixedOffset) -> String {
    instant.with_timezone(&offset).format("%-d/%-m/%Y").to_string()
}

pub fn format_time(instant: DateTime<Utc>, offset: FixedOffset) -> String {
    instant.with_timezone(&offset).format("%-I:%M:%S %P").to_string()
}
