//! Rate-limit headers (`x-ratelimit-*`).

use chrono::{DateTime, Local, TimeZone};
use reqwest::header::HeaderMap;
use serde::Serialize;

const LIMIT: &str = "x-ratelimit-limit";
const REMAINING: &str = "x-ratelimit-remaining";
const RESET: &str = "x-ratelimit-reset";

/// Rate-limit quota as reported by the last response.
/// Fields are `None` when the header was missing or unparseable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RateLimit {
    pub limit: Option<u64>,
    pub remaining: Option<u64>,
    pub reset_epoch_seconds: Option<i64>,
}

impl RateLimit {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self {
            limit: header_value(headers, LIMIT),
            remaining: header_value(headers, REMAINING),
            reset_epoch_seconds: header_value(headers, RESET),
        }
    }

    /// Local wall-clock time of the next reset, when the server sent one.
    pub fn reset_time(&self) -> Option<String> {
        format_reset_time(self.reset_epoch_seconds?)
    }
}

fn header_value<T: std::str::FromStr>(headers: &HeaderMap, name: &str) -> Option<T> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse().ok())
}

fn reset_local_time(epoch_seconds: i64) -> Option<DateTime<Local>> {
    let millis = epoch_seconds.checked_mul(1000)?;
    Local.timestamp_millis_opt(millis).single()
}

/// Wall-clock time of a reset epoch, e.g. "3:04:05 PM".
pub fn format_reset_time(epoch_seconds: i64) -> Option<String> {
    reset_local_time(epoch_seconds).map(|dt| dt.format("%-I:%M:%S %p").to_string())
}
