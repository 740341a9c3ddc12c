//! Wall-clock timestamp formatting.
//!
//! Everything user-facing renders in local time as `YYYY-MM-DD HH:MM:SS`.
//! Record fields sometimes carry ISO-8601 with a `Z` suffix; those are
//! converted to local time for display, falling back to the raw string
//! when they don't parse.

use chrono::{DateTime, Local};

/// Display format for all timestamps.
pub const STAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Current local wall-clock time, formatted.
pub fn now_stamp() -> String {
    Local::now().format(STAMP_FORMAT).to_string()
}

/// Convert an ISO-8601 timestamp (tolerating a `Z` suffix) to the local
/// display format. Unparseable input comes back unchanged.
pub fn localize(iso: &str) -> String {
    if iso.is_empty() {
        return String::new();
    }
    match DateTime::parse_from_rfc3339(iso) {
        Ok(dt) => dt.with_timezone(&Local).format(STAMP_FORMAT).to_string(),
        Err(_) => iso.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_localize_accepts_z_suffix() {
        let out = localize("2026-08-06T12:30:00Z");
        let expected = chrono::Utc
            .with_ymd_and_hms(2026, 8, 6, 12, 30, 0)
            .unwrap()
            .with_timezone(&Local)
            .format(STAMP_FORMAT)
            .to_string();
        assert_eq!(out, expected);
    }

    #[test]
    fn test_localize_falls_back_on_garbage() {
        assert_eq!(localize("five past noon"), "five past noon");
        assert_eq!(localize(""), "");
    }

    #[test]
    fn test_now_stamp_shape() {
        let stamp = now_stamp();
        // "YYYY-MM-DD HH:MM:SS"
        assert_eq!(stamp.len(), 19);
        assert_eq!(&stamp[4..5], "-");
        assert_eq!(&stamp[10..11], " ");
        assert_eq!(&stamp[13..14], ":");
    }
}
