//! Common display helpers

use chrono::Local;

use crate::client::models::parse_api_datetime;

/// Truncate to `max_len` characters with an ellipsis
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Render a backend timestamp in local time, `--` when absent.
///
/// Values that do not parse are shown as-is.
pub fn format_api_datetime(value: Option<&str>) -> String {
    match value {
        None => "--".to_string(),
        Some(raw) => match parse_api_datetime(raw) {
            Some(dt) => dt.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string(),
            None => raw.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("short", 10), "short");
        assert_eq!(truncate_string("a rather long title", 10), "a rathe...");
        assert_eq!(truncate_string("ääääää", 5), "ää...");
    }

    #[test]
    fn test_format_api_datetime() {
        assert_eq!(format_api_datetime(None), "--");
        assert_eq!(format_api_datetime(Some("someday")), "someday");
        // Local timezone varies, only check the shape
        let rendered = format_api_datetime(Some("2024-05-01T10:30:00Z"));
        assert_eq!(rendered.len(), "2024-05-01 10:30".len());
    }
}
