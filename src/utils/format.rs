/// Render a server timestamp for display. Falls back to the date part of
/// a `YYYY-MM-DD...` string, or the raw value when nothing parses.
pub fn format_date(date: &str) -> String {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(date) {
        return dt.format("%b %d, %Y").to_string();
    }
    if date.len() >= 10 {
        date.chars().take(10).collect()
    } else {
        date.to_string()
    }
}

/// Truncate to at most `max_len` characters, ending in an ellipsis when
/// anything was cut. Counts chars, not bytes, so multibyte content is safe.
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s.to_string();
    }
    if max_len <= 3 {
        return s.chars().take(max_len).collect();
    }
    let mut truncated: String = s.chars().take(max_len - 3).collect();
    truncated.push_str("...");
    truncated
}

/// Display an optional string, substituting a default for None
pub fn format_optional(value: &Option<String>, default: &str) -> String {
    value.as_deref().unwrap_or(default).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-03-05T12:30:00+00:00"), "Mar 05, 2024");
        assert_eq!(format_date("2024-03-05"), "2024-03-05");
        assert_eq!(format_date("n/a"), "n/a");
    }

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("Hello", 10), "Hello");
        assert_eq!(truncate_string("Hello World", 8), "Hello...");
        assert_eq!(truncate_string("Hi", 2), "Hi");
    }

    #[test]
    fn test_truncate_string_counts_chars() {
        // 5 chars but 10 bytes; no truncation at a 5-char budget
        assert_eq!(truncate_string("ééééé", 5), "ééééé");
        assert_eq!(truncate_string("éééééé", 5), "éé...");
    }

    #[test]
    fn test_format_optional() {
        assert_eq!(format_optional(&Some("set".to_string()), "-"), "set");
        assert_eq!(format_optional(&None, "-"), "-");
    }
}
