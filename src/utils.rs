/// Date parsing utilities shared by the source adapters
pub mod date {
    use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime, Utc};
    use once_cell::sync::Lazy;
    use regex::Regex;

    const ISO_DATE: &str = "%Y-%m-%d";

    // Date shapes seen across the upstream listings. chrono's %b accepts both
    // abbreviated and full month names when parsing.
    const DATE_FORMATS: &[&str] = &[
        "%Y-%m-%d",
        "%Y/%m/%d",
        "%m/%d/%Y",
        "%b %d, %Y",
        "%b %d %Y",
        "%d %b %Y",
    ];

    static IN_TEXT_DATE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(
            r"(?i)\b(\d{4}-\d{2}-\d{2}|(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]* \d{1,2}(?:,? \d{4})?)\b",
        )
        .expect("valid in-text date pattern")
    });

    /// Parse a date string in any of the known source formats
    pub fn parse(raw: &str) -> Option<NaiveDate> {
        let cleaned = raw.trim();
        if cleaned.is_empty() {
            return None;
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(cleaned) {
            return Some(dt.date_naive());
        }
        // "2025-09-01 09:00:00+00:00" style timezone-qualified timestamps
        if let Ok(dt) = DateTime::parse_from_str(cleaned, "%Y-%m-%d %H:%M:%S%:z") {
            return Some(dt.date_naive());
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(cleaned, "%Y-%m-%dT%H:%M:%S") {
            return Some(dt.date());
        }

        for fmt in DATE_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(cleaned, fmt) {
                return Some(date);
            }
        }

        parse_yearless(cleaned)
    }

    /// Month/day with no year ("Sep 20"); listings are upcoming, so a
    /// month/day already behind us rolls to next year
    fn parse_yearless(input: &str) -> Option<NaiveDate> {
        let today = Local::now().date_naive();
        let candidate = format!("{}, {}", input, today.year());
        let date = NaiveDate::parse_from_str(&candidate, "%b %d, %Y").ok()?;
        if date < today {
            return date.with_year(today.year() + 1);
        }
        Some(date)
    }

    /// Normalize to "YYYY-MM-DD", or None when the input is unparseable
    pub fn normalize(raw: &str) -> Option<String> {
        parse(raw).map(|date| date.format(ISO_DATE).to_string())
    }

    /// Epoch seconds to "YYYY-MM-DD"
    pub fn from_timestamp(secs: i64) -> Option<String> {
        DateTime::<Utc>::from_timestamp(secs, 0).map(|dt| dt.date_naive().format(ISO_DATE).to_string())
    }

    /// Scan free text for the first recognizable date
    pub fn find(text: &str) -> Option<String> {
        IN_TEXT_DATE.find_iter(text).find_map(|m| normalize(m.as_str()))
    }
}

/// Text processing utilities
pub mod text {
    pub const DESCRIPTION_MAX: usize = 200;

    /// Truncate to a maximum character count, trying to break at sentence
    /// boundaries, then at word boundaries
    pub fn smart_truncate(text: &str, max_chars: usize) -> String {
        if text.chars().count() <= max_chars {
            return text.to_string();
        }

        let cut = text
            .char_indices()
            .nth(max_chars)
            .map(|(i, _)| i)
            .unwrap_or(text.len());
        let truncated = &text[..cut];

        if let Some(last_sentence) = truncated.rfind('.') {
            truncated[..last_sentence + 1].to_string()
        } else if let Some(last_space) = truncated.rfind(' ') {
            format!("{}...", &truncated[..last_space])
        } else {
            format!("{}...", truncated)
        }
    }

    /// Collapse whitespace runs into single spaces and trim the ends
    pub fn clean(input: &str) -> String {
        input.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

/// URL utilities
pub mod url {
    use url::Url;

    /// Resolve an href against its page URL, passing absolute links through
    pub fn absolutize(base: &str, href: &str) -> Option<String> {
        if href.starts_with("http://") || href.starts_with("https://") {
            return Some(href.to_string());
        }
        Url::parse(base).ok()?.join(href).ok().map(|u| u.to_string())
    }
}
