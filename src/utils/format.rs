use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

/// Format a NaiveTime to "HH:MM"
pub fn format_time(t: NaiveTime) -> String {
    t.format("%H:%M").to_string()
}

/// "2025-01-10" → "Friday, 10 January 2025". Anything that isn't an ISO
/// date is shown as typed.
pub fn format_long_date(raw: &str) -> String {
    let raw = raw.trim();
    match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) => date.format("%A, %-d %B %Y").to_string(),
        Err(_) => raw.to_string(),
    }
}

/// ISO timestamps become "22 December 2024, 06:00"; free text passes through.
pub fn format_last_updated(raw: &str) -> String {
    let raw = raw.trim();
    let parsed = DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.naive_local())
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"))
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M"));
    match parsed {
        Ok(dt) => dt.format("%-d %B %Y, %H:%M").to_string(),
        Err(_) => raw.to_string(),
    }
}

/// `prayer-times-<date>-<name>.png`, whitespace runs in the name become '-'.
pub fn flyer_filename(date: Option<&str>, name: Option<&str>) -> String {
    let name = name
        .map(|n| n.split_whitespace().collect::<Vec<_>>().join("-"))
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| "flyer".to_string());
    let date = date.map(str::trim).filter(|d| !d.is_empty()).unwrap_or("undated");
    format!("prayer-times-{}-{}.png", date, name)
}

/// Break text into at most two lines at the space nearest its middle once it
/// exceeds `max_chars`. No measurement: long words still overflow.
pub fn split_two_lines(text: &str, max_chars: usize) -> Vec<String> {
    let text = text.trim();
    if text.is_empty() {
        return Vec::new();
    }
    if text.chars().count() <= max_chars {
        return vec![text.to_string()];
    }
    let middle = text.len() / 2;
    let split_at = text
        .char_indices()
        .filter(|(_, c)| *c == ' ')
        .map(|(i, _)| i)
        .min_by_key(|i| i.abs_diff(middle));
    match split_at {
        Some(i) => vec![text[..i].trim().to_string(), text[i..].trim().to_string()],
        None => vec![text.to_string()],
    }
}
