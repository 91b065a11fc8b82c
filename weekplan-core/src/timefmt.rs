//! Free-form time parsing and normalization.
//!
//! Upstream time strings arrive in several shapes: "08:00-09:00",
//! "8:00 AM - 9:00 AM", "14:30". Normalization strips AM/PM markers, keeps
//! the start of a range, and pads to canonical `HH:MM`. An unparseable
//! input yields `None`; callers keep the original string in that case
//! rather than failing.

/// Strip AM/PM markers and whitespace; for a range, keep the start component.
fn parse_time(raw: &str) -> Option<String> {
    if raw.trim().is_empty() {
        return None;
    }

    // After stripping meridiem markers only digits, ':', '-' and spaces remain,
    // so lowercasing first is harmless.
    let clean = raw.to_ascii_lowercase().replace("am", "").replace("pm", "");
    let clean = clean.trim();

    let start = match clean.split_once('-') {
        Some((start, _)) => start.trim(),
        None => clean,
    };

    if start.is_empty() {
        None
    } else {
        Some(start.to_string())
    }
}

/// Normalize a time (or the start of a time range) to 24-hour `HH:MM`.
///
/// Missing minutes are padded to "00" and single-digit hours are
/// zero-padded. Returns `None` for empty or unparseable input.
pub fn normalize_time(raw: &str) -> Option<String> {
    let parsed = parse_time(raw)?;

    let (hours, minutes) = match parsed.split_once(':') {
        Some((h, m)) => (h, m),
        None => (parsed.as_str(), ""),
    };

    let hour: u32 = hours.trim().parse().ok()?;
    let minutes = minutes.trim();
    let minutes = if minutes.is_empty() { "00" } else { minutes };

    Some(format!("{:02}:{}", hour, minutes))
}

/// Normalize both endpoints of a `start-end` range to `HH:MM-HH:MM`.
///
/// Returns `None` when the input is not a range or either endpoint is
/// unparseable; callers keep the original string then.
pub fn normalize_time_range(raw: &str) -> Option<String> {
    let (start, end) = raw.split_once('-')?;
    let start = normalize_time(start)?;
    let end = normalize_time(end)?;
    Some(format!("{}-{}", start, end))
}
