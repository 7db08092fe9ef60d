//! Presentation helpers used by views and feeds.

use chrono::{DateTime, Utc};

/// Human readable date, e.g. `January 05, 2024`.
pub fn local_date(date: &DateTime<Utc>) -> String {
    date.format("%B %d, %Y").to_string()
}

/// Cut `text` to `max_chars` characters and mark the cut with `...`.
pub fn shorten(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
