//! Text processing utilities.
//!
//! This module contains utilities for processing display text, such as
//! finding the parts of an item label that match the current search query.

use log::*;
use regex::{Regex, RegexBuilder};

/// Build a case-insensitive matcher for a literal search query.
///
/// Returns `None` for a blank query.
pub fn query_matcher(query: &str) -> Option<Regex> {
    let query = query.trim();
    if query.is_empty() {
        return None;
    }
    match RegexBuilder::new(&regex::escape(query))
        .case_insensitive(true)
        .build()
    {
        Ok(re) => Some(re),
        Err(e) => {
            warn!("Failed to build matcher for query '{}': {}", query, e);
            None
        }
    }
}

/// Split text into segments, flagging the ones that match.
///
/// Concatenating the segments yields the original text. Without a matcher
/// the whole text is a single unmatched segment.
pub fn highlight_matches<'t>(text: &'t str, matcher: Option<&Regex>) -> Vec<(&'t str, bool)> {
    let re = match matcher {
        Some(re) => re,
        None => return vec![(text, false)],
    };
    let mut segments = Vec::new();
    let mut last = 0;
    for m in re.find_iter(text) {
        if m.start() > last {
            segments.push((&text[last..m.start()], false));
        }
        segments.push((m.as_str(), true));
        last = m.end();
    }
    if last < text.len() || segments.is_empty() {
        segments.push((&text[last..], false));
    }
    segments
}
