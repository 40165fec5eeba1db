//! Delimited-span scanning over song text.
//!
//! Both marker grammars (chord markers and key-change directives) are a
//! pair of caller-supplied delimiter patterns. A marker's content runs from
//! the end of an opening match to the start of the next closing match, so
//! content never contains a closing delimiter.

use regex::Regex;

/// A marker span located in song text.
///
/// `start..end` covers the whole marker including both delimiters;
/// `inner_start..inner_end` covers just the content between them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Marker {
    pub start: usize,
    pub end: usize,
    pub inner_start: usize,
    pub inner_end: usize,
}

impl Marker {
    /// Content between the delimiters.
    pub fn inner<'a>(&self, text: &'a str) -> &'a str {
        &text[self.inner_start..self.inner_end]
    }
}

/// Find every `pre ... post` span in `text`, left to right.
///
/// An opening delimiter with no closing delimiter after it is not a marker.
pub(crate) fn find_markers(text: &str, pre: &Regex, post: &Regex) -> Vec<Marker> {
    let mut markers = Vec::new();
    let mut at = 0;
    while at <= text.len() {
        let Some(open) = pre.find_at(text, at) else {
            break;
        };
        let Some(close) = post.find(&text[open.end()..]) else {
            break;
        };
        let marker = Marker {
            start: open.start(),
            end: open.end() + close.end(),
            inner_start: open.end(),
            inner_end: open.end() + close.start(),
        };
        // Zero-width delimiter patterns would stall the cursor.
        if marker.end <= at {
            break;
        }
        at = marker.end;
        markers.push(marker);
    }
    markers
}
