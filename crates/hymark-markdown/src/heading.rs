//! Heading anchor generation.

use std::collections::HashMap;

use pulldown_cmark::{CowStr, Event, Tag, TagEnd};

/// Fallback anchor for headings whose text has no slug characters.
const FALLBACK_ID: &str = "heading";

/// Convert text to URL-safe slug.
///
/// ```
/// use hymark_markdown::slugify;
///
/// assert_eq!(slugify("Hello World"), "hello-world");
/// assert_eq!(slugify("What's New?"), "whats-new");
/// ```
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut result = String::new();
    let mut last_was_dash = true; // Prevents leading dash

    for c in text.trim().chars() {
        if c.is_ascii_alphanumeric() {
            result.push(c.to_ascii_lowercase());
            last_was_dash = false;
        } else if !last_was_dash && (c.is_whitespace() || c == '-' || c == '_') {
            result.push('-');
            last_was_dash = true;
        }
    }

    if result.ends_with('-') {
        result.pop();
    }

    result
}

/// Unique heading ID generator for one document.
#[derive(Default)]
struct HeadingIds {
    counts: HashMap<String, usize>,
}

impl HeadingIds {
    fn next(&mut self, text: &str) -> String {
        let mut base_id = slugify(text);
        if base_id.is_empty() {
            FALLBACK_ID.clone_into(&mut base_id);
        }
        let count = self.counts.entry(base_id.clone()).or_default();
        let id = match *count {
            0 => base_id,
            n => format!("{base_id}-{n}"),
        };
        *count += 1;
        id
    }
}

/// Give every heading without an explicit ID a unique slug ID.
///
/// The slug is built from the heading's plain text (text and inline code).
pub(crate) fn assign_heading_ids(events: &mut [Event<'_>]) {
    let mut ids = HeadingIds::default();
    let mut i = 0;
    while i < events.len() {
        if matches!(events[i], Event::Start(Tag::Heading { .. })) {
            let mut text = String::new();
            let mut end = i + 1;
            while end < events.len() && !matches!(events[end], Event::End(TagEnd::Heading(_))) {
                if let Event::Text(t) | Event::Code(t) = &events[end] {
                    text.push_str(t);
                }
                end += 1;
            }

            if let Event::Start(Tag::Heading { id: slot, .. }) = &mut events[i]
                && slot.is_none()
            {
                *slot = Some(CowStr::from(ids.next(&text)));
            }
            i = end;
        }
        i += 1;
    }
}
