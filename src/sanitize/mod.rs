//! Text sanitization.
//!
//! Turns a raw corpus into a dense, comment-free, single-line character
//! sequence:
//!
//! 1. tabs and line terminators become spaces and comments are stripped
//!    ([`strip_comments`]),
//! 2. runs of spaces collapse to one ([`collapse_spaces`]),
//! 3. spaces next to punctuation and keywords are trimmed ([`trim_tokens`]).
//!
//! Steps 2 and 3 repeat until nothing changes, which makes [`sanitize`]
//! idempotent.

mod comments;
mod rules;

use std::fmt;

pub use comments::strip_comments;
pub use rules::{apply_rule, trim_tokens, Trim, TokenRule, TOKEN_RULES};

/// Sanitized corpus text.
///
/// Holds no comments, no run of two spaces, and no space directly before or
/// after a recognized token.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SanitizedText {
    text: String,
    len: usize,
}

impl SanitizedText {
    /// Number of characters (not bytes). Drives grid layout.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn chars(&self) -> std::str::Chars<'_> {
        self.text.chars()
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

impl fmt::Display for SanitizedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl AsRef<str> for SanitizedText {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

/// Sanitize raw corpus text. Never fails; empty input gives empty output.
pub fn sanitize(raw: &str) -> SanitizedText {
    let mut text = strip_comments(raw);

    loop {
        let next = trim_tokens(&collapse_spaces(&text));
        if next == text {
            break;
        }
        text = next;
    }

    let len = text.chars().count();
    SanitizedText { text, len }
}

/// Collapse every run of spaces into a single space.
pub fn collapse_spaces(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last_was_space = false;

    for c in text.chars() {
        let is_space = c == ' ';
        if !(is_space && last_was_space) {
            out.push(c);
        }
        last_was_space = is_space;
    }

    out
}
