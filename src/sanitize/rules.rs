//! Ordered token-adjacent whitespace trimming.
//!
//! Each rule removes one optional space immediately before and (for
//! [`Trim::Both`]) after every occurrence of its token. Rules run in list
//! order and later rules see the output of earlier ones, so the order is
//! part of the behaviour: `!=` runs before `!==`, `=` after `===`, `>=` and
//! `=>`.
//!
//! There is no `<=` or `==` rule. They are still compacted because the `<`
//! and `=` rules trim around their component characters.

/// Which sides of a token lose an adjacent space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trim {
    Both,
    Leading,
}

/// A token and the spaces trimmed around it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenRule {
    pub token: &'static str,
    pub trim: Trim,
}

const fn both(token: &'static str) -> TokenRule {
    TokenRule {
        token,
        trim: Trim::Both,
    }
}

const fn leading(token: &'static str) -> TokenRule {
    TokenRule {
        token,
        trim: Trim::Leading,
    }
}

/// Punctuation and keyword rules in application order.
///
/// Keywords match anywhere, including inside identifiers (`a gif b`
/// becomes `a gifb`). Only glyph density matters downstream.
pub const TOKEN_RULES: &[TokenRule] = &[
    both("*"),
    both("+"),
    both("+="),
    both("-="),
    both("-"),
    both("/"),
    both(";"),
    both(","),
    both(":"),
    both("%"),
    both("!="),
    both("!=="),
    both("==="),
    both(">="),
    both("=>"),
    both("="),
    both("<"),
    both(">"),
    both("&&"),
    both("||"),
    both("|"),
    both("&"),
    both("?"),
    both(")"),
    both("("),
    both("^"),
    both("{"),
    both("}"),
    both("if"),
    both("case"),
    both("for"),
    both("while"),
    leading("return"),
];

/// Apply every rule in [`TOKEN_RULES`] once, in order.
pub fn trim_tokens(text: &str) -> String {
    TOKEN_RULES
        .iter()
        .fold(text.to_string(), |acc, rule| apply_rule(&acc, rule))
}

/// Apply a single rule, scanning left to right over non-overlapping
/// occurrences.
///
/// A space is kept when removing it would join `/` with `/` or `*` and so
/// turn plain text into a comment opener.
pub fn apply_rule(text: &str, rule: &TokenRule) -> String {
    let bytes = text.as_bytes();
    let token = rule.token.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut copied = 0;
    let mut i = 0;

    // Tokens and spaces are ASCII, so every index where a match starts or
    // ends is a char boundary.
    while i < bytes.len() {
        let (start, token_at) = if bytes[i] == b' ' && bytes[i + 1..].starts_with(token) {
            (i, i + 1)
        } else if bytes[i..].starts_with(token) {
            (i, i)
        } else {
            i += 1;
            continue;
        };

        out.push_str(&text[copied..start]);
        if start != token_at && joins_comment_opener(out.as_bytes().last(), token.first()) {
            out.push(' ');
        }
        out.push_str(rule.token);

        let mut end = token_at + token.len();
        if rule.trim == Trim::Both
            && bytes.get(end) == Some(&b' ')
            && !joins_comment_opener(token.last(), bytes.get(end + 1))
        {
            end += 1;
        }

        copied = end;
        i = end;
    }

    out.push_str(&text[copied..]);
    out
}

fn joins_comment_opener(left: Option<&u8>, right: Option<&u8>) -> bool {
    matches!((left, right), (Some(b'/'), Some(b'/' | b'*')))
}
