//! Forward scanner that strips comments and flattens line structure.
//!
//! A single pass over the input with an explicit state. Tabs, vertical tabs,
//! form feeds and line terminators (LF, CR, CRLF) outside comments become
//! one space each, so the result is a single line.

/// Scanner state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Normal,
    LineComment,
    BlockComment,
    /// Inside a double-quoted literal; comment openers are literal text here.
    String,
}

/// Remove `//` line comments and `/* */` block comments.
///
/// A line comment runs up to and including its line terminator. A block
/// comment without a closing `*/` runs to the end of the text. Both are
/// replaced by nothing.
///
/// Double-quoted literals are copied through untouched, so `"http://x"`
/// survives. A literal still open at a line terminator is closed there with
/// an inserted `"`, keeping quote parity stable once the text is a single
/// line. Character literals such as `'"'` and `'/'` are copied verbatim.
pub fn strip_comments(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut state = State::Normal;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let next = chars.get(i + 1).copied();

        match state {
            State::Normal => match (c, next) {
                ('/', Some('/')) => {
                    state = State::LineComment;
                    i += 2;
                }
                ('/', Some('*')) => {
                    state = State::BlockComment;
                    i += 2;
                }
                ('"', _) => {
                    out.push('"');
                    state = State::String;
                    i += 1;
                }
                ('\'', _) => {
                    let len = char_literal_len(&chars[i..]);
                    out.extend(&chars[i..i + len]);
                    i += len;
                }
                _ => i += push_normalized(&mut out, c, next),
            },
            State::String => match c {
                '"' => {
                    out.push('"');
                    state = State::Normal;
                    i += 1;
                }
                '\\' => {
                    out.push('\\');
                    i += 1;
                    if let Some(&escaped) = chars.get(i) {
                        i += push_normalized(&mut out, escaped, chars.get(i + 1).copied());
                    }
                }
                '\n' | '\r' => {
                    out.push('"');
                    state = State::Normal;
                    i += push_normalized(&mut out, c, next);
                }
                _ => i += push_normalized(&mut out, c, next),
            },
            State::LineComment => {
                i += match (c, next) {
                    ('\r', Some('\n')) => 2,
                    _ => 1,
                };
                if c == '\n' || c == '\r' {
                    state = State::Normal;
                }
            }
            State::BlockComment => {
                if c == '*' && next == Some('/') {
                    state = State::Normal;
                    i += 2;
                } else {
                    i += 1;
                }
            }
        }
    }

    out
}

/// Push `c`, turning ASCII layout whitespace into a space.
///
/// Returns how many input characters were consumed (2 for CRLF).
fn push_normalized(out: &mut String, c: char, next: Option<char>) -> usize {
    match (c, next) {
        ('\r', Some('\n')) => {
            out.push(' ');
            2
        }
        ('\t' | '\n' | '\r' | '\x0B' | '\x0C', _) => {
            out.push(' ');
            1
        }
        _ => {
            out.push(c);
            1
        }
    }
}

/// Length of a character literal starting at `chars[0] == '\''`.
///
/// Recognizes `'x'` and `'\x'`; anything else (a lifetime, an apostrophe)
/// is a lone quote of length 1.
fn char_literal_len(chars: &[char]) -> usize {
    match chars {
        ['\'', '\\', c, '\'', ..] if !is_line_break(*c) => 4,
        ['\'', c, '\'', ..] if *c != '\\' && !is_line_break(*c) => 3,
        _ => 1,
    }
}

fn is_line_break(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\t' | '\x0B' | '\x0C')
}
