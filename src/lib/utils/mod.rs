use std::borrow::Cow;

/// HTML-escape text content.
pub fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}

/// HTML-escape attribute values (same rules as text for this codebase).
pub fn escape_attr(s: &str) -> String {
    escape_text(s)
}

/// Canonical identifier for a display term.
///
/// Lowercases, drops everything that is not a word character, whitespace or
/// a hyphen, turns each run of whitespace and hyphens into a single hyphen and
/// trims hyphens from both ends. Total and idempotent; may return an empty
/// string for input made only of punctuation.
pub fn slugify(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut pending_dash = false;

    for ch in input.chars().flat_map(char::to_lowercase) {
        if ch.is_whitespace() || ch == '-' {
            pending_dash = true;
        } else if is_word_char(ch) {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(ch);
        }
    }

    out
}

/// Word characters as understood by `\w`: letters, digits and underscore.
pub fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

/// Percent-encode a single route segment.
pub fn encode_segment(s: &str) -> Cow<'_, str> {
    urlencoding::encode(s)
}

/// Percent-decode a route segment, keeping the raw text when it is malformed.
pub fn decode_segment(s: &str) -> Cow<'_, str> {
    urlencoding::decode(s).unwrap_or(Cow::Borrowed(s))
}

/// Shorten `s` to at most `max` characters. The flag reports whether anything was cut.
pub fn truncate_chars(s: &str, max: usize) -> (&str, bool) {
    match s.char_indices().nth(max) {
        Some((byte, _)) => (&s[..byte], true),
        None => (s, false),
    }
}

#[cfg(test)]
mod tests;
