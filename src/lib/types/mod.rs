//! Shared data types for the dictionary.
//! Implemented as newtypes to enforce invariants.

use std::{borrow::Borrow, fmt};

use serde::Serialize;

use crate::{config::chapter_position, utils::slugify};

/// Canonical term identifier. Always the slugified form of some display term
/// when built with `from_term`; route input is carried verbatim via `raw`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Slug(String);

impl Slug {
    pub fn from_term(term: &str) -> Self {
        Self(slugify(term))
    }

    /// Wrap an already-decoded route segment without normalising it.
    pub fn raw(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Slug {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A chapter label in the form `Chapter <token>: <title>`.
///
/// Labels that do not follow that form use the whole label as both token and
/// title, so every label stays routable.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChapterLabel {
    label: String,
    token_end: Option<(usize, usize)>,
}

impl ChapterLabel {
    pub fn parse(raw: &str) -> Self {
        let label = raw.trim().to_string();
        let token_end = label.strip_prefix("Chapter ").and_then(|rest| {
            let sep = rest.find(':')?;
            let token = rest[..sep].trim();
            if token.is_empty() || token.contains(char::is_whitespace) {
                return None;
            }
            let start = "Chapter ".len();
            Some((start, start + sep))
        });
        Self { label, token_end }
    }

    pub fn as_str(&self) -> &str {
        &self.label
    }

    /// Ordinal token: a roman numeral, `Intro`, or a number.
    pub fn token(&self) -> &str {
        match self.token_end {
            Some((start, end)) => self.label[start..end].trim(),
            None => &self.label,
        }
    }

    pub fn title(&self) -> &str {
        match self.token_end {
            Some((_, end)) => self.label[end + 1..].trim(),
            None => &self.label,
        }
    }

    /// Position in the canonical chapter sequence, if the token is known.
    pub fn position(&self) -> Option<usize> {
        chapter_position(self.token())
    }
}

impl fmt::Display for ChapterLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

/// Identifier of a configured book, or an arbitrary id taken from a route.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BookId(String);

impl BookId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
