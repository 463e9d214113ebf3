//! Cross-reference resolution inside definition bodies.
//!
//! `resolve_spans` is the pure interval algorithm: longest reference first,
//! whole-word and case-insensitive, and a span is accepted only if it overlaps
//! no span accepted before it. `linkify` turns the accepted spans into markup.

use regex::RegexBuilder;
use tracing::trace;

use crate::{
    index::Index,
    markup::{Element, Node},
    types::Slug,
    utils::encode_segment,
};

/// One accepted occurrence `[start, end)` of a reference term.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Span<'t, 'r> {
    pub start: usize,
    pub end: usize,
    /// Text as it appears in the body, original casing.
    pub matched: &'t str,
    /// The reference term that produced the match.
    pub reference: &'r str,
}

impl Span<'_, '_> {
    fn overlaps(&self, start: usize, end: usize) -> bool {
        start < self.end && end > self.start
    }
}

pub fn resolve_spans<'t, 'r, I>(text: &'t str, refs: I) -> Vec<Span<'t, 'r>>
where
    I: IntoIterator<Item = &'r str>,
{
    let mut ordered: Vec<&'r str> = refs.into_iter().filter(|r| !r.trim().is_empty()).collect();
    ordered.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()));

    let mut spans: Vec<Span<'t, 'r>> = Vec::new();
    for reference in ordered {
        let pattern = format!(r"\b{}\b", regex::escape(reference));
        let Ok(re) = RegexBuilder::new(&pattern).case_insensitive(true).build() else {
            trace!(reference, "reference does not compile to a pattern");
            continue;
        };

        for m in re.find_iter(text) {
            if m.start() == m.end() || spans.iter().any(|s| s.overlaps(m.start(), m.end())) {
                continue;
            }
            spans.push(Span {
                start: m.start(),
                end: m.end(),
                matched: m.as_str(),
                reference,
            });
        }
    }

    spans.sort_by_key(|s| s.start);
    spans
}

/// Route fragment for a term page.
pub fn term_href(slug: &Slug) -> String {
    format!("#/term/{}", encode_segment(slug.as_str()))
}

/// Render `text` with every resolvable reference turned into a term link.
/// References whose slug is unknown stay as plain text.
pub fn linkify<'r, I>(text: &str, refs: I, index: &Index) -> Node
where
    I: IntoIterator<Item = &'r str>,
{
    let spans = resolve_spans(text, refs);
    if spans.is_empty() {
        return Node::text(text);
    }

    let mut nodes = Vec::with_capacity(spans.len() * 2 + 1);
    let mut last = 0;
    for span in spans {
        if span.start > last {
            nodes.push(Node::text(&text[last..span.start]));
        }
        let slug = Slug::from_term(span.reference);
        if index.contains_slug(slug.as_str()) {
            nodes.push(
                Element::new("a")
                    .class("term-link")
                    .attr("href", term_href(&slug))
                    .text(span.matched)
                    .into(),
            );
        } else {
            nodes.push(Node::text(span.matched));
        }
        last = span.end;
    }
    if last < text.len() {
        nodes.push(Node::text(&text[last..]));
    }

    Node::Fragment(nodes)
}

#[cfg(test)]
mod tests;
