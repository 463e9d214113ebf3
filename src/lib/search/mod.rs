//! Ranked prefix/substring search over the distinct-term list.

use serde::Serialize;

use crate::{
    config::SEARCH_LIMIT,
    index::{Index, SearchEntry},
    types::Slug,
};

/// Prefix matches rank above plain substring matches.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum MatchRank {
    Prefix,
    Substring,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RankedResult {
    pub slug: Slug,
    pub term: String,
    pub chapter: String,
    pub rank: MatchRank,
    /// Byte range of the first case-insensitive occurrence of the query in `term`.
    pub highlight: Option<(usize, usize)>,
}

impl RankedResult {
    /// `term` split around the highlighted range.
    pub fn segments(&self) -> (&str, &str, &str) {
        match self.highlight {
            Some((start, end)) => (&self.term[..start], &self.term[start..end], &self.term[end..]),
            None => (self.term.as_str(), "", ""),
        }
    }
}

/// "No search active" is distinct from "zero matches".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SearchOutcome {
    #[default]
    Inactive,
    Results(Vec<RankedResult>),
}

impl SearchOutcome {
    pub fn results(&self) -> &[RankedResult] {
        match self {
            SearchOutcome::Inactive => &[],
            SearchOutcome::Results(r) => r,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, SearchOutcome::Results(_))
    }
}

pub fn search(query: &str, index: &Index) -> SearchOutcome {
    search_with_limit(query, index.search_index(), SEARCH_LIMIT)
}

pub fn search_with_limit(query: &str, entries: &[SearchEntry], limit: usize) -> SearchOutcome {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return SearchOutcome::Inactive;
    }

    let mut ranked: Vec<(MatchRank, String, &SearchEntry)> = entries
        .iter()
        .filter_map(|e| {
            let lower = e.term.to_lowercase();
            let rank = if lower.starts_with(&needle) {
                MatchRank::Prefix
            } else if lower.contains(&needle) {
                MatchRank::Substring
            } else {
                return None;
            };
            Some((rank, lower, e))
        })
        .collect();

    ranked.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));

    SearchOutcome::Results(
        ranked
            .into_iter()
            .take(limit)
            .map(|(rank, _, e)| RankedResult {
                slug: e.slug.clone(),
                term: e.term.clone(),
                chapter: e.chapter.clone(),
                rank,
                highlight: locate(&e.term, &needle),
            })
            .collect(),
    )
}

/// Byte range in `term` of the first case-insensitive occurrence of the
/// already-lowercased `needle`. `None` when lowercasing changes the
/// character count and the range cannot be mapped back.
pub fn locate(term: &str, needle: &str) -> Option<(usize, usize)> {
    let lower = term.to_lowercase();
    if lower.chars().count() != term.chars().count() {
        return None;
    }
    let byte_start = lower.find(needle)?;
    let char_start = lower[..byte_start].chars().count();
    let char_len = needle.chars().count();

    let mut offsets = term.char_indices().map(|(i, _)| i).chain([term.len()]);
    let start = offsets.nth(char_start)?;
    let end = if char_len == 0 {
        start
    } else {
        offsets.nth(char_len - 1)?
    };
    Some((start, end))
}
