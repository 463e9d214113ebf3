//! Read-only projections over the loaded record sequence.

use std::collections::HashMap;

use serde::Serialize;

use crate::{
    config::{BOOKS, BookSpec, DEFAULT_BOOK, SiteMeta, book_spec, site_meta},
    record::DefinitionRecord,
    types::{ChapterLabel, Slug},
};

/// One row of the flattened term list used by search.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SearchEntry {
    pub slug: Slug,
    pub term: String,
    pub chapter: String,
}

/// Lookup structures built once from the records.
#[derive(Debug)]
pub struct Index {
    records: Vec<DefinitionRecord>,
    by_slug: HashMap<Slug, Vec<usize>>,
    by_chapter: HashMap<ChapterLabel, Vec<usize>>,
    chapter_order: Vec<ChapterLabel>,
    search_index: Vec<SearchEntry>,
}

pub fn build_index(records: Vec<DefinitionRecord>) -> Index {
    let mut by_slug: HashMap<Slug, Vec<usize>> = HashMap::new();
    let mut by_chapter: HashMap<ChapterLabel, Vec<usize>> = HashMap::new();
    let mut chapter_order: Vec<ChapterLabel> = Vec::new();
    let mut search_index: Vec<SearchEntry> = Vec::new();

    for (i, record) in records.iter().enumerate() {
        let slug_bucket = by_slug.entry(record.slug.clone()).or_default();
        if slug_bucket.is_empty() {
            search_index.push(SearchEntry {
                slug: record.slug.clone(),
                term: record.term.clone(),
                chapter: record.chapter.as_str().to_string(),
            });
        }
        slug_bucket.push(i);

        let chapter_bucket = by_chapter.entry(record.chapter.clone()).or_default();
        if chapter_bucket.is_empty() {
            chapter_order.push(record.chapter.clone());
        }
        chapter_bucket.push(i);
    }

    // Stable sorts: encounter order breaks ties.
    chapter_order.sort_by_key(|c| c.position().unwrap_or(usize::MAX));
    search_index.sort_by_cached_key(|e| e.term.to_lowercase());

    Index {
        records,
        by_slug,
        by_chapter,
        chapter_order,
        search_index,
    }
}

impl Index {
    pub fn records(&self) -> &[DefinitionRecord] {
        &self.records
    }

    /// All records sharing `slug`, in input order. Empty when unknown.
    pub fn by_slug(&self, slug: &str) -> Vec<&DefinitionRecord> {
        self.collect(self.by_slug.get(slug))
    }

    pub fn contains_slug(&self, slug: &str) -> bool {
        self.by_slug.contains_key(slug)
    }

    /// All records of a chapter, in input order. Empty when unknown.
    pub fn by_chapter(&self, chapter: &ChapterLabel) -> Vec<&DefinitionRecord> {
        self.collect(self.by_chapter.get(chapter))
    }

    pub fn chapter_len(&self, chapter: &ChapterLabel) -> usize {
        self.by_chapter.get(chapter).map_or(0, Vec::len)
    }

    pub fn chapter_order(&self) -> &[ChapterLabel] {
        &self.chapter_order
    }

    pub fn search_index(&self) -> &[SearchEntry] {
        &self.search_index
    }

    /// First chapter in canonical order carrying `token`.
    pub fn chapter_by_token(&self, token: &str) -> Option<&ChapterLabel> {
        self.chapter_order.iter().find(|c| c.token() == token)
    }

    /// Chapters whose token belongs to `book_id`, in canonical order.
    pub fn chapters_of_book(&self, book_id: &str) -> Vec<&ChapterLabel> {
        self.chapter_order
            .iter()
            .filter(|c| book_of(c.token()).id == book_id)
            .collect()
    }

    pub fn definitions_in_book(&self, book_id: &str) -> usize {
        self.chapters_of_book(book_id)
            .into_iter()
            .map(|c| self.chapter_len(c))
            .sum()
    }

    fn collect(&self, positions: Option<&Vec<usize>>) -> Vec<&DefinitionRecord> {
        positions
            .map(|ps| ps.iter().map(|&i| &self.records[i]).collect())
            .unwrap_or_default()
    }
}

/// Book owning a chapter token, falling back to `DEFAULT_BOOK`.
pub fn book_of(token: &str) -> &'static BookSpec {
    BOOKS
        .iter()
        .find(|b| b.contains(token))
        .or_else(|| book_spec(DEFAULT_BOOK))
        .unwrap_or(&BOOKS[0])
}

/// Application context: the index plus site metadata, built once and shared
/// by reference with the router and the views.
#[derive(Debug)]
pub struct Dictionary {
    index: Index,
    site: SiteMeta,
}

impl Dictionary {
    pub fn new(records: Vec<DefinitionRecord>) -> Self {
        Self {
            index: build_index(records),
            site: site_meta(),
        }
    }

    pub fn index(&self) -> &Index {
        &self.index
    }

    pub fn site(&self) -> &SiteMeta {
        &self.site
    }

    /// Number of declared cross-references that name no known slug.
    pub fn unresolved_refs(&self) -> usize {
        self.index
            .records()
            .iter()
            .flat_map(|r| r.cross_refs.iter())
            .filter(|r| !self.index.contains_slug(Slug::from_term(r).as_str()))
            .count()
    }
}

#[cfg(test)]
mod tests;
