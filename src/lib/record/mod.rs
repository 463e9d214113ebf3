//! Definition records and the loaders for the extracted artifact.
//!
//! The artifact is produced elsewhere; rows are taken as well-formed except
//! for the optional `context` and `cross_refs` columns, which default to empty.

use std::{collections::BTreeSet, fs, io, path::Path};

use color_eyre::{Section, eyre::eyre};
use serde::Deserialize;
use tracing::debug;

use crate::types::{ChapterLabel, Slug};

/// One extracted definition occurrence. Immutable once loaded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DefinitionRecord {
    pub term: String,
    pub slug: Slug,
    pub definition: String,
    pub chapter: ChapterLabel,
    pub page_number: String,
    pub cross_refs: BTreeSet<String>,
    /// Empty means absent.
    pub context: String,
}

impl DefinitionRecord {
    pub fn new(
        term: impl Into<String>,
        definition: impl Into<String>,
        chapter: &str,
        page_number: impl Into<String>,
    ) -> Self {
        let term = term.into();
        Self {
            slug: Slug::from_term(&term),
            term,
            definition: definition.into(),
            chapter: ChapterLabel::parse(chapter),
            page_number: page_number.into(),
            cross_refs: BTreeSet::new(),
            context: String::new(),
        }
    }

    pub fn with_cross_refs<I, S>(mut self, refs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.cross_refs = refs
            .into_iter()
            .map(|r| r.as_ref().trim().to_string())
            .filter(|r| !r.is_empty())
            .collect();
        self
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = context.into();
        self
    }

    pub fn has_context(&self) -> bool {
        !self.context.trim().is_empty()
    }
}

/// Split a semicolon-joined reference list, trimming and dropping blanks.
pub fn split_refs(joined: &str) -> BTreeSet<String> {
    joined
        .split(';')
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

#[derive(Deserialize, Debug)]
struct CsvRow {
    term: String,
    definition: String,
    chapter: String,
    page_number: String,
    #[serde(default)]
    cross_refs: String,
    #[serde(default)]
    context: String,
}

impl From<CsvRow> for DefinitionRecord {
    fn from(row: CsvRow) -> Self {
        DefinitionRecord::new(row.term, row.definition, &row.chapter, row.page_number)
            .with_cross_refs(split_refs(&row.cross_refs))
            .with_context(row.context)
    }
}

#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum JsonRefs {
    List(Vec<String>),
    Joined(String),
}

impl Default for JsonRefs {
    fn default() -> Self {
        Self::List(Vec::new())
    }
}

#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum JsonPage {
    Text(String),
    Number(serde_json::Number),
}

impl Default for JsonPage {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

#[derive(Deserialize, Debug)]
struct JsonRow {
    term: String,
    definition: String,
    chapter: String,
    #[serde(default)]
    page_number: JsonPage,
    #[serde(default)]
    cross_refs: Option<JsonRefs>,
    #[serde(default)]
    context: Option<String>,
}

impl From<JsonRow> for DefinitionRecord {
    fn from(row: JsonRow) -> Self {
        let page = match row.page_number {
            JsonPage::Text(s) => s,
            JsonPage::Number(n) => n.to_string(),
        };
        let refs = match row.cross_refs.unwrap_or_default() {
            JsonRefs::List(list) => list.into_iter().collect(),
            JsonRefs::Joined(joined) => split_refs(&joined),
        };
        DefinitionRecord::new(row.term, row.definition, &row.chapter, page)
            .with_cross_refs(refs)
            .with_context(row.context.unwrap_or_default())
    }
}

#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum JsonArtifact {
    Bare(Vec<JsonRow>),
    Wrapped { entries: Vec<JsonRow> },
}

/// Parse the delimited form of the artifact (header row required).
pub fn parse_csv<R: io::Read>(reader: R) -> color_eyre::Result<Vec<DefinitionRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let mut records = Vec::new();
    for (i, row) in rdr.deserialize::<CsvRow>().enumerate() {
        let row = row.with_note(|| format!("While reading data row {}", i + 1))?;
        records.push(row.into());
    }
    Ok(records)
}

/// Parse the structured form: a bare array, or `{ "entries": [...] }`.
pub fn parse_json(raw: &str) -> color_eyre::Result<Vec<DefinitionRecord>> {
    let artifact: JsonArtifact =
        serde_json::from_str(raw).with_note(|| "While parsing the JSON record artifact")?;
    let rows = match artifact {
        JsonArtifact::Bare(rows) => rows,
        JsonArtifact::Wrapped { entries } => entries,
    };
    Ok(rows.into_iter().map(DefinitionRecord::from).collect())
}

/// Load the record sequence from disk, choosing the format by extension.
pub fn load_records(path: &Path) -> color_eyre::Result<Vec<DefinitionRecord>> {
    let raw = fs::read_to_string(path)
        .with_note(|| format!("While reading {}", path.display()))?;

    let records = match path.extension().and_then(|e| e.to_str()) {
        Some("csv") => parse_csv(raw.as_bytes()),
        Some("json") => parse_json(&raw),
        _ => Err(eyre!("Unsupported record artifact: {}", path.display())),
    }
    .with_note(|| format!("While loading {}", path.display()))?;

    debug!(path = %path.display(), records = records.len(), "loaded record artifact");
    Ok(records)
}
