use std::{fs, path::Path};

use color_eyre::{Section, eyre::eyre};
use lightningcss::{
    printer::PrinterOptions,
    stylesheet::{MinifyOptions, ParserOptions, StyleSheet},
};
use tracing::debug;

use crate::config::STYLESHEET;

pub const DEFAULT_CSS: &str = r#"
:root {
  --ink: #2b2118;
  --paper: #faf6ee;
  --muted: #7a6a58;
  --accent: #8b2e16;
  --rule: #e4dccb;
  --card: #fffdf8;
}
* { box-sizing: border-box; }
body {
  margin: 0;
  font-family: Georgia, "Times New Roman", serif;
  color: var(--ink);
  background: var(--paper);
  line-height: 1.6;
}
a { color: var(--accent); text-decoration: none; }
a:hover { text-decoration: underline; }
header {
  position: sticky;
  top: 0;
  z-index: 10;
  background: var(--ink);
  color: var(--paper);
}
.header-inner {
  max-width: 960px;
  margin: 0 auto;
  padding: 0.75rem 1.25rem;
  display: flex;
  align-items: center;
  gap: 0.75rem;
}
.site-title { color: var(--paper); font-weight: bold; white-space: nowrap; }
.header-sep { opacity: 0.4; }
.breadcrumb { flex: 1; font-size: 0.9rem; overflow: hidden; white-space: nowrap; text-overflow: ellipsis; }
.breadcrumb a { color: #e9d9b8; }
.breadcrumb .sep { margin: 0 0.4rem; opacity: 0.5; }
.search { position: relative; width: 16rem; }
.search input {
  width: 100%;
  padding: 0.35rem 0.6rem;
  border: 1px solid var(--muted);
  border-radius: 4px;
  font: inherit;
}
.search-results {
  display: none;
  position: absolute;
  right: 0;
  left: 0;
  top: 2.4rem;
  max-height: 24rem;
  overflow-y: auto;
  background: var(--card);
  color: var(--ink);
  border: 1px solid var(--rule);
  border-radius: 4px;
  box-shadow: 0 6px 18px rgba(0, 0, 0, 0.15);
}
.search-results.open { display: block; }
.search-list { list-style: none; margin: 0; padding: 0; }
.search-result a { display: block; padding: 0.45rem 0.7rem; color: inherit; }
.search-result.focused, .search-result:hover { background: var(--rule); }
.result-term { display: block; }
.result-term mark { background: #f1d48a; color: inherit; }
.result-chapter { display: block; font-size: 0.78rem; color: var(--muted); }
.search-empty { padding: 0.6rem 0.7rem; color: var(--muted); font-style: italic; }
main { max-width: 960px; margin: 0 auto; padding: 2rem 1.25rem 4rem; }
.page { display: none; }
.page.active { display: block; }
template { display: none; }
.page-title { margin: 0.25rem 0; font-size: 2rem; }
.page-subtitle { margin: 0 0 1.5rem; color: var(--muted); }
.back-btn { display: inline-block; margin-bottom: 1rem; font-size: 0.9rem; }
.empty { color: var(--muted); font-style: italic; }
.book-grid, .chapter-grid {
  display: grid;
  grid-template-columns: repeat(auto-fill, minmax(14rem, 1fr));
  gap: 1rem;
}
.book-card, .chapter-card {
  display: block;
  padding: 1rem 1.1rem;
  background: var(--card);
  border: 1px solid var(--rule);
  border-radius: 6px;
  color: inherit;
}
.book-card h3 { margin: 0; }
.book-card.disabled { opacity: 0.5; }
.book-sub { margin: 0.2rem 0; font-style: italic; }
.book-count { margin: 0; font-size: 0.85rem; color: var(--muted); }
.chapter-card span { display: block; }
.chapter-num { font-size: 0.8rem; color: var(--muted); }
.chapter-count { font-size: 0.8rem; color: var(--accent); }
.def-list { list-style: none; margin: 0; padding: 0; }
.def-item { display: block; padding: 0.8rem 0; border-bottom: 1px solid var(--rule); color: inherit; }
.def-term { font-weight: bold; color: var(--accent); }
.def-preview { font-size: 0.9rem; color: var(--muted); }
.term-heading { font-size: 2.2rem; margin: 0 0 0.5rem; }
.def-block {
  margin: 1rem 0;
  padding: 1rem 1.2rem;
  background: var(--card);
  border-left: 3px solid var(--accent);
}
.def-chapter-label {
  display: flex;
  justify-content: space-between;
  font-size: 0.85rem;
  color: var(--muted);
}
.def-body { margin-top: 0.5rem; }
.def-context { margin-top: 0.6rem; font-size: 0.9rem; font-style: italic; color: var(--muted); }
.term-link { border-bottom: 1px dotted var(--accent); }
.see-also { margin-top: 2rem; }
.see-also-links { display: flex; flex-wrap: wrap; gap: 0.5rem; }
.see-also-link {
  padding: 0.2rem 0.6rem;
  border: 1px solid var(--rule);
  border-radius: 999px;
  background: var(--card);
}
"#;

/// Minify a stylesheet; `filename` only labels parse errors.
pub fn build_css(raw: &str, filename: &str) -> color_eyre::Result<String> {
    let mut stylesheet = StyleSheet::parse(
        raw,
        ParserOptions {
            filename: filename.to_string(),
            ..Default::default()
        },
    )
    .map_err(|e| eyre!(e.to_string()))?;

    stylesheet
        .minify(MinifyOptions::default())
        .map_err(|e| eyre!(e.to_string()))?;

    let res = stylesheet
        .to_css(PrinterOptions {
            minify: true,
            ..Default::default()
        })
        .map_err(|e| eyre!(e.to_string()))?;

    Ok(res.code)
}

/// The project's `style.css` when present, otherwise the built-in sheet.
pub fn load_stylesheet(root: &Path) -> color_eyre::Result<String> {
    let path = root.join(STYLESHEET);
    if !path.exists() {
        return build_css(DEFAULT_CSS, "default.css");
    }
    debug!(path = %path.display(), "using stylesheet override");
    let raw = fs::read_to_string(&path)
        .with_note(|| format!("While reading {}", path.display()))?;
    build_css(&raw, &path.to_string_lossy())
}
