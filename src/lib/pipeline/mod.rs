use std::{
    fs,
    path::{Path, PathBuf},
};

use color_eyre::{Section, eyre::eyre};
use itertools::Itertools;
use minify_html::{Cfg, minify};
use rayon::prelude::*;
use tracing::{debug, info};

use crate::{
    config::{BOOKS, INPUT_FILES, OUTPUT_DIR, PAGE_FILE, STYLESHEET},
    css::load_stylesheet,
    index::Dictionary,
    record::{DefinitionRecord, load_records},
    router::{AppState, Page, breadcrumb},
    templates::{ClientData, page_shell},
    types::BookId,
    view::{export_region, header},
};

/// Route key of the region shown for book ids outside the configured table.
pub const UNKNOWN_BOOK_ROUTE: &str = "book/*";

/// Build once into OUTPUT_DIR using current working directory.
pub fn build_once() -> color_eyre::Result<()> {
    let root =
        std::env::current_dir().with_note(|| "While getting the current working directory")?;
    build_at(&root)
}

pub fn build_at(root: &Path) -> color_eyre::Result<()> {
    let ctx = BuildCtx::load_at(root)?;
    fs::create_dir_all(&ctx.output_dir)?;

    Pipeline::new(ctx).load()?.index()?.render()?.emit()
}

/// First artifact in `INPUT_FILES` present under `root`.
pub fn artifact_path(root: &Path) -> color_eyre::Result<PathBuf> {
    INPUT_FILES
        .iter()
        .map(|name| root.join(name))
        .find(|p| p.is_file())
        .ok_or_else(|| eyre!("No dictionary artifact found in {}", root.display()))
        .with_note(|| format!("Expected one of: {}", INPUT_FILES.join(", ")))
}

/// Load the artifact under `root` and build the application context.
pub fn load_dictionary(root: &Path) -> color_eyre::Result<Dictionary> {
    let records = load_records(&artifact_path(root)?)?;
    Ok(Dictionary::new(records))
}

struct BuildCtx {
    current_dir: PathBuf,
    output_dir: PathBuf,
    head_html: String,
    footer_html: String,
    min_cfg: Cfg,
}

impl BuildCtx {
    fn load_at(root: &Path) -> color_eyre::Result<Self> {
        let current_dir = root.to_path_buf();
        let output_dir = current_dir.join(OUTPUT_DIR);

        let head_html = fs::read_to_string(current_dir.join("header").with_extension("html"))
            .unwrap_or_default();
        let footer_html = fs::read_to_string(current_dir.join("footer").with_extension("html"))
            .unwrap_or_default();

        Ok(Self {
            current_dir,
            output_dir,
            head_html,
            footer_html,
            min_cfg: Cfg::new(),
        })
    }
}

fn state_for(page: Page, dict: &Dictionary) -> AppState {
    AppState {
        crumbs: breadcrumb(&page, dict),
        page,
        ..AppState::default()
    }
}

fn region_html(dict: &Dictionary, page: Page) -> String {
    let key = page.route_key();
    let state = state_for(page, dict);
    export_region(dict, &state, &key).render()
}

/// Every reachable page state, each as one tagged region, in a fixed order:
/// home, books, the unknown-book fallback, chapters, then terms.
fn render_regions(dict: &Dictionary) -> String {
    let index = dict.index();
    let mut out = region_html(dict, Page::Home);

    for spec in &BOOKS {
        out.push_str(&region_html(dict, Page::Book(BookId::new(spec.id))));
    }
    let unknown = state_for(Page::Book(BookId::new("")), dict);
    out.push_str(&export_region(dict, &unknown, UNKNOWN_BOOK_ROUTE).render());

    for label in index.chapter_order().iter().unique_by(|l| l.token().to_string()) {
        out.push_str(&region_html(dict, Page::Chapter(label.clone())));
    }

    let terms: Vec<String> = index
        .search_index()
        .par_iter()
        .map(|e| region_html(dict, Page::Term(e.slug.clone())))
        .collect();
    debug!(terms = terms.len(), "term regions rendered");
    out.extend(terms);
    out
}

fn render_page(ctx: &BuildCtx, dict: &Dictionary) -> color_eyre::Result<String> {
    let body_header = header(dict, &AppState::default()).render();
    let regions = render_regions(dict);
    let data = ClientData::new(dict.index().search_index()).to_script_json()?;

    Ok(page_shell(
        &dict.site().title,
        &ctx.head_html,
        &body_header,
        &regions,
        &ctx.footer_html,
        &data,
    ))
}

trait PipelineStage {}
/// Pipeline typestate driver
struct Pipeline<S: PipelineStage> {
    ctx: BuildCtx,
    state: S,
}

impl PipelineStage for () {}
struct Loaded(Vec<DefinitionRecord>);
impl PipelineStage for Loaded {}
struct Indexed(Dictionary);
impl PipelineStage for Indexed {}
struct Rendered {
    page: String,
    stylesheet: String,
}
impl PipelineStage for Rendered {}

// initial state
impl Pipeline<()> {
    fn new(ctx: BuildCtx) -> Self {
        Self { ctx, state: () }
    }

    fn load(self) -> color_eyre::Result<Pipeline<Loaded>> {
        let path = artifact_path(&self.ctx.current_dir)?;
        let records = load_records(&path)?;
        if records.is_empty() {
            return Err(eyre!("{} contains no definitions", path.display()));
        }
        Ok(Pipeline {
            ctx: self.ctx,
            state: Loaded(records),
        })
    }
}

impl Pipeline<Loaded> {
    fn index(self) -> color_eyre::Result<Pipeline<Indexed>> {
        let dict = Dictionary::new(self.state.0);
        let index = dict.index();
        info!(
            records = index.records().len(),
            terms = index.search_index().len(),
            chapters = index.chapter_order().len(),
            unresolved_refs = dict.unresolved_refs(),
            "dictionary indexed"
        );
        Ok(Pipeline {
            ctx: self.ctx,
            state: Indexed(dict),
        })
    }
}

impl Pipeline<Indexed> {
    fn render(self) -> color_eyre::Result<Pipeline<Rendered>> {
        let page = render_page(&self.ctx, &self.state.0)?;
        let stylesheet = load_stylesheet(&self.ctx.current_dir)?;
        Ok(Pipeline {
            ctx: self.ctx,
            state: Rendered { page, stylesheet },
        })
    }
}

impl Pipeline<Rendered> {
    fn emit(self) -> color_eyre::Result<()> {
        let page_path = self.ctx.output_dir.join(PAGE_FILE);
        fs::write(&page_path, minify(self.state.page.as_bytes(), &self.ctx.min_cfg))
            .with_note(|| format!("While writing {}", page_path.display()))?;
        fs::write(self.ctx.output_dir.join(STYLESHEET), self.state.stylesheet)?;
        info!(output = %page_path.display(), "site written");
        Ok(())
    }
}
