//! Hash-route parsing and the page/search state machine.
//!
//! `reduce` is pure: it takes the current state and one event and returns the
//! next state. Rendering lives in `view` and reads the state afterwards.

use tracing::debug;

use crate::{
    config::{DEFAULT_BOOK, book_spec},
    index::{Dictionary, book_of},
    search::{SearchOutcome, search},
    types::{BookId, ChapterLabel, Slug},
    utils::{decode_segment, encode_segment},
};

/// A route as written in the location fragment, not yet checked against data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    Home,
    Book(String),
    Chapter(String),
    Term(String),
}

/// Parse a fragment path such as `#/term/natural-law`. Empty segments are
/// dropped; everything after `term/` is rejoined so encoded slashes survive.
pub fn parse_route(path: &str) -> Route {
    let path = path.strip_prefix('#').unwrap_or(path);
    let parts: Vec<&str> = path.split('/').filter(|p| !p.is_empty()).collect();

    match parts.as_slice() {
        ["book", rest @ ..] => Route::Book(
            rest.first()
                .map(|id| decode_segment(id).into_owned())
                .unwrap_or_else(|| DEFAULT_BOOK.to_string()),
        ),
        ["chapter", rest @ ..] => Route::Chapter(
            rest.first()
                .map(|t| decode_segment(t).into_owned())
                .unwrap_or_default(),
        ),
        ["term", rest @ ..] => Route::Term(decode_segment(&rest.join("/")).into_owned()),
        _ => Route::Home,
    }
}

/// The four page kinds. Chapter and term pages always refer to data that exists.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Page {
    #[default]
    Home,
    Book(BookId),
    Chapter(ChapterLabel),
    Term(Slug),
}

/// Page regions; exactly one is active at a time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Region {
    Home,
    Book,
    Chapter,
    Term,
}

impl Region {
    #[cfg(test)]
    pub const ALL: [Region; 4] = [Region::Home, Region::Book, Region::Chapter, Region::Term];

    pub fn id(self) -> &'static str {
        match self {
            Region::Home => "page-home",
            Region::Book => "page-book",
            Region::Chapter => "page-chapter",
            Region::Term => "page-term",
        }
    }
}

impl Page {
    pub fn region(&self) -> Region {
        match self {
            Page::Home => Region::Home,
            Page::Book(_) => Region::Book,
            Page::Chapter(_) => Region::Chapter,
            Page::Term(_) => Region::Term,
        }
    }

    /// Decoded route key, e.g. `term/natural-law`; empty for Home.
    pub fn route_key(&self) -> String {
        match self {
            Page::Home => String::new(),
            Page::Book(id) => format!("book/{id}"),
            Page::Chapter(label) => format!("chapter/{}", label.token()),
            Page::Term(slug) => format!("term/{slug}"),
        }
    }

    /// Fragment href, e.g. `#/term/natural-law`.
    pub fn href(&self) -> String {
        match self {
            Page::Home => "#/".to_string(),
            Page::Book(id) => format!("#/book/{}", encode_segment(id.as_str())),
            Page::Chapter(label) => format!("#/chapter/{}", encode_segment(label.token())),
            Page::Term(slug) => format!("#/term/{}", encode_segment(slug.as_str())),
        }
    }
}

/// Check a parsed route against the data. Unknown chapters and slugs fall
/// back to Home; unknown book ids are kept and render an empty book.
pub fn resolve(route: Route, dict: &Dictionary) -> Page {
    let index = dict.index();
    match route {
        Route::Home => Page::Home,
        Route::Book(id) => Page::Book(BookId::new(id)),
        Route::Chapter(token) => match index.chapter_by_token(&token) {
            Some(label) => Page::Chapter(label.clone()),
            None => {
                debug!(token, "unknown chapter token, showing home");
                Page::Home
            }
        },
        Route::Term(slug) => {
            if index.contains_slug(&slug) {
                Page::Term(Slug::raw(slug))
            } else {
                debug!(slug, "unknown term slug, showing home");
                Page::Home
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Crumb {
    pub label: String,
    pub href: String,
}

fn book_crumb(book_id: &str, with_title: bool) -> Crumb {
    let label = match (book_spec(book_id), with_title) {
        (Some(spec), true) => format!("Book {}: {}", spec.id, spec.title),
        _ => format!("Book {book_id}"),
    };
    Crumb {
        label,
        href: Page::Book(BookId::new(book_id)).href(),
    }
}

/// Breadcrumb trail for a page, recomputed from scratch. The last crumb is
/// the current page.
pub fn breadcrumb(page: &Page, dict: &Dictionary) -> Vec<Crumb> {
    match page {
        Page::Home => Vec::new(),
        Page::Book(id) => vec![book_crumb(id.as_str(), true)],
        Page::Chapter(label) => vec![
            book_crumb(book_of(label.token()).id, false),
            Crumb {
                label: format!("Ch. {}: {}", label.token(), label.title()),
                href: page.href(),
            },
        ],
        Page::Term(slug) => {
            let Some(first) = dict.index().by_slug(slug.as_str()).into_iter().next() else {
                return Vec::new();
            };
            let chapter = &first.chapter;
            vec![
                book_crumb(book_of(chapter.token()).id, false),
                Crumb {
                    label: format!("Ch. {}", chapter.token()),
                    href: Page::Chapter(chapter.clone()).href(),
                },
                Crumb {
                    label: first.term.clone(),
                    href: page.href(),
                },
            ]
        }
    }
}

#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    Enter,
    Escape,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// The location fragment changed.
    Navigate(String),
    /// The search input now holds this text.
    Input(String),
    Key(Key),
    /// A result row was clicked.
    Select(usize),
    /// A click landed outside the search control.
    ClickOutside,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchPanel {
    pub query: String,
    pub outcome: SearchOutcome,
    pub open: bool,
    pub cursor: Option<usize>,
}

impl SearchPanel {
    fn close(&mut self) {
        self.open = false;
        self.cursor = None;
    }

    fn clear(&mut self) {
        *self = Self::default();
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppState {
    pub page: Page,
    pub crumbs: Vec<Crumb>,
    pub search: SearchPanel,
}

impl AppState {
    /// State for an initial fragment, before any other event.
    pub fn at(path: &str, dict: &Dictionary) -> Self {
        reduce(dict, Self::default(), Event::Navigate(path.to_string()))
    }
}

pub fn reduce(dict: &Dictionary, mut state: AppState, event: Event) -> AppState {
    match event {
        Event::Navigate(path) => {
            state.page = resolve(parse_route(&path), dict);
            state.crumbs = breadcrumb(&state.page, dict);
            state.search.close();
        }
        Event::Input(query) => {
            state.search.outcome = search(&query, dict.index());
            state.search.open = state.search.outcome.is_active();
            state.search.cursor = None;
            state.search.query = query;
        }
        Event::Key(key) => return on_key(dict, state, key),
        Event::Select(i) => return open_result(dict, state, i),
        Event::ClickOutside => state.search.close(),
    }
    state
}

fn on_key(dict: &Dictionary, mut state: AppState, key: Key) -> AppState {
    if !state.search.open {
        return state;
    }
    let len = state.search.outcome.results().len();
    match key {
        Key::ArrowDown if len > 0 => {
            state.search.cursor = Some(state.search.cursor.map_or(0, |c| (c + 1).min(len - 1)));
        }
        Key::ArrowUp => {
            state.search.cursor = state.search.cursor.map(|c| c.saturating_sub(1));
        }
        Key::Enter => {
            if let Some(i) = state.search.cursor {
                return open_result(dict, state, i);
            }
        }
        Key::Escape => state.search.close(),
        Key::ArrowDown => {}
    }
    state
}

fn open_result(dict: &Dictionary, mut state: AppState, i: usize) -> AppState {
    let Some(result) = state.search.outcome.results().get(i) else {
        return state;
    };
    let target = Page::Term(result.slug.clone()).href();
    state.search.clear();
    reduce(dict, state, Event::Navigate(target))
}
