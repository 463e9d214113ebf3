//! Pure rendering from application state to markup trees.

use itertools::Itertools;

use crate::{
    config::{BOOKS, PREVIEW_CHARS, book_spec},
    index::{Dictionary, book_of},
    linkify::{linkify, term_href},
    markup::{Element, Node},
    router::{AppState, Crumb, Page, SearchPanel},
    search::SearchOutcome,
    types::{BookId, ChapterLabel, Slug},
    utils::truncate_chars,
};

/// Render one page's content. Pages whose data is missing render an
/// explicit empty state rather than nothing.
pub fn render_page(dict: &Dictionary, page: &Page) -> Node {
    match page {
        Page::Home => home(dict),
        Page::Book(id) => book(dict, id),
        Page::Chapter(label) => chapter(dict, label),
        Page::Term(slug) => term(dict, slug),
    }
}

fn page_title(text: impl Into<String>) -> Element {
    Element::new("h1").class("page-title").text(text)
}

fn subtitle() -> Element {
    Element::new("p").class("page-subtitle")
}

fn back_link(href: String, label: impl Into<String>) -> Element {
    Element::new("a")
        .class("back-btn")
        .attr("href", href)
        .text(format!("← {}", label.into()))
}

fn empty(message: &str) -> Element {
    Element::new("p").class("empty").text(message)
}

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}

pub fn home(dict: &Dictionary) -> Node {
    let index = dict.index();
    let site = dict.site();

    let cards = BOOKS.iter().map(|spec| {
        let chapters = index.chapters_of_book(spec.id).len();
        let heading = Element::new("h3").text(format!("Book {}", spec.id));
        let sub = Element::new("p").class("book-sub").text(spec.title);
        if chapters == 0 {
            return Element::new("div")
                .class("book-card disabled")
                .child(heading)
                .child(sub)
                .child(Element::new("p").class("book-count").text("No definitions yet"));
        }
        let count = format!(
            "{} · {}",
            plural(index.definitions_in_book(spec.id), "definition", "definitions"),
            plural(chapters, "chapter", "chapters"),
        );
        Element::new("a")
            .class("book-card")
            .attr("href", Page::Book(BookId::new(spec.id)).href())
            .child(heading)
            .child(sub)
            .child(Element::new("p").class("book-count").text(count))
    });

    Node::fragment([
        page_title(site.title.as_str()),
        subtitle()
            .text("Definitions from ")
            .child(Element::new("em").text(site.work.as_str()))
            .text(format!(" ({}) — Select a book", site.year)),
        Element::new("div").class("book-grid").children(cards),
    ])
}

pub fn book(dict: &Dictionary, id: &BookId) -> Node {
    let index = dict.index();
    let chapters = index.chapters_of_book(id.as_str());
    let total: usize = chapters.iter().map(|c| index.chapter_len(c)).sum();

    let mut heading = Element::new("h1")
        .class("page-title")
        .text("Book ")
        .child(Element::new("span").class("book-id").text(id.as_str()));
    if let Some(spec) = book_spec(id.as_str()) {
        heading = heading.text(format!(": {}", spec.title));
    }

    let listing = if chapters.is_empty() {
        empty("No chapters in this book.")
    } else {
        Element::new("div")
            .class("chapter-grid")
            .children(chapters.iter().map(|c| chapter_card(dict, c)))
    };

    Node::fragment([
        back_link(Page::Home.href(), "Books"),
        heading,
        subtitle().text(format!(
            "{} across {}",
            plural(total, "definition", "definitions"),
            plural(chapters.len(), "chapter", "chapters"),
        )),
        listing,
    ])
}

fn chapter_card(dict: &Dictionary, label: &ChapterLabel) -> Element {
    Element::new("a")
        .class("chapter-card")
        .attr("href", Page::Chapter(label.clone()).href())
        .child(
            Element::new("span")
                .class("chapter-num")
                .text(format!("Ch.\u{a0}{}", label.token())),
        )
        .child(Element::new("span").class("chapter-title").text(label.title()))
        .child(
            Element::new("span")
                .class("chapter-count")
                .text(dict.index().chapter_len(label).to_string()),
        )
}

pub fn chapter(dict: &Dictionary, label: &ChapterLabel) -> Node {
    let entries = dict.index().by_chapter(label);
    let spec = book_of(label.token());

    let items = entries.iter().map(|e| {
        let (preview, cut) = truncate_chars(&e.definition, PREVIEW_CHARS);
        let preview = if cut {
            format!("{preview}…")
        } else {
            preview.to_string()
        };
        Element::new("li").child(
            Element::new("a")
                .class("def-item")
                .attr("href", term_href(&e.slug))
                .child(Element::new("div").class("def-term").text(e.term.as_str()))
                .child(Element::new("div").class("def-preview").text(preview)),
        )
    });

    let listing = if entries.is_empty() {
        empty("No definitions in this chapter.")
    } else {
        Element::new("ul").class("def-list").children(items)
    };

    Node::fragment([
        back_link(
            Page::Book(BookId::new(spec.id)).href(),
            format!("Book {}: {}", spec.id, spec.title),
        ),
        page_title(format!("Chapter {}", label.token())),
        subtitle().text(format!(
            "{} · {}",
            label.title(),
            plural(entries.len(), "definition", "definitions")
        )),
        listing,
    ])
}

pub fn term(dict: &Dictionary, slug: &Slug) -> Node {
    let index = dict.index();
    let entries = index.by_slug(slug.as_str());
    let Some(first) = entries.first() else {
        return empty("No such term.").into();
    };

    let blocks = entries.iter().map(|e| {
        let byline = Element::new("div")
            .class("def-chapter-label")
            .child(
                Element::new("span").child(
                    Element::new("a")
                        .attr("href", Page::Chapter(e.chapter.clone()).href())
                        .text(format!("Chapter {}: {}", e.chapter.token(), e.chapter.title())),
                ),
            )
            .child(Element::new("span").text(format!("Page {}", e.page_number)));

        let mut block = Element::new("div")
            .class("def-block")
            .child(byline)
            .child(
                Element::new("div")
                    .class("def-body")
                    .child(linkify(&e.definition, e.cross_refs.iter().map(String::as_str), index)),
            );
        if e.has_context() {
            block = block.child(Element::new("div").class("def-context").text(e.context.as_str()));
        }
        block
    });

    let see_also: Vec<(Slug, &str)> = entries
        .iter()
        .flat_map(|e| e.cross_refs.iter().map(String::as_str))
        .sorted_unstable()
        .map(|r| (Slug::from_term(r), r))
        .unique_by(|(s, _)| s.clone())
        .filter(|(s, _)| index.contains_slug(s.as_str()))
        .collect();

    let mut detail = Element::new("div")
        .class("def-detail")
        .child(Element::new("h1").class("term-heading").text(first.term.as_str()));
    if entries.len() > 1 {
        detail = detail.child(subtitle().text(format!("Defined in {} chapters", entries.len())));
    }
    detail = detail.children(blocks);
    if !see_also.is_empty() {
        detail = detail.child(
            Element::new("div")
                .class("see-also")
                .child(Element::new("h3").text("See Also"))
                .child(Element::new("div").class("see-also-links").children(
                    see_also.iter().map(|(s, r)| {
                        Element::new("a")
                            .class("see-also-link")
                            .attr("href", term_href(s))
                            .text(*r)
                    }),
                )),
        );
    }

    Node::fragment([
        back_link(Page::Chapter(first.chapter.clone()).href(), first.chapter.title()),
        detail,
    ])
}

/// Breadcrumb links; the last crumb is plain text.
pub fn breadcrumb_nav(crumbs: &[Crumb]) -> Node {
    let last = crumbs.len().saturating_sub(1);
    Node::fragment(crumbs.iter().enumerate().map(|(i, c)| {
        if i < last {
            Node::fragment([
                Element::new("a").attr("href", c.href.as_str()).text(c.label.as_str()),
                Element::new("span").class("sep").text("›"),
            ])
        } else {
            Element::new("span").text(c.label.as_str()).into()
        }
    }))
}

/// Result rows for an open panel; nothing when closed or no search is active.
pub fn search_panel(panel: &SearchPanel) -> Node {
    if !panel.open {
        return Node::empty();
    }
    match &panel.outcome {
        SearchOutcome::Inactive => Node::empty(),
        SearchOutcome::Results(results) if results.is_empty() => {
            Element::new("div").class("search-empty").text("No matching terms").into()
        }
        SearchOutcome::Results(results) => Element::new("ul")
            .class("search-list")
            .children(results.iter().enumerate().map(|(i, r)| {
                let (before, hit, after) = r.segments();
                let class = if panel.cursor == Some(i) {
                    "search-result focused"
                } else {
                    "search-result"
                };
                Element::new("li").class(class).child(
                    Element::new("a")
                        .attr("href", term_href(&r.slug))
                        .child(
                            Element::new("span")
                                .class("result-term")
                                .text(before)
                                .child(Element::new("mark").text(hit))
                                .text(after),
                        )
                        .child(Element::new("span").class("result-chapter").text(r.chapter.as_str())),
                )
            }))
            .into(),
    }
}

/// Site header: title link, breadcrumb trail and the search control.
pub fn header(dict: &Dictionary, state: &AppState) -> Node {
    Element::new("header")
        .child(
            Element::new("div")
                .class("header-inner")
                .child(
                    Element::new("a")
                        .class("site-title")
                        .attr("href", Page::Home.href())
                        .text(dict.site().title.as_str()),
                )
                .child(Element::new("span").class("header-sep").text("|"))
                .child(
                    Element::new("nav")
                        .class("breadcrumb")
                        .attr("id", "breadcrumb")
                        .child(breadcrumb_nav(&state.crumbs)),
                )
                .child(
                    Element::new("div")
                        .class("search")
                        .attr("id", "search")
                        .child(
                            Element::new("input")
                                .attr("id", "search-input")
                                .attr("type", "search")
                                .attr("placeholder", "Search terms…")
                                .attr("autocomplete", "off")
                                .attr("value", state.search.query.as_str()),
                        )
                        .child(
                            Element::new("div")
                                .class("search-results")
                                .attr("id", "search-results")
                                .child(search_panel(&state.search)),
                        ),
                ),
        )
        .into()
}

/// A pre-rendered page for the static export, tagged with its route key and
/// carrying its breadcrumb trail in a template.
pub fn export_region(dict: &Dictionary, state: &AppState, route_key: &str) -> Node {
    let class = if state.page == Page::Home {
        "page active"
    } else {
        "page"
    };
    Element::new("section")
        .class(class)
        .attr("data-route", route_key)
        .attr("data-region", state.page.region().id())
        .child(
            Element::new("template")
                .class("crumbs")
                .child(breadcrumb_nav(&state.crumbs)),
        )
        .child(render_page(dict, &state.page))
        .into()
}
