use proptest::{
    prelude::*,
    test_runner::{Config, TestRunner},
};

use super::{linkify, resolve_spans};
use crate::{
    index::build_index,
    markup::{Node, has_class},
    record::DefinitionRecord,
};

fn index_of(terms: &[&str]) -> crate::index::Index {
    build_index(
        terms
            .iter()
            .map(|t| DefinitionRecord::new(*t, "body", "Chapter XIV: Of Laws", "90"))
            .collect(),
    )
}

fn links(node: &Node) -> Vec<(String, String)> {
    node.find_all(&|el| has_class(el, "term-link"))
        .into_iter()
        .map(|el| {
            (
                el.get_attr("href").unwrap_or_default().to_string(),
                Node::Element(el.clone()).text_content(),
            )
        })
        .collect()
}

#[test]
fn longest_reference_claims_the_overlap() {
    let text = "the Natural Law requires obedience";
    let spans = resolve_spans(text, ["Law", "Natural Law"]);
    assert_eq!(spans.len(), 1);
    assert_eq!(spans[0].matched, "Natural Law");
    assert_eq!(spans[0].reference, "Natural Law");
    assert_eq!((spans[0].start, spans[0].end), (4, 15));

    let index = index_of(&["Law", "Natural Law"]);
    let node = linkify(text, ["Law", "Natural Law"], &index);
    assert_eq!(
        links(&node),
        vec![("#/term/natural-law".to_string(), "Natural Law".to_string())]
    );
    assert_eq!(node.text_content(), text);
}

#[test]
fn matches_whole_words_case_insensitively() {
    let text = "LAW and law, but not lawful nor outlaw.";
    let spans = resolve_spans(text, ["law"]);
    let matched: Vec<&str> = spans.iter().map(|s| s.matched).collect();
    assert_eq!(matched, vec!["LAW", "law"]);
}

#[test]
fn unknown_reference_stays_plain_text() {
    let index = index_of(&["Covenant"]);
    let text = "Injustice is the not Performance of Covenant <b>.";
    let node = linkify(text, ["Injustice", "Covenant"], &index);
    assert_eq!(
        links(&node),
        vec![("#/term/covenant".to_string(), "Covenant".to_string())]
    );
    let html = node.render();
    assert!(html.starts_with("Injustice is the not"));
    assert!(html.contains("&lt;b&gt;"));
}

#[test]
fn empty_refs_only_escape() {
    let index = index_of(&["Law"]);
    let node = linkify("Law & <Order>", std::iter::empty::<&str>(), &index);
    assert_eq!(node.render(), "Law &amp; &lt;Order&gt;");
    assert!(resolve_spans("Law", ["", "  "]).is_empty());
}

#[test]
fn references_with_pattern_characters_are_literal() {
    let spans = resolve_spans("axb and a.b", ["a.b"]);
    assert_eq!(spans.len(), 1);
    assert_eq!((spans[0].start, spans[0].matched), (8, "a.b"));
}

#[test]
fn accepted_spans_never_overlap() {
    let mut runner = TestRunner::new(Config {
        failure_persistence: None,
        ..Config::default()
    });
    runner
        .run(
            &(
                proptest::collection::vec("(law|natural|natural law|right|of|right of nature|nature)", 0..30),
                proptest::collection::vec("(Law|Natural Law|Right|Right of Nature|Nature|Of)", 0..5),
            ),
            |(words, refs)| {
                let text = words.join(" ");
                let spans = resolve_spans(&text, refs.iter().map(String::as_str));
                for pair in spans.windows(2) {
                    prop_assert!(pair[0].end <= pair[1].start);
                }
                for s in &spans {
                    prop_assert_eq!(&text[s.start..s.end], s.matched);
                    prop_assert!(s.matched.eq_ignore_ascii_case(s.reference));
                }

                let index = index_of(&["Law", "Nature"]);
                let node = linkify(&text, refs.iter().map(String::as_str), &index);
                prop_assert_eq!(node.text_content(), text.clone());
                prop_assert!(links(&node).len() <= spans.len());
                Ok(())
            },
        )
        .unwrap();
}
