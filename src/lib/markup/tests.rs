use proptest::{
    prelude::*,
    test_runner::{Config, TestRunner},
};

use super::{Element, Node, has_class};

#[test]
fn text_and_attributes_are_escaped_once() {
    let mut runner = TestRunner::new(Config {
        failure_persistence: None,
        ..Config::default()
    });
    runner
        .run(&(".*", ".*"), |(text, href)| {
            let html = Node::from(Element::new("a").attr("href", href).text(text)).render();
            let inner = &html[html.find('>').unwrap() + 1..html.len() - "</a>".len()];
            prop_assert!(!inner.contains('<'));
            prop_assert!(!inner.contains('>'));
            let open = &html[..html.find('>').unwrap()];
            prop_assert_eq!(open.matches('"').count(), 2);
            Ok(())
        })
        .unwrap();
}

#[test]
fn nested_tree_renders_in_order() {
    let tree = Element::new("div")
        .class("def-block")
        .child(Element::new("span").text("Page 105"))
        .children(["Fish & ", "Chips"])
        .child(Element::new("input").attr("type", "search"));
    assert_eq!(
        Node::from(tree).render(),
        r#"<div class="def-block"><span>Page 105</span>Fish &amp; Chips<input type="search"></div>"#
    );
}

#[test]
fn text_content_and_find_all_walk_the_tree() {
    let tree = Node::fragment([
        Node::from(Element::new("a").class("term-link big").text("Law")),
        Node::text(" and "),
        Node::from(Element::new("a").class("other").text("Reason")),
    ]);
    assert_eq!(tree.text_content(), "Law and Reason");
    let links = tree.find_all(&|el| has_class(el, "term-link"));
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].tag(), "a");
    assert_eq!(Node::empty().render(), "");
}
