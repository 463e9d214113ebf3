use super::{ClientData, app_script, page_shell};
use crate::{index::build_index, record::DefinitionRecord};

#[test]
fn client_json_cannot_close_the_script() {
    let index = build_index(vec![DefinitionRecord::new(
        "</script><b>",
        "body",
        "Chapter I: Of Sense",
        "1",
    )]);
    let json = ClientData::new(index.search_index()).to_script_json().unwrap();
    assert!(!json.contains("</"));
    assert!(json.starts_with("{\"defaultBook\":\"I\",\"limit\":12,\"terms\":["));

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["terms"][0]["term"], "</script><b>");
    assert_eq!(value["terms"][0]["chapter"], "Chapter I: Of Sense");
}

#[test]
fn shell_escapes_title_and_keeps_fragments() {
    let html = page_shell(
        "A & B",
        "<meta name=\"x\">",
        "<header></header>",
        "<section data-route=\"\"></section>",
        "<footer>f</footer>",
        "{}",
    );
    assert!(html.contains("<title>A &amp; B</title>"));
    assert!(html.contains("<meta name=\"x\">"));
    assert!(html.contains("<main id=\"app\">\n<section data-route=\"\"></section>\n</main>"));
    assert!(html.contains("<script id=\"search-data\" type=\"application/json\">{}</script>"));
    assert!(html.contains("hashchange"));
}

#[test]
fn script_routes_every_term_hash_to_a_term_key() {
    let script = app_script();
    assert!(script.contains("if (parts[0] === 'term') return 'term/' + decode(parts.slice(1).join('/'));"));
    assert!(!script.contains("parts.length > 1"));
}
