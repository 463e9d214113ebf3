use proptest::{
    prelude::*,
    test_runner::{Config, TestRunner},
};

use super::{decode_segment, encode_segment, escape_text, slugify, truncate_chars};

#[test]
fn escape_text_removes_angle_and_quotes() {
    let mut runner = TestRunner::new(Config {
        failure_persistence: None,
        ..Config::default()
    });
    runner
        .run(&".*", |s| {
            let escaped = escape_text(&s);
            for ch in ['<', '>', '"', '\''] {
                prop_assert!(!escaped.contains(ch));
            }
            Ok(())
        })
        .unwrap();
}

#[test]
fn escape_text_noops_when_safe() {
    let mut runner = TestRunner::new(Config {
        failure_persistence: None,
        ..Config::default()
    });
    runner
        .run(&"[^<>'\"&]*", |s| {
            let escaped = escape_text(&s);
            prop_assert_eq!(escaped, s);
            Ok(())
        })
        .unwrap();
}

#[test]
fn slugify_matches_known_terms() {
    assert_eq!(slugify("Justice"), "justice");
    assert_eq!(slugify("Natural Law"), "natural-law");
    assert_eq!(slugify("  Right of Nature (Jus Naturale) "), "right-of-nature-jus-naturale");
    assert_eq!(slugify("Conor Bulkeley-Krane"), "conor-bulkeley-krane");
    assert_eq!(slugify("Sign -- Token"), "sign-token");
    assert_eq!(slugify("Fear, & Hope!"), "fear-hope");
    assert_eq!(slugify("--Leading and trailing--"), "leading-and-trailing");
    assert_eq!(slugify("snake_case stays"), "snake_case-stays");
    assert_eq!(slugify("!!!"), "");
}

#[test]
fn slugify_constrains_charset() {
    let mut runner = TestRunner::new(Config {
        failure_persistence: None,
        ..Config::default()
    });
    runner
        .run(&"[A-Za-z0-9 _!?',.()\t-]{0,32}", |input| {
            let slug = slugify(&input);
            prop_assert!(!slug.contains(char::is_whitespace));
            prop_assert!(!slug.contains("--"));
            prop_assert!(!slug.starts_with('-'));
            prop_assert!(!slug.ends_with('-'));
            prop_assert!(
                slug.chars()
                    .all(|c| c == '-' || c == '_' || c.is_ascii_lowercase() || c.is_ascii_digit())
            );
            Ok(())
        })
        .unwrap();
}

#[test]
fn slugify_is_idempotent() {
    let mut runner = TestRunner::new(Config {
        failure_persistence: None,
        ..Config::default()
    });
    runner
        .run(&"[\\p{L}\\p{N} _,;:'-]{0,24}", |input| {
            let once = slugify(&input);
            prop_assert_eq!(slugify(&once), once.clone());
            Ok(())
        })
        .unwrap();
}

#[test]
fn route_segments_survive_encoding() {
    let mut runner = TestRunner::new(Config {
        failure_persistence: None,
        ..Config::default()
    });
    runner
        .run(&"\\PC{0,16}", |segment| {
            let encoded = encode_segment(&segment).into_owned();
            prop_assert!(!encoded.contains('/'));
            prop_assert!(!encoded.contains('#'));
            prop_assert_eq!(decode_segment(&encoded), segment.as_str());
            Ok(())
        })
        .unwrap();
}

#[test]
fn malformed_segment_decodes_to_itself() {
    assert_eq!(decode_segment("100%"), "100%");
}

#[test]
fn truncate_counts_characters() {
    assert_eq!(truncate_chars("short", 10), ("short", false));
    assert_eq!(truncate_chars("exactly", 7), ("exactly", false));
    assert_eq!(truncate_chars("Léviathan", 3), ("Lév", true));
}
