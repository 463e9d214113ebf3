use proptest::{
    prelude::*,
    test_runner::{Config, TestRunner},
};

use super::{Dictionary, book_of, build_index};
use crate::{record::DefinitionRecord, types::ChapterLabel, utils::slugify};

const CHAPTERS: [&str; 4] = [
    "Chapter III: Of the Consequence or Train of Imaginations",
    "Chapter I: Of Sense",
    "Chapter Intro: The Introduction",
    "Chapter XVII: Of the Causes of a Commonwealth",
];

prop_compose! {
    fn record()(term in "[A-Za-z]{1,4}( [A-Za-z]{1,4})?", chapter in 0..CHAPTERS.len(), page in 1u32..400) -> DefinitionRecord {
        DefinitionRecord::new(term, "body", CHAPTERS[chapter], page.to_string())
    }
}

#[test]
fn every_record_lands_once_per_group_in_order() {
    let mut runner = TestRunner::new(Config {
        cases: 64,
        failure_persistence: None,
        ..Config::default()
    });
    runner
        .run(&proptest::collection::vec(record(), 0..24), |records| {
            let index = build_index(records.clone());
            for (i, r) in records.iter().enumerate() {
                let slug = slugify(&r.term);
                let same_slug: Vec<_> = records.iter().filter(|x| x.slug.as_str() == slug).collect();
                let from_index = index.by_slug(&slug);
                prop_assert_eq!(from_index.len(), same_slug.len());
                for (a, b) in from_index.iter().zip(same_slug.iter()) {
                    prop_assert_eq!(*a, *b);
                }

                let same_chapter: Vec<_> = records.iter().filter(|x| x.chapter == r.chapter).collect();
                let from_chapter = index.by_chapter(&r.chapter);
                prop_assert_eq!(from_chapter.len(), same_chapter.len());
                for (a, b) in from_chapter.iter().zip(same_chapter.iter()) {
                    prop_assert_eq!(*a, *b);
                }

                let occurrences = index
                    .by_slug(&slug)
                    .into_iter()
                    .filter(|x| std::ptr::eq(*x, &index.records()[i]))
                    .count();
                prop_assert_eq!(occurrences, 1);
            }
            Ok(())
        })
        .unwrap();
}

#[test]
fn search_index_has_one_entry_per_slug_sorted() {
    let mut runner = TestRunner::new(Config {
        cases: 64,
        failure_persistence: None,
        ..Config::default()
    });
    runner
        .run(&proptest::collection::vec(record(), 0..24), |records| {
            let index = build_index(records.clone());
            let entries = index.search_index();
            let mut slugs: Vec<_> = entries.iter().map(|e| e.slug.clone()).collect();
            slugs.sort();
            slugs.dedup();
            prop_assert_eq!(slugs.len(), entries.len());

            for pair in entries.windows(2) {
                prop_assert!(pair[0].term.to_lowercase() <= pair[1].term.to_lowercase());
            }
            for e in entries {
                let first = records.iter().find(|r| r.slug == e.slug).unwrap();
                prop_assert_eq!(&e.term, &first.term);
                prop_assert_eq!(e.chapter.as_str(), first.chapter.as_str());
            }
            Ok(())
        })
        .unwrap();
}

#[test]
fn chapters_follow_canonical_sequence() {
    let records = vec![
        DefinitionRecord::new("Train", "x", "Chapter III: X", "9"),
        DefinitionRecord::new("Sense", "y", "Chapter I: Y", "2"),
        DefinitionRecord::new("Nature", "z", "Chapter Intro: Z", "1"),
    ];
    let index = build_index(records);
    let order: Vec<&str> = index.chapter_order().iter().map(ChapterLabel::as_str).collect();
    assert_eq!(order, vec!["Chapter Intro: Z", "Chapter I: Y", "Chapter III: X"]);
}

#[test]
fn unknown_chapters_sort_last_and_stable() {
    let records = vec![
        DefinitionRecord::new("A", "x", "Appendix B", "1"),
        DefinitionRecord::new("B", "x", "Chapter LXX: Far Away", "1"),
        DefinitionRecord::new("C", "x", "Chapter II: Of Imagination", "4"),
        DefinitionRecord::new("D", "x", "Appendix A", "1"),
    ];
    let index = build_index(records);
    let order: Vec<&str> = index.chapter_order().iter().map(ChapterLabel::as_str).collect();
    assert_eq!(
        order,
        vec!["Chapter II: Of Imagination", "Appendix B", "Chapter LXX: Far Away", "Appendix A"]
    );
}

#[test]
fn book_lookup_uses_ranges_and_default() {
    assert_eq!(book_of("Intro").id, "I");
    assert_eq!(book_of("XVI").id, "I");
    assert_eq!(book_of("XVII").id, "II");
    assert_eq!(book_of("XLIII").id, "III");
    assert_eq!(book_of("XLV").id, "IV");
    assert_eq!(book_of("1061").id, "1061");
    assert_eq!(book_of("Appendix").id, "I");
}

#[test]
fn book_grouping_counts_definitions() {
    let index = build_index(
        CHAPTERS
            .iter()
            .enumerate()
            .map(|(i, c)| DefinitionRecord::new(format!("T{i}"), "body", c, "1"))
            .collect(),
    );
    let book_one: Vec<&str> = index.chapters_of_book("I").iter().map(|c| c.token()).collect();
    assert_eq!(book_one, vec!["Intro", "I", "III"]);
    assert_eq!(index.definitions_in_book("I"), 3);
    assert_eq!(index.definitions_in_book("II"), 1);
    assert_eq!(index.definitions_in_book("IV"), 0);
    assert_eq!(index.chapter_by_token("XVII").map(|c| c.title()), Some("Of the Causes of a Commonwealth"));
    assert!(index.chapter_by_token("XX").is_none());
}

#[test]
fn dictionary_counts_unresolved_refs() {
    let dict = Dictionary::new(vec![
        DefinitionRecord::new("Justice", "The keeping of valid Covenants.", "Chapter XV: Of Other Laws of Nature", "105")
            .with_cross_refs(["Covenant", "Injustice"]),
        DefinitionRecord::new("Covenant", "A Contract.", "Chapter XIV: Of Contracts", "99"),
    ]);
    assert_eq!(dict.unresolved_refs(), 1);
    assert_eq!(dict.site().title, "Hobbes Dictionary");
}
