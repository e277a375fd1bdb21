//! Property-based tests for the parse/serialize cycle.
//!
//! Documents are generated through the public mutation API, so every
//! generated case is one a caller could actually construct.

use crate::document::IniDocument;
use crate::options::{LayoutMode, ParseMode, ParseOptions, WriteOptions};
use crate::parser::{parse, parse_bytes};
use crate::writer::serialize;
use proptest::prelude::*;

fn arb_section_name() -> impl Strategy<Value = String> {
    prop_oneof![
        1 => Just(String::new()),
        6 => "[A-Za-z][A-Za-z0-9_.-]{0,11}",
    ]
}

fn arb_key() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9_.-]{0,11}"
}

fn arb_value() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => "[\\x20-\\x7E]{0,24}",
        1 => "[a-zA-Z0-9äöüßéèñ日本語]{0,12}",
    ]
}

fn arb_document() -> impl Strategy<Value = IniDocument> {
    prop::collection::vec(
        (
            arb_section_name(),
            prop::collection::vec((arb_key(), arb_value()), 1..6),
        ),
        0..6,
    )
    .prop_map(|sections| {
        let mut doc = IniDocument::new();
        for (name, entries) in sections {
            for (key, value) in entries {
                doc.set_value(&name, &key, value).unwrap();
            }
        }
        doc
    })
}

/// Structural view for comparison: root entries plus every named section
/// with its entries, all in declaration order.
fn snapshot(doc: &IniDocument) -> Vec<(String, Vec<(String, String)>)> {
    let mut out = vec![(String::new(), doc.read_key_value_pairs(""))];
    for name in doc.read_sections() {
        let pairs = doc.read_key_value_pairs(&name);
        out.push((name, pairs));
    }
    out
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_canonical_round_trip(doc in arb_document()) {
        let text = serialize(&doc, WriteOptions::default());
        let reparsed = parse(&text, ParseOptions::default()).unwrap();
        prop_assert_eq!(snapshot(&reparsed), snapshot(&doc));
        prop_assert!(reparsed.warnings().is_empty());
    }

    #[test]
    fn prop_serialization_idempotent(doc in arb_document()) {
        let first = serialize(&doc, WriteOptions::default());
        let reparsed = parse(&first, ParseOptions::default()).unwrap();
        let second = serialize(&reparsed, WriteOptions::default());
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_preserve_replays_canonical_text_unchanged(doc in arb_document()) {
        let text = serialize(&doc, WriteOptions::default());
        let options = ParseOptions::default().with_layout(LayoutMode::Preserve);
        let replayed = parse(&text, options).unwrap();
        prop_assert_eq!(serialize(&replayed, WriteOptions::default()), text);
    }

    #[test]
    fn prop_strict_accepts_canonical_output(doc in arb_document()) {
        let text = serialize(&doc, WriteOptions::default());
        let options = ParseOptions::default().with_mode(ParseMode::Strict);
        prop_assert!(parse(&text, options).is_ok());
    }

    #[test]
    fn prop_last_write_wins(
        section in arb_section_name(),
        key in arb_key(),
        values in prop::collection::vec(arb_value(), 1..5),
    ) {
        let mut doc = IniDocument::new();
        for value in &values {
            doc.set_value(&section, &key, value.clone()).unwrap();
        }
        let last = values.last().unwrap().as_str();
        prop_assert_eq!(doc.get_value(&section, &key), Some(last));
    }

    #[test]
    fn prop_deleted_key_is_gone_after_round_trip(doc in arb_document()) {
        let mut doc = doc;
        let Some(victim_section) = doc.read_sections().first().cloned() else {
            return Ok(());
        };
        let Some(victim_key) = doc.read_keys(&victim_section).first().cloned() else {
            return Ok(());
        };
        prop_assert!(doc.delete_key(&victim_section, &victim_key));

        let text = serialize(&doc, WriteOptions::default());
        let reparsed = parse(&text, ParseOptions::default()).unwrap();
        prop_assert_eq!(reparsed.get_value(&victim_section, &victim_key), None);
    }

    #[test]
    fn prop_tolerant_parse_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..512)) {
        let _ = parse_bytes(&bytes, ParseOptions::default());
    }

    #[test]
    fn prop_strict_parse_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..512)) {
        let options = ParseOptions::default().with_mode(ParseMode::Strict);
        let _ = parse_bytes(&bytes, options);
    }
}
