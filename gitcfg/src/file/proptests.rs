//! Property-based tests for config file parsing and serialization.

use super::ConfigFile;
use crate::key::ConfigKey;
use proptest::prelude::*;

// Keys with an optional subsection that may contain dots, spaces and quotes
fn key_strategy() -> impl Strategy<Value = ConfigKey> {
    (
        "[a-z][a-z0-9-]{0,8}",
        prop::option::of("[A-Za-z0-9 ./\"\\\\-]{0,12}"),
        "[a-z][a-zA-Z0-9-]{0,8}",
    )
        .prop_map(|(section, sub, name)| {
            ConfigKey::from_parts(&section, sub.as_deref(), &name).unwrap()
        })
}

// Printable values plus the characters the writer has to quote or escape
fn value_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            8 => "[ -~]",
            1 => Just("\t".to_string()),
            1 => Just("\n".to_string()),
            1 => Just("\u{8}".to_string()),
        ],
        0..24,
    )
    .prop_map(|parts| parts.concat())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        max_shrink_iters: 10000,
        .. ProptestConfig::default()
    })]

    // Serializing and re-parsing preserves keys and values in order
    #[test]
    fn written_files_parse_back(
        pairs in prop::collection::vec((key_strategy(), value_strategy()), 1..12)
    ) {
        let mut file = ConfigFile::new();
        for (key, value) in &pairs {
            file.add(key, value);
        }

        let text = file.to_config_string();
        let reparsed = ConfigFile::parse(&text, None).unwrap();

        let original: Vec<_> = file.entries().iter().map(|e| (e.key().clone(), e.value().to_string())).collect();
        let roundtrip: Vec<_> = reparsed.entries().iter().map(|e| (e.key().clone(), e.value().to_string())).collect();
        prop_assert_eq!(original, roundtrip);
    }

    // Rendering is stable after one parse
    #[test]
    fn serialization_is_idempotent(
        pairs in prop::collection::vec((key_strategy(), value_strategy()), 0..12)
    ) {
        let mut file = ConfigFile::new();
        for (key, value) in &pairs {
            file.set(key, value);
        }

        let once = file.to_config_string();
        let twice = ConfigFile::parse(&once, None).unwrap().to_config_string();
        prop_assert_eq!(once, twice);
    }

    // set always leaves the requested value as the effective one
    #[test]
    fn set_then_get_last(
        pairs in prop::collection::vec((key_strategy(), value_strategy()), 1..12),
        pick in any::<prop::sample::Index>()
    ) {
        let mut file = ConfigFile::new();
        for (key, value) in &pairs {
            file.add(key, value);
        }
        let (key, _) = &pairs[pick.index(pairs.len())];
        file.set(key, "chosen");

        prop_assert_eq!(file.get_last(key).map(|e| e.value()), Some("chosen"));
    }

    // Arbitrary input never panics the parser
    #[test]
    fn parser_does_not_panic(text in "\\PC{0,200}") {
        let _ = ConfigFile::parse(&text, None);
    }
}
