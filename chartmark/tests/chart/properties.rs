//! Property tests for key classification, bracket normalization and block ids

use chartmark::chart::normalize::rewrap_brackets;
use chartmark::{block_id, parse_chart, PointKey};
use proptest::prelude::*;

proptest! {
    #[test]
    fn numbers_are_numeric_keys(value in -1.0e9f64..1.0e9f64) {
        prop_assert!(PointKey::Text(value.to_string()).is_numeric());
    }

    #[test]
    fn words_are_not_numeric_keys(word in "[a-zA-Z]{1,12}") {
        prop_assert!(!PointKey::Text(word).is_numeric());
    }

    #[test]
    fn rewrap_is_idempotent(text in "\\PC{0,40}") {
        let once = rewrap_brackets(&text);
        prop_assert_eq!(rewrap_brackets(&once), once);
    }

    #[test]
    fn block_ids_are_stable_hex(text in "\\PC{0,80}") {
        let id = block_id(text.as_bytes());
        prop_assert_eq!(id.len(), 64);
        prop_assert!(id.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f')));
        prop_assert_eq!(block_id(text.as_bytes()), id);
    }

    #[test]
    fn points_survive_loose_notation(
        entries in prop::collection::vec(("[a-z]{1,8}", -1000i32..1000), 1..8)
    ) {
        let body: Vec<String> = entries
            .iter()
            .map(|(key, value)| format!("  {{ key: '{key}', value: {value} }},"))
            .collect();
        let block = format!("layout: bar\ndata: [\n{}\n]\n", body.join("\n"));

        let chart = parse_chart(&block).unwrap();
        prop_assert_eq!(chart.points.len(), entries.len());
        for (point, (key, value)) in chart.points.iter().zip(&entries) {
            prop_assert_eq!(&point.key, &PointKey::Text(key.clone()));
            prop_assert_eq!(point.value, f64::from(*value));
        }
    }
}
