//! Legacy answer mappings.
//!
//! The backend prints answer counts with Python's mapping syntax: single
//! quotes around keys and every backslash doubled. [`normalize_legacy`]
//! turns that into JSON.

use serde_json::Value;

use crate::error::ChartError;

/// Answer texts with their counts, in dashboard order: integer-like keys
/// first in ascending order, then the rest as the backend listed them.
pub type AnswerCounts = Vec<(String, f64)>;

/// Swap single quotes for double quotes and collapse doubled backslashes.
pub fn normalize_legacy(text: &str) -> String {
    text.replace('\'', "\"").replace("\\\\", "\\")
}

/// Normalize and parse the mapping for `slug`.
///
/// An empty mapping yields `Ok(None)`: there is nothing to chart.
pub fn parse_answer_counts(slug: &str, text: &str) -> Result<Option<AnswerCounts>, ChartError> {
    let normalized = normalize_legacy(text);
    let value: Value = serde_json::from_str(&normalized).map_err(|source| ChartError::Parse {
        slug: slug.to_string(),
        source,
    })?;
    let Value::Object(map) = value else {
        return Err(ChartError::NotAMapping {
            slug: slug.to_string(),
        });
    };
    if map.is_empty() {
        tracing::debug!(slug, "empty answer mapping, skipping chart");
        return Ok(None);
    }

    let mut counts = map
        .into_iter()
        .map(|(answer, count)| match count.as_f64() {
            Some(n) => Ok((answer, n)),
            None => Err(ChartError::BadCount {
                slug: slug.to_string(),
                answer,
            }),
        })
        .collect::<Result<AnswerCounts, _>>()?;
    // Stable, so non-index keys keep their listed order.
    counts.sort_by_key(|(answer, _)| match array_index(answer) {
        Some(i) => (0, i),
        None => (1, 0),
    });
    Ok(Some(counts))
}

/// The key as an object property index: a canonical decimal below 2^32 - 1.
/// Browsers enumerate such keys first, ascending.
fn array_index(key: &str) -> Option<u32> {
    if key.len() > 1 && key.starts_with('0') {
        return None;
    }
    if !key.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    key.parse::<u32>().ok().filter(|&i| i != u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_quotes_and_backslashes() {
        assert_eq!(normalize_legacy(r"{'a\\nb': 2}"), r#"{"a\nb": 2}"#);
    }

    #[test]
    fn parses_in_listed_order() {
        let counts = parse_answer_counts("s", "{'c': 1, 'a': 4, 'b': 2}")
            .unwrap()
            .unwrap();
        let keys: Vec<&str> = counts.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["c", "a", "b"]);
        assert_eq!(counts[1].1, 4.0);
    }

    #[test]
    fn integer_keys_come_first_ascending() {
        let counts = parse_answer_counts("s", "{'b': 1, '10': 2, 'a': 3, '2': 4, '007': 5}")
            .unwrap()
            .unwrap();
        let keys: Vec<&str> = counts.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["2", "10", "b", "a", "007"]);
        assert_eq!(counts[0].1, 4.0);
    }

    #[test]
    fn array_index_rules() {
        assert_eq!(array_index("0"), Some(0));
        assert_eq!(array_index("42"), Some(42));
        assert_eq!(array_index("01"), None);
        assert_eq!(array_index("-1"), None);
        assert_eq!(array_index("+1"), None);
        assert_eq!(array_index(""), None);
        assert_eq!(array_index("4294967295"), None);
    }

    #[test]
    fn escaped_newlines_survive() {
        let counts = parse_answer_counts("s", r"{'x = 1\\ny = 2': 3}")
            .unwrap()
            .unwrap();
        assert_eq!(counts[0].0, "x = 1\ny = 2");
    }

    #[test]
    fn empty_mapping_is_skipped() {
        assert!(parse_answer_counts("s", "{}").unwrap().is_none());
    }

    #[test]
    fn malformed_text_is_a_parse_error() {
        let err = parse_answer_counts("s", "{'a': ").unwrap_err();
        assert!(matches!(err, ChartError::Parse { .. }));
    }

    #[test]
    fn non_object_is_rejected() {
        let err = parse_answer_counts("s", "['a', 'b']").unwrap_err();
        assert!(matches!(err, ChartError::NotAMapping { .. }));
    }

    #[test]
    fn non_numeric_count_is_rejected() {
        let err = parse_answer_counts("s", "{'a': 'many'}").unwrap_err();
        assert!(matches!(err, ChartError::BadCount { ref answer, .. } if answer == "a"));
    }
}
