//! Assertion adapter over the deep comparator
//!
//! Bridges `compare` into test code: a matcher holding an expected value,
//! and an assertion helper that fails with every path-qualified mismatch in
//! a single report rather than only the first.

use crate::engine::{deep_compare, DeepComparator};
use crate::mismatch::Mismatch;
use burdock_core::Value;
use std::fmt::Write;

/// Matcher asserting deep equality with an expected value.
pub struct DeepEqual {
    expected: Value,
    comparator: DeepComparator,
}

/// Build a matcher asserting deep equality with `expected`.
pub fn is_deep_equal_to(expected: Value) -> DeepEqual {
    DeepEqual {
        expected,
        comparator: DeepComparator::new(),
    }
}

impl DeepEqual {
    /// Use a custom comparator instead of the standard registry.
    pub fn with_comparator(mut self, comparator: DeepComparator) -> Self {
        self.comparator = comparator;
        self
    }

    pub fn matches(&self, actual: &Value) -> bool {
        self.mismatches(actual).is_empty()
    }

    /// Raw mismatch list for custom reporting.
    pub fn mismatches(&self, actual: &Value) -> Vec<Mismatch> {
        self.comparator.compare(actual, &self.expected)
    }

    /// Multi-line report listing every mismatch, or `None` when equal.
    pub fn report(&self, actual: &Value) -> Option<String> {
        let found = self.mismatches(actual);
        if found.is_empty() {
            return None;
        }
        Some(render_report(&found))
    }
}

/// Assert two values are deep-equal, panicking with a report that lists
/// every discrepancy.
#[track_caller]
pub fn assert_deep_equal(actual: &Value, expected: &Value) {
    let found = deep_compare(actual, expected);
    if !found.is_empty() {
        panic!("deep equality failed:\n{}", render_report(&found));
    }
}

fn render_report(mismatches: &[Mismatch]) -> String {
    let mut out = format!("{} mismatch(es):", mismatches.len());
    for mismatch in mismatches {
        let _ = write!(out, "\n  {}", mismatch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use burdock_core::Record;

    fn named(name: &str) -> Value {
        Value::record(Record::new("Person").with_member("name", Value::text(name)))
    }

    #[test]
    fn test_matches() {
        let matcher = is_deep_equal_to(named("A"));
        assert!(matcher.matches(&named("A")));
        assert!(!matcher.matches(&named("B")));
    }

    #[test]
    fn test_report_lists_every_mismatch() {
        let expected = Value::record(
            Record::new("Person")
                .with_member("name", Value::text("A"))
                .with_member("age", Value::Int(1)),
        );
        let actual = Value::record(
            Record::new("Person")
                .with_member("name", Value::text("B"))
                .with_member("age", Value::Int(2)),
        );

        let report = is_deep_equal_to(expected).report(&actual).unwrap();
        assert!(report.starts_with("2 mismatch(es):"));
        assert!(report.contains("name: value mismatch"));
        assert!(report.contains("age: value mismatch"));
    }

    #[test]
    fn test_report_none_when_equal() {
        assert!(is_deep_equal_to(named("A")).report(&named("A")).is_none());
    }

    #[test]
    fn test_assert_deep_equal_passes() {
        assert_deep_equal(&named("A"), &named("A"));
    }

    #[test]
    #[should_panic(expected = "deep equality failed")]
    fn test_assert_deep_equal_panics_with_report() {
        assert_deep_equal(&named("A"), &named("B"));
    }
}
