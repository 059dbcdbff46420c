//! Ordered comparator dispatch

use crate::comparators::{
    MapComparator, ScalarComparator, SeqComparator, StructuralComparator, ValueComparator,
};
use burdock_core::Value;

/// Predicate selecting the values a comparator applies to.
pub type TypeMatcher = Box<dyn Fn(&Value) -> bool + Send + Sync>;

/// Ordered table of (matcher, comparator) pairs plus a structural fallback.
///
/// Matchers are evaluated in registration order and the first match wins;
/// registration order is the tie-break rule for overlapping matchers. The
/// registry is built once at configuration time and is read-only
/// afterwards, so it can be shared across any number of comparisons.
pub struct ComparatorRegistry {
    entries: Vec<(TypeMatcher, Box<dyn ValueComparator>)>,
    fallback: Box<dyn ValueComparator>,
}

impl ComparatorRegistry {
    /// Registry with the built-in comparators: scalar equality, element-wise
    /// sequences, key-wise maps, and the structural record fallback.
    pub fn standard() -> Self {
        Self::empty()
            .with_comparator(|value: &Value| value.is_scalar(), ScalarComparator)
            .with_comparator(|value: &Value| matches!(value, Value::Seq(_)), SeqComparator)
            .with_comparator(|value: &Value| matches!(value, Value::Map(_)), MapComparator)
    }

    /// Registry with no entries and the structural fallback.
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
            fallback: Box::new(StructuralComparator),
        }
    }

    /// Append a (matcher, comparator) pair. Later entries lose against
    /// earlier ones when their matchers overlap.
    pub fn with_comparator(
        mut self,
        matcher: impl Fn(&Value) -> bool + Send + Sync + 'static,
        comparator: impl ValueComparator + 'static,
    ) -> Self {
        self.entries.push((Box::new(matcher), Box::new(comparator)));
        self
    }

    /// Replace the fallback used when no matcher accepts a value.
    pub fn with_fallback(mut self, comparator: impl ValueComparator + 'static) -> Self {
        self.fallback = Box::new(comparator);
        self
    }

    /// First registered comparator whose matcher accepts `value`, selected
    /// by the runtime type of the left operand.
    pub(crate) fn select(&self, value: &Value) -> &dyn ValueComparator {
        for (matcher, comparator) in &self.entries {
            if matcher(value) {
                return comparator.as_ref();
            }
        }
        self.fallback.as_ref()
    }
}

impl Default for ComparatorRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::DeepComparator;
    use burdock_core::{NodePath, PathSegment, Record};
    use std::rc::Rc;

    /// Comparator that treats everything as equal.
    struct AlwaysEqual;

    impl ValueComparator for AlwaysEqual {
        fn compare(
            &self,
            _cx: &mut crate::engine::CompareContext<'_>,
            _path: &Rc<NodePath<PathSegment>>,
            _left: &Value,
            _right: &Value,
        ) {
        }
    }

    #[test]
    fn test_first_match_wins() {
        // A custom record comparator registered ahead of the built-ins
        // takes precedence over the structural fallback.
        let registry = ComparatorRegistry::empty()
            .with_comparator(|value: &Value| matches!(value, Value::Record(_)), AlwaysEqual);
        let comparator = DeepComparator::with_registry(registry);

        let left = Value::record(Record::new("Person").with_member("name", Value::text("A")));
        let right = Value::record(Record::new("Person").with_member("name", Value::text("B")));

        assert!(comparator.compare(&left, &right).is_empty());
    }

    #[test]
    fn test_fallback_handles_unmatched_values() {
        let registry = ComparatorRegistry::empty();
        let comparator = DeepComparator::with_registry(registry);

        let left = Value::record(Record::new("Person").with_member("name", Value::text("A")));
        let right = Value::record(Record::new("Person").with_member("name", Value::text("B")));

        // With no entries registered, records and their scalar members all
        // reach the structural fallback, which still finds the difference.
        assert_eq!(comparator.compare(&left, &right).len(), 1);
    }
}
