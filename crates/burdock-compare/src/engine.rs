//! Deep comparison engine

use crate::mismatch::Mismatch;
use crate::registry::ComparatorRegistry;
use burdock_core::{format_path, NodePath, ObjectId, PathSegment, Value};
use std::collections::HashSet;
use std::rc::Rc;

/// Mutable state of one comparison call: the mismatch list and the set of
/// reference pairs already compared. Allocated at entry, discarded at
/// return, never shared between calls.
pub struct CompareContext<'a> {
    registry: &'a ComparatorRegistry,
    seen: HashSet<(ObjectId, ObjectId)>,
    mismatches: Vec<Mismatch>,
}

impl<'a> CompareContext<'a> {
    fn new(registry: &'a ComparatorRegistry) -> Self {
        Self {
            registry,
            seen: HashSet::new(),
            mismatches: Vec::new(),
        }
    }

    /// Record a mismatch at the given path.
    pub fn report(&mut self, path: &Rc<NodePath<PathSegment>>, description: impl Into<String>) {
        self.mismatches
            .push(Mismatch::new(format_path(path), description));
    }

    /// Compare one node pair: the reference-check decorator applied ahead
    /// of every type-specific comparator, then first-match dispatch by the
    /// runtime type of the left operand.
    pub fn compare_nodes(&mut self, path: &Rc<NodePath<PathSegment>>, left: &Value, right: &Value) {
        if left.is_null() && right.is_null() {
            return;
        }
        if left.is_null() || right.is_null() {
            self.report(
                path,
                format!(
                    "null mismatch: left is {}, right is {}",
                    null_word(left),
                    null_word(right)
                ),
            );
            return;
        }
        if let (Some(left_id), Some(right_id)) = (left.identity(), right.identity()) {
            if left_id == right_id {
                return;
            }
            // Operand-pair identity: a pair compared once is equivalent from
            // then on. Recording the pair before recursing is what lets two
            // distinct cyclic graphs be compared without diverging.
            if !self.seen.insert((left_id, right_id)) {
                return;
            }
        }
        let comparator = self.registry.select(left);
        comparator.compare(self, path, left, right);
    }
}

fn null_word(value: &Value) -> &'static str {
    if value.is_null() {
        "null"
    } else {
        "non-null"
    }
}

/// Deep, path-aware comparator.
///
/// Walks two instances in parallel and collects a path-qualified mismatch
/// for every discrepancy, in traversal order. Structural differences are
/// data, never errors.
pub struct DeepComparator {
    registry: ComparatorRegistry,
}

impl DeepComparator {
    /// Comparator with the standard registry.
    pub fn new() -> Self {
        Self {
            registry: ComparatorRegistry::standard(),
        }
    }

    /// Comparator with a caller-configured registry.
    pub fn with_registry(registry: ComparatorRegistry) -> Self {
        Self { registry }
    }

    /// Compare two values and return every discrepancy found.
    pub fn compare(&self, left: &Value, right: &Value) -> Vec<Mismatch> {
        let mut cx = CompareContext::new(&self.registry);
        let root = NodePath::root(PathSegment::Root);
        cx.compare_nodes(&root, left, right);
        tracing::debug!("comparison finished with {} mismatch(es)", cx.mismatches.len());
        cx.mismatches
    }
}

impl Default for DeepComparator {
    fn default() -> Self {
        Self::new()
    }
}

/// Compare two values with the standard registry.
pub fn deep_compare(left: &Value, right: &Value) -> Vec<Mismatch> {
    DeepComparator::new().compare(left, right)
}
