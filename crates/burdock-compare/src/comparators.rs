//! Built-in per-type comparators

use crate::engine::CompareContext;
use burdock_core::{NodePath, PathSegment, Value};
use std::rc::Rc;

/// Type-specific comparison logic.
///
/// Implementations may assume the engine has already handled nulls,
/// identical references, and revisited pairs.
pub trait ValueComparator: Send + Sync {
    fn compare(
        &self,
        cx: &mut CompareContext<'_>,
        path: &Rc<NodePath<PathSegment>>,
        left: &Value,
        right: &Value,
    );
}

/// Value equality for scalars, text, timestamps and enum constants.
pub struct ScalarComparator;

impl ValueComparator for ScalarComparator {
    fn compare(
        &self,
        cx: &mut CompareContext<'_>,
        path: &Rc<NodePath<PathSegment>>,
        left: &Value,
        right: &Value,
    ) {
        if !left.scalar_eq(right) {
            cx.report(path, format!("value mismatch: {} != {}", left, right));
        }
    }
}

/// Element-wise comparison for sequences, with size-mismatch detection.
///
/// Lengths are compared first; elements past the shorter length have no
/// counterpart and are not compared.
pub struct SeqComparator;

impl ValueComparator for SeqComparator {
    fn compare(
        &self,
        cx: &mut CompareContext<'_>,
        path: &Rc<NodePath<PathSegment>>,
        left: &Value,
        right: &Value,
    ) {
        let (Value::Seq(left_cell), Value::Seq(right_cell)) = (left, right) else {
            cx.report(
                path,
                format!("kind mismatch: {} vs {}", left.kind(), right.kind()),
            );
            return;
        };
        let left_items: Vec<Value> = left_cell.borrow().clone();
        let right_items: Vec<Value> = right_cell.borrow().clone();

        if left_items.len() != right_items.len() {
            cx.report(
                path,
                format!("size mismatch: {} != {}", left_items.len(), right_items.len()),
            );
        }
        for (index, (a, b)) in left_items.iter().zip(right_items.iter()).enumerate() {
            let child = path.append(PathSegment::Index(index));
            cx.compare_nodes(&child, a, b);
        }
    }
}

/// Key-wise comparison for maps: values under common keys are compared,
/// asymmetric keys are reported as missing. A missing key already accounts
/// for the size difference, so no separate size mismatch is emitted.
pub struct MapComparator;

impl ValueComparator for MapComparator {
    fn compare(
        &self,
        cx: &mut CompareContext<'_>,
        path: &Rc<NodePath<PathSegment>>,
        left: &Value,
        right: &Value,
    ) {
        let (Value::Map(left_cell), Value::Map(right_cell)) = (left, right) else {
            cx.report(
                path,
                format!("kind mismatch: {} vs {}", left.kind(), right.kind()),
            );
            return;
        };
        let left_entries = left_cell.borrow().clone();
        let right_entries = right_cell.borrow().clone();

        for (key, a) in &left_entries {
            match right_entries.get(key) {
                Some(b) => {
                    let child = path.append(PathSegment::Key(key.to_string()));
                    cx.compare_nodes(&child, a, b);
                }
                None => cx.report(
                    path,
                    format!("missing key: \"{}\" absent from right operand", key),
                ),
            }
        }
        for key in right_entries.keys() {
            if !left_entries.contains_key(key) {
                cx.report(
                    path,
                    format!("missing key: \"{}\" absent from left operand", key),
                );
            }
        }
    }
}

/// Structural fallback: compares every member of two records recursively,
/// tagging path segments with member names.
pub struct StructuralComparator;

impl ValueComparator for StructuralComparator {
    fn compare(
        &self,
        cx: &mut CompareContext<'_>,
        path: &Rc<NodePath<PathSegment>>,
        left: &Value,
        right: &Value,
    ) {
        let (Value::Record(left_cell), Value::Record(right_cell)) = (left, right) else {
            // Anything that is not a pair of records ends up here only when
            // no more specific comparator matched. Operands of different
            // kinds get the same report the container comparators emit;
            // same-kind operands fall back to plain value equality.
            if left.kind() != right.kind() {
                cx.report(
                    path,
                    format!("kind mismatch: {} vs {}", left.kind(), right.kind()),
                );
            } else if !left.scalar_eq(right) {
                cx.report(path, format!("value mismatch: {} != {}", left, right));
            }
            return;
        };

        // Snapshot both sides so no borrow is held while recursing; a
        // cyclic record would otherwise re-borrow its own cell.
        let (left_type, left_members) = snapshot(left_cell);
        let (right_type, right_members) = snapshot(right_cell);

        if left_type != right_type {
            cx.report(path, format!("type mismatch: {} vs {}", left_type, right_type));
        }

        for (name, a) in &left_members {
            match right_members.iter().find(|(n, _)| n == name) {
                Some((_, b)) => {
                    let child = path.append(PathSegment::Member(name.clone()));
                    cx.compare_nodes(&child, a, b);
                }
                None => cx.report(
                    path,
                    format!("missing member: {} absent from right operand", name),
                ),
            }
        }
        for (name, _) in &right_members {
            if !left_members.iter().any(|(n, _)| n == name) {
                cx.report(
                    path,
                    format!("missing member: {} absent from left operand", name),
                );
            }
        }
    }
}

fn snapshot(
    cell: &std::cell::RefCell<burdock_core::Record>,
) -> (String, Vec<(String, Value)>) {
    let record = cell.borrow();
    let members = record
        .members()
        .map(|(name, value)| (name.to_string(), value.clone()))
        .collect();
    (record.type_name().to_string(), members)
}
