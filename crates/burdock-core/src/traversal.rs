//! Object-graph traversal with identity-based cycle detection

use crate::path::{NodePath, PathSegment};
use crate::value::{Key, ObjectId, Value};
use std::collections::HashSet;
use std::rc::Rc;

/// One visited position: the value at that position and the step that
/// reached it.
#[derive(Debug, Clone)]
pub struct ObjectNode {
    pub segment: PathSegment,
    pub value: Value,
}

impl ObjectNode {
    fn root(value: Value) -> Self {
        Self {
            segment: PathSegment::Root,
            value,
        }
    }
}

/// Callback invoked once per reachable node, with the full path from the
/// traversal root.
pub trait Visitor {
    fn visit(&mut self, path: &Rc<NodePath<ObjectNode>>);
}

impl<F> Visitor for F
where
    F: FnMut(&Rc<NodePath<ObjectNode>>),
{
    fn visit(&mut self, path: &Rc<NodePath<ObjectNode>>) {
        self(path)
    }
}

/// Decides whether a node takes part in traversal. Rejected nodes are
/// neither visited nor expanded.
pub trait ObjectFilter {
    fn accept(&self, _node: &ObjectNode) -> bool {
        true
    }
}

/// Accepts every node.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl ObjectFilter for AcceptAll {}

/// Depth-first walk over a value graph.
///
/// Each reference value is visited at most once per traversal: its identity
/// is recorded before its children are entered, so direct and transitive
/// self-references terminate. Scalars carry no identity and are visited
/// wherever they are reached.
pub struct ObjectWalker;

impl ObjectWalker {
    /// Walk the graph under `root`, invoking `visitor` per accepted node.
    pub fn traverse(root: &Value, filter: &dyn ObjectFilter, visitor: &mut dyn Visitor) {
        let mut visited: HashSet<ObjectId> = HashSet::new();
        let path = NodePath::root(ObjectNode::root(root.clone()));
        Self::visit_node(&path, filter, visitor, &mut visited);
        tracing::debug!("traversal complete: {} reference(s) visited", visited.len());
    }

    fn visit_node(
        path: &Rc<NodePath<ObjectNode>>,
        filter: &dyn ObjectFilter,
        visitor: &mut dyn Visitor,
        visited: &mut HashSet<ObjectId>,
    ) {
        let node = path.current();
        if node.value.is_null() {
            return;
        }
        if !filter.accept(node) {
            return;
        }
        if let Some(id) = node.value.identity() {
            // Mark before recursing so a node that is its own descendant is
            // recognized instead of re-entered.
            if !visited.insert(id) {
                return;
            }
        }
        visitor.visit(path);

        match &node.value {
            Value::Map(cell) => {
                // Snapshot the entries so no borrow is held across the
                // visitor callbacks.
                let entries: Vec<(Key, Value)> = cell
                    .borrow()
                    .iter()
                    .map(|(key, value)| (key.clone(), value.clone()))
                    .collect();
                for (key, value) in entries {
                    let key_node = ObjectNode {
                        segment: PathSegment::Key(key.to_string()),
                        value: Value::from(key.clone()),
                    };
                    Self::visit_node(&path.append(key_node), filter, visitor, visited);

                    let value_node = ObjectNode {
                        segment: PathSegment::Key(key.to_string()),
                        value,
                    };
                    Self::visit_node(&path.append(value_node), filter, visitor, visited);
                }
            }
            Value::Seq(cell) => {
                let items: Vec<Value> = cell.borrow().clone();
                for (i, item) in items.into_iter().enumerate() {
                    let child = ObjectNode {
                        segment: PathSegment::Index(i),
                        value: item,
                    };
                    Self::visit_node(&path.append(child), filter, visitor, visited);
                }
            }
            Value::Record(cell) => {
                let members: Vec<(String, Value)> = cell
                    .borrow()
                    .members()
                    .map(|(name, value)| (name.to_string(), value.clone()))
                    .collect();
                for (name, value) in members {
                    let child = ObjectNode {
                        segment: PathSegment::Member(name),
                        value,
                    };
                    Self::visit_node(&path.append(child), filter, visitor, visited);
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Record;
    use std::collections::BTreeMap;

    fn collect_paths(root: &Value) -> Vec<String> {
        let mut paths = Vec::new();
        let mut visitor = |path: &Rc<NodePath<ObjectNode>>| {
            paths.push(format_path_of(path));
        };
        ObjectWalker::traverse(root, &AcceptAll, &mut visitor);
        paths
    }

    fn format_path_of(path: &Rc<NodePath<ObjectNode>>) -> String {
        let mut out = String::new();
        for node in path.nodes() {
            if matches!(node.segment, PathSegment::Root) {
                continue;
            }
            if !out.is_empty() {
                out.push('.');
            }
            out.push_str(&node.segment.to_string());
        }
        out
    }

    #[test]
    fn test_visits_members_in_declaration_order() {
        let person = Value::record(
            Record::new("Person")
                .with_member("name", Value::text("A"))
                .with_member("age", Value::Int(30)),
        );

        let paths = collect_paths(&person);
        assert_eq!(paths, vec!["", "name", "age"]);
    }

    #[test]
    fn test_null_members_are_skipped() {
        let person = Value::record(
            Record::new("Person")
                .with_member("name", Value::Null)
                .with_member("age", Value::Int(30)),
        );

        let paths = collect_paths(&person);
        assert_eq!(paths, vec!["", "age"]);
    }

    #[test]
    fn test_seq_elements_visited_in_order() {
        let seq = Value::seq(vec![Value::Int(1), Value::Int(2), Value::Int(3)]);
        let paths = collect_paths(&seq);
        assert_eq!(paths, vec!["", "[0]", "[1]", "[2]"]);
    }

    #[test]
    fn test_map_visits_key_then_value() {
        let mut entries = BTreeMap::new();
        entries.insert(Key::from("x"), Value::Int(1));
        let map = Value::map(entries);

        let paths = collect_paths(&map);
        assert_eq!(paths, vec!["", "[x]", "[x]"]);
    }

    #[test]
    fn test_self_reference_terminates() {
        let node = Value::record(Record::new("Node"));
        if let Value::Record(cell) = &node {
            cell.borrow_mut().set("next", node.clone());
        }

        let paths = collect_paths(&node);
        // The self-referencing member is recognized and not re-entered.
        assert_eq!(paths, vec![""]);
    }

    #[test]
    fn test_transitive_cycle_terminates() {
        let a = Value::record(Record::new("Node"));
        let b = Value::record(Record::new("Node"));
        if let Value::Record(cell) = &a {
            cell.borrow_mut().set("next", b.clone());
        }
        if let Value::Record(cell) = &b {
            cell.borrow_mut().set("next", a.clone());
        }

        let paths = collect_paths(&a);
        assert_eq!(paths, vec!["", "next"]);
    }

    #[test]
    fn test_value_equal_but_distinct_instances_both_visited() {
        let left = Value::record(Record::new("Leaf").with_member("v", Value::Int(1)));
        let right = Value::record(Record::new("Leaf").with_member("v", Value::Int(1)));
        let root = Value::seq(vec![left, right]);

        let mut count = 0usize;
        let mut visitor = |_: &Rc<NodePath<ObjectNode>>| count += 1;
        ObjectWalker::traverse(&root, &AcceptAll, &mut visitor);

        // root + two records + two scalar members
        assert_eq!(count, 5);
    }

    #[test]
    fn test_shared_instance_visited_once() {
        let shared = Value::record(Record::new("Leaf").with_member("v", Value::Int(1)));
        let root = Value::seq(vec![shared.clone(), shared]);

        let mut count = 0usize;
        let mut visitor = |_: &Rc<NodePath<ObjectNode>>| count += 1;
        ObjectWalker::traverse(&root, &AcceptAll, &mut visitor);

        // root + one record + one scalar member
        assert_eq!(count, 3);
    }

    #[test]
    fn test_filter_stops_visit_and_descent() {
        struct SkipMember(&'static str);

        impl ObjectFilter for SkipMember {
            fn accept(&self, node: &ObjectNode) -> bool {
                !matches!(&node.segment, PathSegment::Member(name) if name == self.0)
            }
        }

        let person = Value::record(
            Record::new("Person")
                .with_member("name", Value::text("A"))
                .with_member(
                    "address",
                    Value::record(Record::new("Address").with_member("city", Value::text("S"))),
                ),
        );

        let mut paths = Vec::new();
        let mut visitor = |path: &Rc<NodePath<ObjectNode>>| paths.push(format_path_of(path));
        ObjectWalker::traverse(&person, &SkipMember("address"), &mut visitor);

        assert_eq!(paths, vec!["", "name"]);
    }
}
