//! Immutable traversal paths with structural sharing

use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;

/// A singly-linked stack of nodes from the root to the current position.
///
/// Paths are purely additive: `append` creates a new path whose parent is
/// the old one, and the old path stays valid. Many child paths can share
/// one parent, which is never mutated.
#[derive(Debug)]
pub struct NodePath<T> {
    current: T,
    parent: Option<Rc<NodePath<T>>>,
}

impl<T> NodePath<T> {
    /// Start a path at its root node.
    pub fn root(current: T) -> Rc<Self> {
        Rc::new(Self {
            current,
            parent: None,
        })
    }

    /// Extend this path by one node, leaving `self` untouched.
    pub fn append(self: &Rc<Self>, current: T) -> Rc<Self> {
        Rc::new(Self {
            current,
            parent: Some(Rc::clone(self)),
        })
    }

    pub fn current(&self) -> &T {
        &self.current
    }

    pub fn parent(&self) -> Option<&Rc<NodePath<T>>> {
        self.parent.as_ref()
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Number of ancestors above the current node; the root has depth 0.
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut node = self;
        while let Some(parent) = node.parent.as_deref() {
            depth += 1;
            node = parent;
        }
        depth
    }

    /// Nodes from root to current, in order.
    pub fn nodes(&self) -> Vec<&T> {
        let mut out = Vec::new();
        let mut node = Some(self);
        while let Some(path) = node {
            out.push(&path.current);
            node = path.parent.as_deref();
        }
        out.reverse();
        out
    }
}

/// A single component of a symbolic path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathSegment {
    /// The traversal root; renders as nothing.
    Root,
    /// A record member, by name.
    Member(String),
    /// A sequence element, by position.
    Index(usize),
    /// A map entry, by key.
    Key(String),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Root => Ok(()),
            PathSegment::Member(name) => write!(f, "{}", name),
            PathSegment::Index(i) => write!(f, "[{}]", i),
            PathSegment::Key(key) => write!(f, "[{}]", key),
        }
    }
}

/// Render a segment path in dotted form, e.g. `friends.[0].name`.
///
/// The root segment is omitted, so a root-only path renders as the empty
/// string.
pub fn format_path(path: &NodePath<PathSegment>) -> String {
    let mut out = String::new();
    for segment in path.nodes() {
        if matches!(segment, PathSegment::Root) {
            continue;
        }
        if !out.is_empty() {
            out.push('.');
        }
        out.push_str(&segment.to_string());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_preserves_parent() {
        let root = NodePath::root(PathSegment::Root);
        let child = root.append(PathSegment::Member("friends".into()));
        let grandchild = child.append(PathSegment::Index(0));

        assert_eq!(grandchild.depth(), 2);
        assert_eq!(child.depth(), 1);
        assert!(root.is_root());
        assert!(!grandchild.is_root());
    }

    #[test]
    fn test_siblings_share_parent() {
        let root = NodePath::root(PathSegment::Root);
        let left = root.append(PathSegment::Index(0));
        let right = root.append(PathSegment::Index(1));

        assert_eq!(format_path(&left), "[0]");
        assert_eq!(format_path(&right), "[1]");
        assert_eq!(root.depth(), 0);
    }

    #[test]
    fn test_format_path() {
        let root = NodePath::root(PathSegment::Root);
        let path = root
            .append(PathSegment::Member("friends".into()))
            .append(PathSegment::Index(0))
            .append(PathSegment::Member("name".into()));

        assert_eq!(format_path(&path), "friends.[0].name");
        assert_eq!(format_path(&root), "");
    }

    #[test]
    fn test_key_segment_format() {
        let root = NodePath::root(PathSegment::Root);
        let path = root
            .append(PathSegment::Member("scores".into()))
            .append(PathSegment::Key("x".into()));

        assert_eq!(format_path(&path), "scores.[x]");
    }

    #[test]
    fn test_nodes_in_root_to_current_order() {
        let root = NodePath::root(PathSegment::Root);
        let path = root
            .append(PathSegment::Member("a".into()))
            .append(PathSegment::Member("b".into()));

        let nodes = path.nodes();
        assert_eq!(nodes.len(), 3);
        assert_eq!(nodes[0], &PathSegment::Root);
        assert_eq!(nodes[2], &PathSegment::Member("b".into()));
    }
}
