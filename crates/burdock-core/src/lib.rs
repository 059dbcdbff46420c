//! Burdock Core - Object-graph engine primitives
//!
//! This crate provides the shared graph-navigation layer of the Burdock
//! toolkit: the runtime value model, the type-descriptor graph, immutable
//! node paths, member access, and object-graph traversal with cycle
//! detection.

pub mod access;
pub mod descriptor;
pub mod error;
pub mod path;
pub mod traversal;
pub mod value;

pub use access::{declared_type, get_member, get_path, set_member, set_path};
pub use descriptor::{
    DefaultDescentFilter, DescentFilter, Field, ScalarKind, TypeDescriptor, TypeNode,
    TypeRegistry, TypeShape,
};
pub use error::{Error, Result};
pub use path::{format_path, NodePath, PathSegment};
pub use traversal::{AcceptAll, ObjectFilter, ObjectNode, ObjectWalker, Visitor};
pub use value::{Key, ObjectId, Record, Value};
