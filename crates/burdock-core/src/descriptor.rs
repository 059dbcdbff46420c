//! Type descriptor graph
//!
//! Rust has no runtime introspection, so the structural shape of every
//! type is described by an explicit descriptor registered in a
//! [`TypeRegistry`]. The registry answers the type-graph questions the
//! rest of the toolkit asks: what are a type's members, what is a member's
//! declared type, and where does descent stop.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Scalar kinds that terminate descent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarKind {
    Bool,
    Int,
    Float,
    Text,
    Timestamp,
}

/// A declared member of a record type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,

    /// Name of the member's declared type.
    pub type_name: String,

    /// Compiler-synthesized members are visited but never expanded.
    #[serde(default)]
    pub synthetic: bool,

    /// Class-scoped (static) members are skipped during synthesis.
    #[serde(default)]
    pub class_scoped: bool,
}

impl Field {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            synthetic: false,
            class_scoped: false,
        }
    }

    pub fn synthetic(mut self) -> Self {
        self.synthetic = true;
        self
    }

    pub fn class_scoped(mut self) -> Self {
        self.class_scoped = true;
        self
    }
}

/// Structural shape of a registered type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeShape {
    Scalar(ScalarKind),

    Enum { constants: Vec<String> },

    /// Sequence with an optional declared element type. A bare container
    /// needs a per-member override before it can be synthesized.
    Seq { element: Option<String> },

    /// Associative container with optional declared key and value types.
    Map {
        key: Option<String>,
        value: Option<String>,
    },

    /// Record with declared members, optionally inheriting members from a
    /// parent record type.
    Record {
        extends: Option<String>,
        fields: Vec<Field>,
    },
}

/// A named type plus its structural shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDescriptor {
    pub name: String,
    pub shape: TypeShape,
}

impl TypeDescriptor {
    pub fn scalar(name: impl Into<String>, kind: ScalarKind) -> Self {
        Self {
            name: name.into(),
            shape: TypeShape::Scalar(kind),
        }
    }

    pub fn enumeration(name: impl Into<String>, constants: &[&str]) -> Self {
        Self {
            name: name.into(),
            shape: TypeShape::Enum {
                constants: constants.iter().map(|c| c.to_string()).collect(),
            },
        }
    }

    pub fn seq(name: impl Into<String>, element: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            shape: TypeShape::Seq {
                element: Some(element.into()),
            },
        }
    }

    /// A sequence whose element type is not declared.
    pub fn bare_seq(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            shape: TypeShape::Seq { element: None },
        }
    }

    pub fn map(name: impl Into<String>, key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            shape: TypeShape::Map {
                key: Some(key.into()),
                value: Some(value.into()),
            },
        }
    }

    /// A map whose key and value types are not declared.
    pub fn bare_map(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            shape: TypeShape::Map {
                key: None,
                value: None,
            },
        }
    }

    pub fn record(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            shape: TypeShape::Record {
                extends: None,
                fields: Vec::new(),
            },
        }
    }

    /// Add a declared member. No effect on non-record shapes.
    pub fn with_field(mut self, field: Field) -> Self {
        if let TypeShape::Record { fields, .. } = &mut self.shape {
            fields.push(field);
        }
        self
    }

    /// Inherit the members of a parent record type.
    pub fn extending(mut self, parent: impl Into<String>) -> Self {
        if let TypeShape::Record { extends, .. } = &mut self.shape {
            *extends = Some(parent.into());
        }
        self
    }
}

/// One position in a type's structural graph: the declared type at that
/// position plus the member that produced it. The root has no member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeNode {
    pub type_name: String,

    /// Originating member name; `None` only for the root.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member: Option<String>,
}

impl TypeNode {
    pub fn root(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            member: None,
        }
    }

    pub fn member(type_name: impl Into<String>, member: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            member: Some(member.into()),
        }
    }

    pub fn is_root(&self) -> bool {
        self.member.is_none()
    }
}

/// Decides whether a node of the type graph should be expanded.
///
/// Filtered-out nodes are still visited, just not descended into.
pub trait DescentFilter {
    /// Descend into a node of the given declared type?
    fn descend_type(&self, _type_name: &str) -> bool {
        true
    }

    /// Descend through the given member?
    fn descend_member(&self, _field: &Field) -> bool {
        true
    }
}

/// Default filter: expands everything except compiler-synthesized and
/// class-scoped members.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultDescentFilter;

impl DescentFilter for DefaultDescentFilter {
    fn descend_member(&self, field: &Field) -> bool {
        !field.synthetic && !field.class_scoped
    }
}

/// Registry of type descriptors; read-only once configured and safe to
/// share across any number of traversals.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    types: HashMap<String, TypeDescriptor>,
    extra_leaves: HashSet<String>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a descriptor, replacing any previous one of the same name.
    pub fn with_type(mut self, descriptor: TypeDescriptor) -> Self {
        self.types.insert(descriptor.name.clone(), descriptor);
        self
    }

    /// Treat a registered type as a leaf: visited, never expanded.
    pub fn with_leaf(mut self, name: impl Into<String>) -> Self {
        self.extra_leaves.insert(name.into());
        self
    }

    /// Load descriptors from a JSON array of [`TypeDescriptor`] documents.
    pub fn from_json(json: &str) -> Result<Self> {
        let descriptors: Vec<TypeDescriptor> = serde_json::from_str(json)?;
        let mut registry = Self::new();
        for descriptor in descriptors {
            registry = registry.with_type(descriptor);
        }
        Ok(registry)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Result<&TypeDescriptor> {
        self.types
            .get(name)
            .ok_or_else(|| Error::UnknownType(name.to_string()))
    }

    /// Leaf types terminate descent: scalars, enums, and anything marked
    /// as a leaf explicitly.
    pub fn is_leaf(&self, name: &str) -> Result<bool> {
        if self.extra_leaves.contains(name) {
            return Ok(true);
        }
        Ok(matches!(
            self.get(name)?.shape,
            TypeShape::Scalar(_) | TypeShape::Enum { .. }
        ))
    }

    /// All structural members of a record type, inherited members first,
    /// each in declaration order. Empty for non-record shapes.
    pub fn fields_of(&self, type_name: &str) -> Result<Vec<Field>> {
        match &self.get(type_name)?.shape {
            TypeShape::Record { extends, fields } => {
                let mut out = match extends {
                    Some(parent) => self.fields_of(parent)?,
                    None => Vec::new(),
                };
                out.extend(fields.iter().cloned());
                Ok(out)
            }
            _ => Ok(Vec::new()),
        }
    }

    /// Declared type of a record member, searching inherited members.
    pub fn member_type(&self, type_name: &str, member: &str) -> Result<String> {
        self.fields_of(type_name)?
            .into_iter()
            .find(|field| field.name == member)
            .map(|field| field.type_name)
            .ok_or_else(|| Error::MemberNotFound {
                type_name: type_name.to_string(),
                member: member.to_string(),
            })
    }

    /// Child nodes of a type-graph node: one per structural member, tagged
    /// with its originating member name. Leaves have no children; container
    /// shapes declare no members, so their structure is handled by the
    /// per-shape synthesis and comparison handlers instead.
    pub fn children(&self, node: &TypeNode) -> Result<Vec<TypeNode>> {
        if self.is_leaf(&node.type_name)? {
            return Ok(Vec::new());
        }
        Ok(self
            .fields_of(&node.type_name)?
            .into_iter()
            .map(|field| TypeNode::member(field.type_name, field.name))
            .collect())
    }
}
