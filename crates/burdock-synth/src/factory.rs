//! Synthetic value factory
//!
//! Builds fully-populated instances from type descriptors, for use as test
//! fixtures. Two runs with the same registry, overrides and strategy
//! produce structurally equal, reference-distinct values.

use crate::error::{Result, SynthError};
use crate::overrides::{MemberOverride, SynthOverrides};
use crate::strategy::{DefaultStrategy, ValueStrategy};
use burdock_core::{
    set_member, DefaultDescentFilter, DescentFilter, Field, Key, NodePath, Record, ScalarKind,
    TypeNode, TypeRegistry, TypeShape, Value,
};
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

/// Factory that synthesizes instances of registered types.
///
/// The registry, overrides, strategy and filter are read-only
/// configuration; each `new_instance` call owns its own in-progress map
/// and nothing is retained between calls.
pub struct ValueFactory<'r> {
    registry: &'r TypeRegistry,
    overrides: SynthOverrides,
    strategy: Box<dyn ValueStrategy>,
    filter: Box<dyn DescentFilter>,
}

impl<'r> ValueFactory<'r> {
    pub fn new(registry: &'r TypeRegistry) -> Self {
        Self {
            registry,
            overrides: SynthOverrides::new(),
            strategy: Box::new(DefaultStrategy),
            filter: Box::new(DefaultDescentFilter),
        }
    }

    /// Register per-member overrides, checked before the default strategy.
    pub fn with_overrides(mut self, overrides: SynthOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// Replace the value-generation strategy.
    pub fn with_strategy(mut self, strategy: impl ValueStrategy + 'static) -> Self {
        self.strategy = Box::new(strategy);
        self
    }

    /// Replace the descent filter deciding which members are populated.
    pub fn with_filter(mut self, filter: impl DescentFilter + 'static) -> Self {
        self.filter = Box::new(filter);
        self
    }

    /// Synthesize a fully-populated instance of `type_name`.
    pub fn new_instance(&self, type_name: &str) -> Result<Value> {
        tracing::debug!("synthesizing instance of {}", type_name);
        let mut in_progress: HashMap<String, Value> = HashMap::new();
        let path = NodePath::root(TypeNode::root(type_name));
        self.synthesize(&path, &mut in_progress)
    }

    fn synthesize(
        &self,
        path: &Rc<NodePath<TypeNode>>,
        in_progress: &mut HashMap<String, Value>,
    ) -> Result<Value> {
        let type_name = path.current().type_name.clone();

        // A type already being built is reused, so recursive types come out
        // as cyclic instances instead of unbounded expansions.
        if let Some(existing) = in_progress.get(&type_name) {
            return Ok(existing.clone());
        }

        let descriptor = self
            .registry
            .get(&type_name)
            .map_err(|e| self.resolution(path, e))?;

        let structurally_leaf =
            matches!(descriptor.shape, TypeShape::Scalar(_) | TypeShape::Enum { .. });
        if !structurally_leaf
            && self
                .registry
                .is_leaf(&type_name)
                .map_err(|e| self.resolution(path, e))?
        {
            // A type forced to leaf status has no structure to synthesize
            // and needs a generator override instead.
            return Err(SynthError::MissingStrategy {
                type_name,
                path: display_path(path),
            });
        }

        if matches!(descriptor.shape, TypeShape::Seq { .. } | TypeShape::Map { .. }) {
            self.check_container_cycle(path, &type_name, in_progress)?;
        }

        match &descriptor.shape {
            TypeShape::Scalar(kind) => Ok(self.strategy.scalar(*kind)),

            TypeShape::Enum { constants } => {
                let constant = self
                    .strategy
                    .enum_constant(&type_name, constants)
                    .ok_or_else(|| SynthError::EmptyEnum {
                        type_name: type_name.clone(),
                        path: display_path(path),
                    })?;
                Ok(Value::enum_constant(type_name, constant))
            }

            TypeShape::Seq { element } => {
                let element = self.element_type(path, element.as_deref())?;
                let mut items = Vec::new();
                for _ in 0..self.strategy.container_len() {
                    let child = path.append(TypeNode::member(element.clone(), "[]"));
                    items.push(self.synthesize(&child, in_progress)?);
                }
                Ok(Value::seq(items))
            }

            TypeShape::Map { key, value } => {
                let (key_type, value_type) =
                    self.entry_types(path, key.as_deref(), value.as_deref())?;
                let key_kind = self.key_kind(path, &key_type)?;
                let mut entries: BTreeMap<Key, Value> = BTreeMap::new();
                for index in 0..self.strategy.container_len() {
                    let key = self.strategy.scalar_key(key_kind, index);
                    let child = path.append(TypeNode::member(value_type.clone(), "[value]"));
                    entries.insert(key, self.synthesize(&child, in_progress)?);
                }
                Ok(Value::map(entries))
            }

            TypeShape::Record { .. } => self.synthesize_record(path, in_progress),
        }
    }

    fn synthesize_record(
        &self,
        path: &Rc<NodePath<TypeNode>>,
        in_progress: &mut HashMap<String, Value>,
    ) -> Result<Value> {
        let type_name = path.current().type_name.clone();

        // Allocate the shell first (bypass construction) so recursive
        // members can point back at it.
        let value = Value::record(Record::new(&type_name));
        in_progress.insert(type_name.clone(), value.clone());

        if self.filter.descend_type(&type_name) {
            let fields = self
                .registry
                .fields_of(&type_name)
                .map_err(|e| self.resolution(path, e))?;
            for field in fields {
                if field.class_scoped || !self.filter.descend_member(&field) {
                    continue;
                }
                let member_value = self.member_value(path, &type_name, &field, in_progress)?;
                set_member(&value, &field.name, member_value)
                    .map_err(|e| self.resolution(path, e))?;
            }
        }

        in_progress.remove(&type_name);
        Ok(value)
    }

    fn member_value(
        &self,
        path: &Rc<NodePath<TypeNode>>,
        declaring_type: &str,
        field: &Field,
        in_progress: &mut HashMap<String, Value>,
    ) -> Result<Value> {
        if let Some(MemberOverride::Generator(generator)) =
            self.overrides.get(declaring_type, &field.name)
        {
            return Ok(generator());
        }
        let child = path.append(TypeNode::member(field.type_name.clone(), field.name.clone()));
        self.synthesize(&child, in_progress)
    }

    /// Declared element type of a sequence node, falling back to an
    /// `ElementType` override registered for the originating member.
    fn element_type(&self, path: &Rc<NodePath<TypeNode>>, declared: Option<&str>) -> Result<String> {
        if let Some(element) = declared {
            return Ok(element.to_string());
        }
        if let Some(MemberOverride::ElementType(element)) = self.member_override(path) {
            return Ok(element.clone());
        }
        Err(SynthError::UnparameterizedContainer {
            type_name: path.current().type_name.clone(),
            path: display_path(path),
        })
    }

    /// Declared key/value types of a map node, falling back to an
    /// `EntryTypes` override registered for the originating member.
    fn entry_types(
        &self,
        path: &Rc<NodePath<TypeNode>>,
        key: Option<&str>,
        value: Option<&str>,
    ) -> Result<(String, String)> {
        if let (Some(key), Some(value)) = (key, value) {
            return Ok((key.to_string(), value.to_string()));
        }
        if let Some(MemberOverride::EntryTypes { key, value }) = self.member_override(path) {
            return Ok((key.clone(), value.clone()));
        }
        Err(SynthError::UnparameterizedContainer {
            type_name: path.current().type_name.clone(),
            path: display_path(path),
        })
    }

    /// Override registered for the member that produced the current node.
    fn member_override(&self, path: &Rc<NodePath<TypeNode>>) -> Option<&MemberOverride> {
        let member = path.current().member.as_deref()?;
        let declaring_type = &path.parent()?.current().type_name;
        self.overrides.get(declaring_type, member)
    }

    /// A container type that reaches itself again without a record in
    /// between has nothing to short-circuit to: records register an
    /// in-progress shell their members can point back at, containers do
    /// not, so such a cycle would expand without bound.
    fn check_container_cycle(
        &self,
        path: &Rc<NodePath<TypeNode>>,
        type_name: &str,
        in_progress: &HashMap<String, Value>,
    ) -> Result<()> {
        let mut node = path.parent();
        while let Some(ancestor) = node {
            let ancestor_type = &ancestor.current().type_name;
            if ancestor_type == type_name {
                return Err(SynthError::ContainerCycle {
                    type_name: type_name.to_string(),
                    path: display_path(path),
                });
            }
            if in_progress.contains_key(ancestor_type) {
                // A record being built guards the cycle; re-entering it
                // reuses its shell.
                break;
            }
            node = ancestor.parent();
        }
        Ok(())
    }

    fn key_kind(&self, path: &Rc<NodePath<TypeNode>>, key_type: &str) -> Result<ScalarKind> {
        let descriptor = self
            .registry
            .get(key_type)
            .map_err(|e| self.resolution(path, e))?;
        // Keys must be scalar kinds a map key can represent and order
        // deterministically.
        match descriptor.shape {
            TypeShape::Scalar(
                kind @ (ScalarKind::Bool | ScalarKind::Int | ScalarKind::Text),
            ) => Ok(kind),
            _ => Err(SynthError::UnsupportedKey {
                type_name: key_type.to_string(),
                path: display_path(path),
            }),
        }
    }

    fn resolution(&self, path: &Rc<NodePath<TypeNode>>, source: burdock_core::Error) -> SynthError {
        SynthError::Resolution {
            path: display_path(path),
            source,
        }
    }
}

/// Render a type-node path for diagnostics: the root type name followed by
/// the originating member of each descent step.
fn display_path(path: &NodePath<TypeNode>) -> String {
    let mut out = String::new();
    for node in path.nodes() {
        let part = match &node.member {
            None => node.type_name.as_str(),
            Some(member) => member.as_str(),
        };
        if !out.is_empty() {
            out.push('.');
        }
        out.push_str(part);
    }
    out
}
