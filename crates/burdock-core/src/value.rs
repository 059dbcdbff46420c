//! Runtime value model for object graphs
//!
//! Scalars are stored inline. Sequences, maps and records are reference
//! values: cloning a `Value` shares the underlying cell, which is what lets
//! a graph contain cycles and gives every reference value a stable identity
//! token for cycle detection.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

/// Identity token for a reference value, stable for the value's lifetime.
///
/// Two tokens are equal iff they come from the same shared cell. Scalars
/// have no identity; two equal scalars are indistinguishable by design.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId(usize);

/// Key of an associative container.
///
/// Restricted to ordered scalar kinds so map iteration order (and with it
/// traversal and mismatch order) is deterministic.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Key {
    Bool(bool),
    Int(i64),
    Text(String),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Bool(b) => write!(f, "{}", b),
            Key::Int(i) => write!(f, "{}", i),
            Key::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::Text(s.to_string())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key::Text(s)
    }
}

impl From<i64> for Key {
    fn from(i: i64) -> Self {
        Key::Int(i)
    }
}

/// A record instance: a type name plus members in declaration order.
#[derive(Debug, Clone)]
pub struct Record {
    type_name: String,
    members: IndexMap<String, Value>,
}

impl Record {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            members: IndexMap::new(),
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn get(&self, member: &str) -> Option<&Value> {
        self.members.get(member)
    }

    /// Set a member, inserting it if not present. Insertion order is
    /// preserved for iteration.
    pub fn set(&mut self, member: impl Into<String>, value: Value) {
        self.members.insert(member.into(), value);
    }

    pub fn members(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.members.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Build a record with an initial set of members.
    pub fn with_member(mut self, member: impl Into<String>, value: Value) -> Self {
        self.set(member, value);
        self
    }
}

/// A runtime value in an object graph.
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Timestamp(DateTime<Utc>),
    Enum {
        type_name: String,
        constant: String,
    },
    Seq(Rc<RefCell<Vec<Value>>>),
    Map(Rc<RefCell<BTreeMap<Key, Value>>>),
    Record(Rc<RefCell<Record>>),
}

impl Value {
    /// Wrap elements into a new sequence value.
    pub fn seq(items: Vec<Value>) -> Self {
        Value::Seq(Rc::new(RefCell::new(items)))
    }

    /// Wrap entries into a new map value.
    pub fn map(entries: BTreeMap<Key, Value>) -> Self {
        Value::Map(Rc::new(RefCell::new(entries)))
    }

    /// Wrap a record into a new record value.
    pub fn record(record: Record) -> Self {
        Value::Record(Rc::new(RefCell::new(record)))
    }

    pub fn text(s: impl Into<String>) -> Self {
        Value::Text(s.into())
    }

    pub fn enum_constant(type_name: impl Into<String>, constant: impl Into<String>) -> Self {
        Value::Enum {
            type_name: type_name.into(),
            constant: constant.into(),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// True for inline scalar values, including enum constants.
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            Value::Bool(_)
                | Value::Int(_)
                | Value::Float(_)
                | Value::Text(_)
                | Value::Timestamp(_)
                | Value::Enum { .. }
        )
    }

    /// Identity token of a reference value; `None` for scalars and null.
    pub fn identity(&self) -> Option<ObjectId> {
        match self {
            Value::Seq(cell) => Some(ObjectId(Rc::as_ptr(cell) as *const () as usize)),
            Value::Map(cell) => Some(ObjectId(Rc::as_ptr(cell) as *const () as usize)),
            Value::Record(cell) => Some(ObjectId(Rc::as_ptr(cell) as *const () as usize)),
            _ => None,
        }
    }

    /// Short kind name used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Text(_) => "text",
            Value::Timestamp(_) => "timestamp",
            Value::Enum { .. } => "enum",
            Value::Seq(_) => "seq",
            Value::Map(_) => "map",
            Value::Record(_) => "record",
        }
    }

    /// Value equality for scalar variants. Reference values are never
    /// scalar-equal; they are compared structurally by the deep comparator.
    pub fn scalar_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Timestamp(a), Value::Timestamp(b)) => a == b,
            (
                Value::Enum {
                    type_name: ta,
                    constant: ca,
                },
                Value::Enum {
                    type_name: tb,
                    constant: cb,
                },
            ) => ta == tb && ca == cb,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::Text(s) => write!(f, "\"{}\"", s),
            Value::Timestamp(t) => write!(f, "{}", t.to_rfc3339()),
            Value::Enum {
                type_name,
                constant,
            } => write!(f, "{}::{}", type_name, constant),
            Value::Seq(cell) => write!(f, "seq(len={})", cell.borrow().len()),
            Value::Map(cell) => write!(f, "map(len={})", cell.borrow().len()),
            Value::Record(cell) => write!(f, "record({})", cell.borrow().type_name()),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<Key> for Value {
    fn from(key: Key) -> Self {
        match key {
            Key::Bool(b) => Value::Bool(b),
            Key::Int(i) => Value::Int(i),
            Key::Text(s) => Value::Text(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clone_shares_identity() {
        let a = Value::seq(vec![Value::Int(1)]);
        let b = a.clone();
        let c = Value::seq(vec![Value::Int(1)]);

        assert_eq!(a.identity(), b.identity());
        assert_ne!(a.identity(), c.identity());
    }

    #[test]
    fn test_scalars_have_no_identity() {
        assert!(Value::Int(1).identity().is_none());
        assert!(Value::Null.identity().is_none());
        assert!(Value::text("x").identity().is_none());
    }

    #[test]
    fn test_record_preserves_member_order() {
        let record = Record::new("Person")
            .with_member("name", Value::text("A"))
            .with_member("age", Value::Int(30))
            .with_member("active", Value::Bool(true));

        let names: Vec<&str> = record.members().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["name", "age", "active"]);
    }

    #[test]
    fn test_scalar_eq() {
        assert!(Value::Int(1).scalar_eq(&Value::Int(1)));
        assert!(!Value::Int(1).scalar_eq(&Value::Int(2)));
        assert!(!Value::Int(1).scalar_eq(&Value::text("1")));
        assert!(Value::Null.scalar_eq(&Value::Null));
        assert!(Value::enum_constant("Color", "Red").scalar_eq(&Value::enum_constant("Color", "Red")));
        assert!(!Value::enum_constant("Color", "Red").scalar_eq(&Value::enum_constant("Color", "Blue")));
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::text("B").to_string(), "\"B\"");
        assert_eq!(Value::Int(3).to_string(), "3");
        assert_eq!(Value::Null.to_string(), "null");
        assert_eq!(Value::enum_constant("Color", "Red").to_string(), "Color::Red");
        assert_eq!(Value::seq(vec![Value::Int(1)]).to_string(), "seq(len=1)");
    }

    #[test]
    fn test_shared_mutation_is_visible_through_clones() {
        let a = Value::record(Record::new("Node"));
        let b = a.clone();

        if let Value::Record(cell) = &a {
            cell.borrow_mut().set("next", b.clone());
        }

        if let Value::Record(cell) = &b {
            assert!(cell.borrow().get("next").is_some());
        }
    }
}
