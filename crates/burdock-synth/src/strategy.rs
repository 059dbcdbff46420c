//! Value generation strategies

use burdock_core::{Key, ScalarKind, Value};
use chrono::{DateTime, Utc};

/// Produces the per-node values used during synthesis.
///
/// Implementations must be deterministic: the factory's guarantee that two
/// independent runs build deep-equal fixtures rests on it.
pub trait ValueStrategy: Send + Sync {
    /// Sentinel for a scalar position.
    fn scalar(&self, kind: ScalarKind) -> Value;

    /// Key of the `index`-th synthesized map entry. Keys must be distinct
    /// per index or the map collapses below the requested size. Only
    /// called for the kinds `Key` can represent; the factory rejects
    /// float and timestamp key types before asking.
    fn scalar_key(&self, kind: ScalarKind, index: usize) -> Key;

    /// Constant chosen for an enum position; `None` when no constant is
    /// available.
    fn enum_constant(&self, type_name: &str, constants: &[String]) -> Option<String>;

    /// Number of elements or entries synthesized per container.
    fn container_len(&self) -> usize {
        2
    }
}

/// Default sentinels: numbers become 1, booleans true, text a fixed
/// literal, timestamps the Unix epoch; enums take their first declared
/// constant.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultStrategy;

impl ValueStrategy for DefaultStrategy {
    fn scalar(&self, kind: ScalarKind) -> Value {
        match kind {
            ScalarKind::Bool => Value::Bool(true),
            ScalarKind::Int => Value::Int(1),
            ScalarKind::Float => Value::Float(1.0),
            ScalarKind::Text => Value::text("value"),
            ScalarKind::Timestamp => Value::Timestamp(DateTime::<Utc>::UNIX_EPOCH),
        }
    }

    fn scalar_key(&self, kind: ScalarKind, index: usize) -> Key {
        match kind {
            ScalarKind::Bool => Key::Bool(index == 0),
            ScalarKind::Int => Key::Int(index as i64 + 1),
            ScalarKind::Text | ScalarKind::Float | ScalarKind::Timestamp => {
                Key::Text(format!("key{}", index))
            }
        }
    }

    fn enum_constant(&self, _type_name: &str, constants: &[String]) -> Option<String> {
        constants.first().cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_sentinels_are_non_default() {
        let strategy = DefaultStrategy;
        assert!(strategy.scalar(ScalarKind::Bool).scalar_eq(&Value::Bool(true)));
        assert!(strategy.scalar(ScalarKind::Int).scalar_eq(&Value::Int(1)));
        assert!(strategy.scalar(ScalarKind::Float).scalar_eq(&Value::Float(1.0)));
        assert!(strategy.scalar(ScalarKind::Text).scalar_eq(&Value::text("value")));
    }

    #[test]
    fn test_keys_are_distinct_per_index() {
        let strategy = DefaultStrategy;
        assert_ne!(
            strategy.scalar_key(ScalarKind::Int, 0),
            strategy.scalar_key(ScalarKind::Int, 1)
        );
        assert_ne!(
            strategy.scalar_key(ScalarKind::Text, 0),
            strategy.scalar_key(ScalarKind::Text, 1)
        );
        assert_ne!(
            strategy.scalar_key(ScalarKind::Bool, 0),
            strategy.scalar_key(ScalarKind::Bool, 1)
        );
    }

    #[test]
    fn test_first_enum_constant() {
        let strategy = DefaultStrategy;
        let constants = vec!["Red".to_string(), "Green".to_string()];
        assert_eq!(strategy.enum_constant("Color", &constants).as_deref(), Some("Red"));
        assert_eq!(strategy.enum_constant("Color", &[]), None);
    }
}
