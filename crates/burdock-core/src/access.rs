//! Member access over runtime values
//!
//! The uniform access capability consumed by synthesis and comparison:
//! get/set a record member, resolve dotted paths like `a.b.c` through
//! intermediate records, and look up a member's declared type. Failures
//! identify the segment that could not be resolved.

use crate::descriptor::TypeRegistry;
use crate::error::{Error, Result};
use crate::value::Value;

/// Read a direct member of a record value.
pub fn get_member(value: &Value, member: &str) -> Result<Value> {
    match value {
        Value::Record(cell) => {
            cell.borrow()
                .get(member)
                .cloned()
                .ok_or_else(|| Error::MemberNotFound {
                    type_name: cell.borrow().type_name().to_string(),
                    member: member.to_string(),
                })
        }
        other => Err(Error::NotARecord(other.kind().to_string())),
    }
}

/// Write a direct member of a record value.
pub fn set_member(value: &Value, member: &str, new: Value) -> Result<()> {
    match value {
        Value::Record(cell) => {
            cell.borrow_mut().set(member, new);
            Ok(())
        }
        other => Err(Error::NotARecord(other.kind().to_string())),
    }
}

/// Resolve a dotted member path against a root value.
pub fn get_path(root: &Value, path: &str) -> Result<Value> {
    if path.is_empty() {
        return Err(Error::PathResolution {
            path: path.to_string(),
            segment: String::new(),
            reason: "empty path".to_string(),
        });
    }
    let mut current = root.clone();
    for segment in path.split('.') {
        current = get_member(&current, segment).map_err(|e| Error::PathResolution {
            path: path.to_string(),
            segment: segment.to_string(),
            reason: e.to_string(),
        })?;
    }
    Ok(current)
}

/// Set the value at a dotted member path. Every intermediate segment must
/// resolve to a record.
pub fn set_path(root: &Value, path: &str, new: Value) -> Result<()> {
    if path.is_empty() {
        return Err(Error::PathResolution {
            path: path.to_string(),
            segment: String::new(),
            reason: "empty path".to_string(),
        });
    }
    match path.rsplit_once('.') {
        Some((prefix, last)) => {
            let parent = get_path(root, prefix)?;
            set_member(&parent, last, new).map_err(|e| Error::PathResolution {
                path: path.to_string(),
                segment: last.to_string(),
                reason: e.to_string(),
            })
        }
        None => set_member(root, path, new).map_err(|e| Error::PathResolution {
            path: path.to_string(),
            segment: path.to_string(),
            reason: e.to_string(),
        }),
    }
}

/// Declared type of a (possibly dotted) member path, starting from a root
/// type name.
pub fn declared_type(registry: &TypeRegistry, root_type: &str, path: &str) -> Result<String> {
    if path.is_empty() {
        return Err(Error::PathResolution {
            path: path.to_string(),
            segment: String::new(),
            reason: "empty path".to_string(),
        });
    }
    let mut current = root_type.to_string();
    for segment in path.split('.') {
        current = registry
            .member_type(&current, segment)
            .map_err(|e| Error::PathResolution {
                path: path.to_string(),
                segment: segment.to_string(),
                reason: e.to_string(),
            })?;
    }
    Ok(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{Field, ScalarKind, TypeDescriptor};
    use crate::value::Record;

    fn address_book() -> Value {
        let address = Record::new("Address").with_member("city", Value::text("Springfield"));
        Value::record(
            Record::new("Person")
                .with_member("name", Value::text("A"))
                .with_member("address", Value::record(address)),
        )
    }

    #[test]
    fn test_get_member() {
        let person = address_book();
        let name = get_member(&person, "name").unwrap();
        assert!(name.scalar_eq(&Value::text("A")));
    }

    #[test]
    fn test_get_member_on_scalar_fails() {
        let err = get_member(&Value::Int(1), "name").unwrap_err();
        assert!(matches!(err, Error::NotARecord(kind) if kind == "int"));
    }

    #[test]
    fn test_get_path_dotted() {
        let person = address_book();
        let city = get_path(&person, "address.city").unwrap();
        assert!(city.scalar_eq(&Value::text("Springfield")));
    }

    #[test]
    fn test_get_path_reports_failing_segment() {
        let person = address_book();
        let err = get_path(&person, "address.zip").unwrap_err();
        match err {
            Error::PathResolution { path, segment, .. } => {
                assert_eq!(path, "address.zip");
                assert_eq!(segment, "zip");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_set_path_dotted() {
        let person = address_book();
        set_path(&person, "address.city", Value::text("Shelbyville")).unwrap();

        let city = get_path(&person, "address.city").unwrap();
        assert!(city.scalar_eq(&Value::text("Shelbyville")));
    }

    #[test]
    fn test_set_path_single_segment() {
        let person = address_book();
        set_path(&person, "name", Value::text("B")).unwrap();
        assert!(get_member(&person, "name").unwrap().scalar_eq(&Value::text("B")));
    }

    #[test]
    fn test_declared_type() {
        let registry = TypeRegistry::new()
            .with_type(TypeDescriptor::scalar("Text", ScalarKind::Text))
            .with_type(TypeDescriptor::record("Address").with_field(Field::new("city", "Text")))
            .with_type(
                TypeDescriptor::record("Person").with_field(Field::new("address", "Address")),
            );

        assert_eq!(declared_type(&registry, "Person", "address").unwrap(), "Address");
        assert_eq!(declared_type(&registry, "Person", "address.city").unwrap(), "Text");

        let err = declared_type(&registry, "Person", "address.zip").unwrap_err();
        assert!(matches!(err, Error::PathResolution { segment, .. } if segment == "zip"));
    }
}
