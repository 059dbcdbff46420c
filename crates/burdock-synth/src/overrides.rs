//! Per-member synthesis overrides

use burdock_core::Value;
use std::collections::HashMap;
use std::fmt;

/// Key identifying one declared member: the declaring type plus the member
/// name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MemberKey {
    pub declaring_type: String,
    pub member: String,
}

impl MemberKey {
    pub fn new(declaring_type: impl Into<String>, member: impl Into<String>) -> Self {
        Self {
            declaring_type: declaring_type.into(),
            member: member.into(),
        }
    }
}

/// What to do for one overridden member.
pub enum MemberOverride {
    /// Element type to use when the declared container type is bare.
    ElementType(String),

    /// Key and value types to use when the declared map type is bare.
    EntryTypes { key: String, value: String },

    /// Produce the member's value with a caller-supplied generator. The
    /// generator must be deterministic for fixture synthesis to stay
    /// deterministic.
    Generator(Box<dyn Fn() -> Value + Send + Sync>),
}

impl fmt::Debug for MemberOverride {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemberOverride::ElementType(name) => f.debug_tuple("ElementType").field(name).finish(),
            MemberOverride::EntryTypes { key, value } => f
                .debug_struct("EntryTypes")
                .field("key", key)
                .field("value", value)
                .finish(),
            MemberOverride::Generator(_) => f.debug_tuple("Generator").finish(),
        }
    }
}

/// Registry of member overrides, checked before the default strategy.
///
/// Built at configuration time and read-only afterwards.
#[derive(Debug, Default)]
pub struct SynthOverrides {
    entries: HashMap<MemberKey, MemberOverride>,
}

impl SynthOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare the element type of a bare container member.
    pub fn with_element_type(
        mut self,
        declaring_type: impl Into<String>,
        member: impl Into<String>,
        element_type: impl Into<String>,
    ) -> Self {
        self.entries.insert(
            MemberKey::new(declaring_type, member),
            MemberOverride::ElementType(element_type.into()),
        );
        self
    }

    /// Declare the key and value types of a bare map member.
    pub fn with_entry_types(
        mut self,
        declaring_type: impl Into<String>,
        member: impl Into<String>,
        key_type: impl Into<String>,
        value_type: impl Into<String>,
    ) -> Self {
        self.entries.insert(
            MemberKey::new(declaring_type, member),
            MemberOverride::EntryTypes {
                key: key_type.into(),
                value: value_type.into(),
            },
        );
        self
    }

    /// Replace the generated value of a member entirely.
    pub fn with_generator(
        mut self,
        declaring_type: impl Into<String>,
        member: impl Into<String>,
        generator: impl Fn() -> Value + Send + Sync + 'static,
    ) -> Self {
        self.entries.insert(
            MemberKey::new(declaring_type, member),
            MemberOverride::Generator(Box::new(generator)),
        );
        self
    }

    pub fn get(&self, declaring_type: &str, member: &str) -> Option<&MemberOverride> {
        self.entries
            .get(&MemberKey::new(declaring_type, member))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
