//! Burdock Synth - Synthetic value factory
//!
//! Fabricates structurally-complete instances of registered types for use
//! as deterministic test fixtures: scalars get fixed sentinels, containers
//! get exactly two synthesized entries, records are populated member by
//! member, and recursive types come out as cyclic instances.

pub mod error;
pub mod factory;
pub mod overrides;
pub mod strategy;

pub use error::{Result, SynthError};
pub use factory::ValueFactory;
pub use overrides::{MemberKey, MemberOverride, SynthOverrides};
pub use strategy::{DefaultStrategy, ValueStrategy};
