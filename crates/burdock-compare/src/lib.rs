//! Burdock Compare - Deep, path-aware comparison
//!
//! Walks two object graphs in parallel, dispatches per-node comparison by
//! the runtime type of the left operand through an ordered comparator
//! registry, and collects a path-qualified [`Mismatch`] for every
//! discrepancy. Cyclic graphs are handled with operand-pair identity
//! tracking, so two distinct self-referencing structures can be compared.

pub mod comparators;
pub mod engine;
pub mod matcher;
pub mod mismatch;
pub mod registry;

pub use comparators::{
    MapComparator, ScalarComparator, SeqComparator, StructuralComparator, ValueComparator,
};
pub use engine::{deep_compare, CompareContext, DeepComparator};
pub use matcher::{assert_deep_equal, is_deep_equal_to, DeepEqual};
pub use mismatch::Mismatch;
pub use registry::{ComparatorRegistry, TypeMatcher};
