//! Macro implementations

mod searchable;

pub use searchable::derive_searchable;
