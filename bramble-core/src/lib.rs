//! Core functionality for bramble property-based test data generation.
//!
//! This crate provides the fundamental building blocks: splittable
//! seeds, lazy shrink trees, generator combinators, and the property
//! runner that searches those trees for minimal counterexamples.

pub mod data;
pub mod error;
pub mod gen;
pub mod property;
pub mod sample;
pub mod tree;

// Re-export the main types
pub use data::*;
pub use error::*;
pub use gen::*;
pub use property::*;
pub use sample::*;
pub use tree::*;
