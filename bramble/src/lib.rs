//! Bramble property-based test data generation.
//!
//! This is the main entry point for the bramble library, re-exporting
//! the generator combinators, lazy shrink trees, and property runner
//! from `bramble-core`.

pub use bramble_core::*;
