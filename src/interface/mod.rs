//! Indexed-Sequence Interface
//!
//! This module defines the small capability surface the sort consumes
//! (length, comparison, swaps, and the shift/cyclic-swap primitives),
//! together with concrete adapters for common element types.

pub mod adapters;
pub mod sortable;

pub use adapters::*;
pub use sortable::*;
