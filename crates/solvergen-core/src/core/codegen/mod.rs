//! Pure text generators for the generated project.
//!
//! Each function here maps immutable inputs to source text and is deterministic:
//! the same inputs always produce byte-identical output.

pub mod constants;
pub mod constraints;
pub mod literal;
pub mod manifest;
pub mod network;
