//! # Core Module
//!
//! Stateless building blocks of the generator.
//!
//! - **Data Models** ([`models`]) - Project configuration and problem description
//! - **Template Store** ([`templates`]) - Fixed fragments and the static support library,
//!   embedded into the binary at compile time
//! - **Code Generation** ([`codegen`]) - Pure functions turning models into source text
//!
//! Nothing in this module performs I/O; every generator returns a `String` that the
//! [`engine`](crate::engine) layer decides where to put.

pub mod codegen;
pub mod models;
pub mod templates;
