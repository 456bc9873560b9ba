//! # Engine Module
//!
//! The side-effecting half of the generator. Everything that touches the destination
//! tree or spawns a process lives here.
//!
//! ## Architecture
//!
//! - **Scaffolding** ([`scaffold`]) - Prepares the destination and copies the static
//!   support library
//! - **Assembly** ([`assembler`]) - Writes the manifest, the C header and the
//!   entry-point source
//! - **External Tools** ([`tools`]) - Command runner seam, differentiation backend and
//!   build-command composition
//! - **Progress Monitoring** ([`progress`]) - Phase reporting for front ends
//! - **Error Handling** ([`error`]) - The single error type of a generation run
//!
//! All operations are blocking. A generation run exclusively owns its destination
//! directory; running two generations against the same destination concurrently is not
//! supported.

pub mod assembler;
pub mod error;
pub mod progress;
pub mod scaffold;
pub mod tools;
