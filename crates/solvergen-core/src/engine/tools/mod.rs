//! External tool orchestration.
//!
//! Every subprocess is described by an [`runner::Invocation`] that carries its own
//! working directory; the generator never changes the working directory of its own
//! process.

pub mod backend;
pub mod build;
pub mod runner;
