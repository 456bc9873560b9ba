//! # Solvergen Core Library
//!
//! Generates standalone, compilable solver projects for parametric optimization
//! problems. The library does not implement an optimizer; it assembles a source tree
//! out of static template fragments, problem-specific constants and constraint-dependent
//! snippets, then hands off to an external differentiation backend and to `cargo`.
//!
//! ## Architectural Philosophy
//!
//! The library mirrors a strict three-layer architecture:
//!
//! - **[`core`]: The Foundation.** Immutable data models (`ProjectConfig`, `ProblemSpec`),
//!   the embedded template store and the pure text generators (manifest, constants,
//!   C header, constraint snippets).
//!
//! - **[`engine`]: The Side Effects.** Everything that touches the filesystem or spawns a
//!   process: the project scaffolder, the source assembler, the command runner and the
//!   differentiation backend seam.
//!
//! - **[`workflows`]: The Public API.** Ties `core` and `engine` together into one linear
//!   generation pass.

pub mod core;
pub mod engine;
pub mod workflows;
