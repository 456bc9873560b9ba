//! # Workflows Module
//!
//! High-level entry points that drive a complete generation run.
//!
//! ## Architecture
//!
//! - **Generate Workflow** ([`generate`]) - Scaffolds the destination, writes the
//!   manifest and C header, runs the differentiation backend, assembles the entry
//!   point and finally builds the project.
//!
//! A run is one strictly sequential pass. Every phase is reported through a
//! [`crate::engine::progress::ProgressReporter`] so front ends can render progress
//! without knowing the pipeline's internals.

pub mod generate;
