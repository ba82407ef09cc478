//! bomsmith - generate a bill of materials for a multi-module build
//!
//! This crate selects the artifacts of a run by coordinate pattern, renders
//! them into a BOM manifest, and builds that manifest as an extra unit of the
//! same run.

pub mod core;
pub mod ops;
pub mod reactor;
pub mod resolver;
pub mod util;

/// Test utilities and mocks for bomsmith unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests. It provides fixture projects and in-memory collaborators.
#[cfg(test)]
pub mod test_support;

pub use core::{BomConfig, Coordinate, CoordinatePattern, PatternSet, Project};
pub use ops::{generate_bom, BomError, GenerateOptions, GenerateReport};
pub use reactor::{LocalReactor, Reactor};
pub use resolver::{DependencyResolver, GraphResolver};
pub use util::context::GlobalContext;
