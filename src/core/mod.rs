//! Core data structures for bomsmith.
//!
//! This module contains the value types the pipeline passes around:
//! - Artifact coordinates and coordinate patterns
//! - Project snapshots and the two generated-unit views
//! - BOM configuration
//! - Lifecycle tasks and goal filters

pub mod bom_config;
pub mod coordinate;
pub mod pattern;
pub mod project;
pub mod registry;
pub mod task;
pub mod view;

pub use bom_config::{BomConfig, BomSpec, ConfigError, FilterSpec};
pub use coordinate::{Coordinate, CoordinateSet};
pub use pattern::{CoordinatePattern, PatternError, PatternFilter, PatternSet};
pub use project::Project;
pub use registry::GeneratedRegistry;
pub use task::{GoalFilter, Task, TaskSegment};
pub use view::{BuildableView, ManagedDependency, ManagedPlugin, ManifestView};
