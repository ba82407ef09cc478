//! High-level operations.
//!
//! The BOM pipeline: select, synthesize, render, inject.

pub mod errors;
pub mod generate_bom;
pub mod inject;
pub mod render;
pub mod select;
pub mod synthesize;

pub use errors::BomError;
pub use generate_bom::{generate_bom, GenerateOptions, GenerateReport, GeneratedBom, UnitState};
pub use inject::{inject, planned_projects};
pub use render::{ManifestRenderer, PomRenderer, RenderError, TemplateRef};
pub use select::{select, Repositories, Selection};
pub use synthesize::{buildable_view, manifest_path, manifest_view, CLEAN_SKIP};
