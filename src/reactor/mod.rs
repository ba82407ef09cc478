//! The host build run.
//!
//! A [`Reactor`] owns the ordered module list of one build invocation, knows
//! which task segments the invocation schedules, and executes a segment against
//! a single unit. BOM generation only ever talks to the host through this trait.

pub mod local;

pub use local::{LocalReactor, ReactorDescriptor};

use std::collections::HashMap;

use anyhow::Result;

use crate::core::{Project, TaskSegment};

/// The run collaborator.
pub trait Reactor {
    /// Modules in the run, in build order.
    fn projects(&self) -> &[Project];

    /// Replace the run's module list.
    fn set_projects(&mut self, projects: Vec<Project>) -> Result<()>;

    /// Task segments scheduled for this run.
    fn task_segments(&self) -> Result<Vec<TaskSegment>>;

    /// Run one segment against one unit.
    fn execute(&mut self, request: &ExecutionRequest<'_>) -> Result<()>;
}

/// Position of every module in the run, keyed on `group:artifact:version`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectIndex {
    positions: HashMap<String, usize>,
}

impl ProjectIndex {
    /// Index a module list. A repeated id keeps its first position.
    pub fn build(projects: &[Project]) -> Self {
        let mut positions = HashMap::with_capacity(projects.len());
        for (i, project) in projects.iter().enumerate() {
            positions.entry(project.id()).or_insert(i);
        }
        ProjectIndex { positions }
    }

    /// Build-order position of a module.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.positions.get(id).copied()
    }

    /// Is the module part of the run?
    pub fn contains(&self, id: &str) -> bool {
        self.positions.contains_key(id)
    }

    /// Number of indexed modules.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Is the index empty?
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// "Run this filtered segment against this one unit."
#[derive(Debug, Clone, Copy)]
pub struct ExecutionRequest<'a> {
    /// The unit to build
    pub unit: &'a Project,
    /// Tasks to run, already filtered
    pub segment: &'a TaskSegment,
    /// Index of the run after the unit was added
    pub index: &'a ProjectIndex,
}
