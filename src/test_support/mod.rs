//! Test utilities and mocks for bomsmith unit tests.
//!
//! This module provides in-memory stand-ins for the three collaborators the
//! pipeline talks to: the resolver, the host run and the renderer.
//!
//! # Example
//!
//! ```rust,ignore
//! use bomsmith::test_support::{origin_project, MockResolver, RecordingReactor};
//!
//! #[test]
//! fn test_example() {
//!     let origin = origin_project();
//!     let mut resolver = MockResolver::new()
//!         .with_dependencies(origin.artifact(), vec![Coordinate::new("g", "a", "1")]);
//!     let mut reactor = RecordingReactor::new(vec![origin], Vec::new());
//!
//!     // Hand both to the pipeline...
//! }
//! ```

pub mod fixtures;

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::io::Write;

use anyhow::{anyhow, bail, Result};

use crate::core::{Coordinate, ManifestView, Project, TaskSegment};
use crate::ops::render::{ManifestRenderer, TemplateRef};
use crate::reactor::{ExecutionRequest, ProjectIndex, Reactor};
use crate::resolver::{DependencyResolver, ResolutionRequest, ResolveError};

// Re-export fixtures for convenience
pub use fixtures::*;

/// Mock resolver with canned closures.
///
/// Unknown artifacts resolve to no dependencies.
#[derive(Debug, Clone, Default)]
pub struct MockResolver {
    closures: HashMap<Coordinate, Vec<Coordinate>>,
    failing: HashSet<Coordinate>,
    calls: Vec<String>,
}

impl MockResolver {
    /// Create a resolver that knows nothing.
    pub fn new() -> Self {
        MockResolver::default()
    }

    /// Set the transitive closure of `artifact`.
    pub fn with_dependencies(
        mut self,
        artifact: Coordinate,
        dependencies: Vec<Coordinate>,
    ) -> Self {
        self.closures.insert(artifact, dependencies);
        self
    }

    /// Make resolving `artifact` fail.
    pub fn failing_on(mut self, artifact: Coordinate) -> Self {
        self.failing.insert(artifact);
        self
    }

    /// Artifacts requested so far, as `group:artifact:version`.
    pub fn calls(&self) -> &[String] {
        &self.calls
    }
}

impl DependencyResolver for MockResolver {
    fn resolve_transitive(
        &mut self,
        request: &ResolutionRequest<'_>,
    ) -> Result<Vec<Coordinate>, ResolveError> {
        self.calls.push(request.artifact.gav());

        if self.failing.contains(request.artifact) {
            return Err(ResolveError::Repository {
                repository: request.local_repository.display().to_string(),
                message: format!("mock failure for {}", request.artifact),
            });
        }
        Ok(self
            .closures
            .get(request.artifact)
            .cloned()
            .unwrap_or_default())
    }
}

/// Reactor that records what it was asked to do.
#[derive(Debug, Default)]
pub struct RecordingReactor {
    projects: Vec<Project>,
    segments: Vec<TaskSegment>,
    executions: Vec<(String, Vec<String>)>,
    indexes: Vec<ProjectIndex>,
}

impl RecordingReactor {
    /// Create a reactor over `projects` scheduling `segments`.
    pub fn new(projects: Vec<Project>, segments: Vec<TaskSegment>) -> Self {
        RecordingReactor {
            projects,
            segments,
            ..Default::default()
        }
    }

    /// `(unit id, task names)` per execute call.
    pub fn executions(&self) -> &[(String, Vec<String>)] {
        &self.executions
    }

    /// Did every execute call see `id` in its index?
    pub fn indexes_contained(&self, id: &str) -> bool {
        !self.indexes.is_empty() && self.indexes.iter().all(|index| index.contains(id))
    }
}

impl Reactor for RecordingReactor {
    fn projects(&self) -> &[Project] {
        &self.projects
    }

    fn set_projects(&mut self, projects: Vec<Project>) -> Result<()> {
        self.projects = projects;
        Ok(())
    }

    fn task_segments(&self) -> Result<Vec<TaskSegment>> {
        Ok(self.segments.clone())
    }

    fn execute(&mut self, request: &ExecutionRequest<'_>) -> Result<()> {
        let names = request
            .segment
            .task_names()
            .into_iter()
            .map(String::from)
            .collect();
        self.executions.push((request.unit.id(), names));
        self.indexes.push(request.index.clone());
        Ok(())
    }
}

/// Where a [`FailingReactor`] fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePoint {
    SetProjects,
    TaskSegments,
    Execute,
}

/// Reactor that fails at a chosen point.
#[derive(Debug)]
pub struct FailingReactor {
    projects: Vec<Project>,
    segments: Vec<TaskSegment>,
    fail_at: FailurePoint,
    attempts: usize,
}

impl FailingReactor {
    /// Fail on every execute call.
    pub fn on_execute(projects: Vec<Project>, segments: Vec<TaskSegment>) -> Self {
        FailingReactor {
            projects,
            segments,
            fail_at: FailurePoint::Execute,
            attempts: 0,
        }
    }

    /// Fail when asked for task segments.
    pub fn on_segments(projects: Vec<Project>) -> Self {
        FailingReactor {
            projects,
            segments: Vec::new(),
            fail_at: FailurePoint::TaskSegments,
            attempts: 0,
        }
    }

    /// Fail when the module list is replaced.
    pub fn on_set_projects(projects: Vec<Project>) -> Self {
        FailingReactor {
            projects,
            segments: Vec::new(),
            fail_at: FailurePoint::SetProjects,
            attempts: 0,
        }
    }

    /// Number of execute calls.
    pub fn attempts(&self) -> usize {
        self.attempts
    }
}

impl Reactor for FailingReactor {
    fn projects(&self) -> &[Project] {
        &self.projects
    }

    fn set_projects(&mut self, projects: Vec<Project>) -> Result<()> {
        if self.fail_at == FailurePoint::SetProjects {
            bail!("mock graph failure");
        }
        self.projects = projects;
        Ok(())
    }

    fn task_segments(&self) -> Result<Vec<TaskSegment>> {
        if self.fail_at == FailurePoint::TaskSegments {
            bail!("mock segment failure");
        }
        Ok(self.segments.clone())
    }

    fn execute(&mut self, request: &ExecutionRequest<'_>) -> Result<()> {
        self.attempts += 1;
        Err(anyhow!("mock execution failure for {}", request.unit.id()))
    }
}

/// Renderer that keeps every model it was given.
#[derive(Debug, Default)]
pub struct MemoryRenderer {
    rendered: RefCell<Vec<ManifestView>>,
    fail_for: Option<String>,
}

impl MemoryRenderer {
    /// Create a renderer that always succeeds.
    pub fn new() -> Self {
        MemoryRenderer::default()
    }

    /// Create a renderer that fails for one artifact id.
    pub fn failing_for(artifact_id: &str) -> Self {
        MemoryRenderer {
            fail_for: Some(artifact_id.to_string()),
            ..Default::default()
        }
    }

    /// Models rendered so far.
    pub fn rendered(&self) -> Vec<ManifestView> {
        self.rendered.borrow().clone()
    }
}

impl ManifestRenderer for MemoryRenderer {
    fn render(
        &self,
        model: &ManifestView,
        _template: &TemplateRef,
        out: &mut dyn Write,
    ) -> Result<()> {
        if self.fail_for.as_deref() == Some(model.artifact.as_str()) {
            bail!("mock render failure for {}", model.artifact);
        }
        writeln!(out, "<project><artifactId>{}</artifactId></project>", model.artifact)?;
        self.rendered.borrow_mut().push(model.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BuildableView, GoalFilter};
    use crate::ops::inject;

    #[test]
    fn test_mock_resolver_records_calls() {
        let a = Coordinate::new("g", "a", "1");
        let mut resolver = MockResolver::new()
            .with_dependencies(a.clone(), vec![Coordinate::new("g", "b", "1")]);
        let request = ResolutionRequest {
            artifact: &a,
            local_repository: std::path::Path::new("/tmp/repo"),
            remote_repositories: &[],
        };

        assert_eq!(resolver.resolve_transitive(&request).unwrap().len(), 1);
        assert_eq!(resolver.calls(), &["g:a:1".to_string()]);
    }

    #[test]
    fn test_failing_reactor_on_set_projects() {
        let unit = BuildableView::new(project("g", "x-bom"));
        let mut reactor = FailingReactor::on_set_projects(Vec::new());

        let err = inject(&mut reactor, vec![origin_project()], &unit, &GoalFilter::default())
            .unwrap_err();
        assert!(err.to_string().contains("x-bom"));
        assert!(reactor.projects().is_empty());
    }
}
