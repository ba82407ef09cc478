//! In-process host driven by a reactor descriptor.
//!
//! The descriptor is a TOML file listing the root project, its modules and any
//! external artifacts the modules depend on:
//!
//! ```toml
//! [root]
//! group = "org.acme"
//! artifact = "acme-parent"
//! version = "1.0"
//! packaging = "pom"
//! modules = ["core"]
//!
//! [[module]]
//! path = "core"
//! group = "org.acme"
//! artifact = "acme-core"
//! version = "1.0"
//! dependencies = [{ group = "org.slf4j", artifact = "slf4j-api", version = "2.0.9" }]
//!
//! [[external]]
//! group = "org.slf4j"
//! artifact = "slf4j-api"
//! version = "2.0.9"
//! ```

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::{Project, Task, TaskSegment};
use crate::reactor::{ExecutionRequest, Reactor};
use crate::resolver::{ExternalArtifact, GraphResolver};
use crate::util::fs;

/// Phase that publishes a unit into the local repository.
pub const INSTALL_PHASE: &str = "install";

/// A module entry in the descriptor.
#[derive(Debug, Clone, Deserialize)]
pub struct ModuleEntry {
    /// Base directory relative to the descriptor; defaults to the artifact id
    #[serde(default)]
    pub path: Option<PathBuf>,
    #[serde(flatten)]
    pub project: Project,
}

/// Parsed reactor descriptor.
#[derive(Debug, Clone, Deserialize)]
pub struct ReactorDescriptor {
    pub root: Project,
    #[serde(default, rename = "module")]
    pub modules: Vec<ModuleEntry>,
    #[serde(default, rename = "external")]
    pub externals: Vec<ExternalArtifact>,
    /// Directory the descriptor was loaded from
    #[serde(skip)]
    basedir: PathBuf,
}

impl ReactorDescriptor {
    /// Load a descriptor from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let mut descriptor: ReactorDescriptor = toml::from_str(&contents)
            .with_context(|| format!("failed to parse reactor descriptor: {}", path.display()))?;

        descriptor.basedir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        Ok(descriptor)
    }

    /// Parse a descriptor whose paths are relative to `basedir`.
    pub fn parse(contents: &str, basedir: &Path) -> Result<Self> {
        let mut descriptor: ReactorDescriptor =
            toml::from_str(contents).context("failed to parse reactor descriptor")?;
        descriptor.basedir = basedir.to_path_buf();
        Ok(descriptor)
    }

    /// The run's modules in build order: the root first, marked as execution root.
    pub fn projects(&self) -> Vec<Project> {
        let mut projects = Vec::with_capacity(self.modules.len() + 1);
        projects.push(
            self.root
                .clone()
                .located_at(&self.basedir)
                .execution_root(true),
        );

        for entry in &self.modules {
            let rel = entry
                .path
                .clone()
                .unwrap_or_else(|| PathBuf::from(&entry.project.artifact));
            projects.push(
                entry
                    .project
                    .clone()
                    .located_at(&self.basedir.join(rel))
                    .execution_root(false),
            );
        }
        projects
    }

    /// An offline resolver over the modules and external artifacts.
    pub fn resolver(&self) -> GraphResolver {
        GraphResolver::from_parts(&self.projects(), &self.externals)
    }
}

/// One task the host ran.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutedTask {
    /// `group:artifact:version` of the unit
    pub unit: String,
    /// Task name
    pub task: String,
}

/// A host that runs tasks in-process.
///
/// `install` copies the unit's manifest into the local repository; every other
/// task is only recorded.
#[derive(Debug)]
pub struct LocalReactor {
    projects: Vec<Project>,
    tasks: Vec<Task>,
    local_repository: PathBuf,
    executed: Vec<ExecutedTask>,
}

impl LocalReactor {
    /// Create a host over `projects` scheduling `tasks` in order.
    pub fn new(projects: Vec<Project>, tasks: Vec<Task>, local_repository: PathBuf) -> Self {
        LocalReactor {
            projects,
            tasks,
            local_repository,
            executed: Vec::new(),
        }
    }

    /// Every task run so far, in order.
    pub fn executed(&self) -> &[ExecutedTask] {
        &self.executed
    }

    /// Where `install` puts a unit's manifest.
    pub fn installed_path(&self, unit: &Project) -> PathBuf {
        let mut path = self.local_repository.clone();
        for part in unit.group.split('.') {
            path.push(part);
        }
        path.push(&unit.artifact);
        path.push(&unit.version);
        path.push(format!("{}-{}.pom", unit.artifact, unit.version));
        path
    }

    fn install(&self, unit: &Project) -> Result<()> {
        if !unit.file.is_file() {
            bail!(
                "cannot install {}: manifest not found at {}",
                unit.id(),
                unit.file.display()
            );
        }

        let dest = self.installed_path(unit);
        fs::copy_file(&unit.file, &dest)?;
        tracing::info!("Installing {} to {}", unit.file.display(), dest.display());
        Ok(())
    }
}

impl Reactor for LocalReactor {
    fn projects(&self) -> &[Project] {
        &self.projects
    }

    fn set_projects(&mut self, projects: Vec<Project>) -> Result<()> {
        if projects.is_empty() {
            bail!("a run needs at least one module");
        }
        self.projects = projects;
        Ok(())
    }

    fn task_segments(&self) -> Result<Vec<TaskSegment>> {
        if self.tasks.is_empty() {
            return Ok(Vec::new());
        }
        Ok(vec![TaskSegment::new(false, self.tasks.clone())])
    }

    fn execute(&mut self, request: &ExecutionRequest<'_>) -> Result<()> {
        let unit = request.unit;
        if !request.index.contains(&unit.id()) {
            bail!("{} is not part of the run", unit.id());
        }

        for task in &request.segment.tasks {
            tracing::debug!("running `{}` for {}", task, unit.id());
            if matches!(task, Task::Phase(name) if name == INSTALL_PHASE) {
                self.install(unit)?;
            }
            self.executed.push(ExecutedTask {
                unit: unit.id(),
                task: task.display_name().to_string(),
            });
        }
        Ok(())
    }
}
