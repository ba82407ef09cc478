//! The two views of a generated BOM unit.
//!
//! - [`ManifestView`] is the render model: identity, descriptive metadata and the
//!   managed dependency/plugin sections. It never has a build directory.
//! - [`BuildableView`] is the unit handed to the host so the rendered manifest
//!   gets built in the same run.

use std::path::Path;

use serde::Serialize;

use crate::core::project::{Developer, License, Scm};
use crate::core::{Coordinate, Project};

/// A `<dependencyManagement>` entry.
///
/// Carries no type or classifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManagedDependency {
    pub group: String,
    pub artifact: String,
    pub version: String,
    pub scope: Option<String>,
    pub optional: bool,
}

impl From<&Coordinate> for ManagedDependency {
    fn from(c: &Coordinate) -> Self {
        ManagedDependency {
            group: c.group.clone(),
            artifact: c.artifact.clone(),
            version: c.version.clone(),
            scope: c.scope.clone(),
            optional: c.optional,
        }
    }
}

/// A `<pluginManagement>` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManagedPlugin {
    pub group: String,
    pub artifact: String,
    pub version: String,
}

impl From<&Coordinate> for ManagedPlugin {
    fn from(c: &Coordinate) -> Self {
        ManagedPlugin {
            group: c.group.clone(),
            artifact: c.artifact.clone(),
            version: c.version.clone(),
        }
    }
}

/// Render-only view of a generated BOM.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestView {
    pub model_version: String,
    pub group: String,
    pub artifact: String,
    pub version: String,
    pub packaging: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub licenses: Vec<License>,
    pub scm: Option<Scm>,
    pub developers: Vec<Developer>,
    pub dependency_management: Vec<ManagedDependency>,
    /// Present only when at least one plugin was selected
    pub plugin_management: Option<Vec<ManagedPlugin>>,
}

impl ManifestView {
    /// The `group:artifact:version` identifier.
    pub fn id(&self) -> String {
        format!("{}:{}:{}", self.group, self.artifact, self.version)
    }
}

/// Executable view of a generated BOM.
///
/// Wraps a [`Project`] whose execution-root flag is cleared on construction and
/// cannot be set afterwards: a generated unit that became an execution root
/// would trigger generation again from inside its own build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildableView {
    project: Project,
}

impl BuildableView {
    /// Wrap a project as a generated unit.
    pub fn new(mut project: Project) -> Self {
        project.execution_root = false;
        BuildableView { project }
    }

    /// The unit as a run module.
    pub fn project(&self) -> &Project {
        &self.project
    }

    /// Unwrap into a run module.
    pub fn into_project(self) -> Project {
        self.project
    }

    /// Always false.
    pub fn is_execution_root(&self) -> bool {
        self.project.execution_root
    }

    /// Path of the rendered manifest.
    pub fn manifest_path(&self) -> &Path {
        &self.project.file
    }

    /// Artifact id of the unit.
    pub fn artifact_id(&self) -> &str {
        &self.project.artifact
    }

    /// The `group:artifact:version` identifier.
    pub fn id(&self) -> String {
        self.project.id()
    }
}
