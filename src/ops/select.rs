//! Selection: which coordinates go into one BOM.
//!
//! Every run module whose own coordinate passes the module filter is placed in
//! a bucket by its packaging, and every transitive dependency of that module
//! that passes the dependency filter is listed as a library. This is the only
//! stage that talks to the resolver.

use std::path::Path;

use serde::Serialize;

use crate::core::{BomSpec, Coordinate, CoordinateSet, Project};
use crate::ops::errors::BomError;
use crate::resolver::{DependencyResolver, RemoteRepository, ResolutionRequest};

/// Repositories available to the resolver for one run.
#[derive(Debug, Clone, Copy)]
pub struct Repositories<'a> {
    pub local: &'a Path,
    pub remotes: &'a [RemoteRepository],
}

/// The three buckets of one BOM.
///
/// Buckets are disjoint and keep insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Selection {
    /// Ordinary artifacts, listed under dependency management
    pub libraries: CoordinateSet,
    /// `maven-plugin` modules, listed under plugin management
    pub plugins: CoordinateSet,
    /// `pom` modules (parents and aggregators)
    pub poms: CoordinateSet,
}

impl Selection {
    /// Is the coordinate in any bucket?
    pub fn contains(&self, coordinate: &Coordinate) -> bool {
        self.libraries.contains(coordinate)
            || self.plugins.contains(coordinate)
            || self.poms.contains(coordinate)
    }

    /// Total number of selected coordinates.
    pub fn len(&self) -> usize {
        self.libraries.len() + self.plugins.len() + self.poms.len()
    }

    /// Is nothing selected?
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn classify(&mut self, artifact: Coordinate) {
        if artifact.is_plugin() {
            self.plugins.insert(artifact);
        } else if artifact.is_pom() {
            self.poms.insert(artifact);
        } else {
            self.libraries.insert(artifact);
        }
    }

    fn add_library(&mut self, dependency: Coordinate) {
        if self.plugins.contains(&dependency) || self.poms.contains(&dependency) {
            return;
        }
        self.libraries.insert(dependency);
    }
}

/// Select the coordinates of one BOM from the run's modules.
///
/// Modules are visited in run order. A resolution failure for any contributing
/// module fails the whole selection.
pub fn select<R>(
    projects: &[Project],
    spec: &BomSpec,
    resolver: &mut R,
    repositories: &Repositories<'_>,
) -> Result<Selection, BomError>
where
    R: DependencyResolver + ?Sized,
{
    let mut selection = Selection::default();

    for module in projects {
        let artifact = module.artifact();
        if !spec.modules.accepts(&artifact) {
            tracing::debug!("module {} not selected for {}", artifact, spec.artifact_id);
            continue;
        }
        selection.classify(artifact.clone());

        let request = ResolutionRequest {
            artifact: &artifact,
            local_repository: repositories.local,
            remote_repositories: repositories.remotes,
        };
        let dependencies =
            resolver
                .resolve_transitive(&request)
                .map_err(|source| BomError::Resolution {
                    module: module.id(),
                    source,
                })?;

        for dependency in dependencies {
            if spec.dependencies.accepts(&dependency) {
                selection.add_library(dependency);
            }
        }
    }

    tracing::debug!(
        "selected {} libraries, {} plugins, {} poms for {}",
        selection.libraries.len(),
        selection.plugins.len(),
        selection.poms.len(),
        spec.artifact_id
    );

    Ok(selection)
}
