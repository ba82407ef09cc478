//! Dependency resolution.
//!
//! Resolving an artifact's transitive closure is delegated to a
//! [`DependencyResolver`]. The selection stage is the only caller; it issues one
//! request per contributing module.

pub mod errors;
pub mod graph;

pub use errors::ResolveError;
pub use graph::{ExternalArtifact, GraphResolver};

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::core::Coordinate;

/// A remote repository artifacts may be fetched from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteRepository {
    /// Repository id (e.g. `central`)
    pub id: String,
    /// Base URL
    pub url: Url,
}

impl RemoteRepository {
    /// Create a repository entry.
    pub fn new(id: impl Into<String>, url: Url) -> Self {
        RemoteRepository { id: id.into(), url }
    }
}

impl fmt::Display for RemoteRepository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.id, self.url)
    }
}

/// One transitive-resolution request.
#[derive(Debug, Clone, Copy)]
pub struct ResolutionRequest<'a> {
    /// Artifact whose dependencies are wanted
    pub artifact: &'a Coordinate,
    /// Local repository path
    pub local_repository: &'a Path,
    /// Remote repositories to consult
    pub remote_repositories: &'a [RemoteRepository],
}

/// Resolves the transitive dependency closure of one artifact.
pub trait DependencyResolver {
    /// Resolve every dependency reachable from `request.artifact`, excluding
    /// the artifact itself. Order is resolution order.
    fn resolve_transitive(
        &mut self,
        request: &ResolutionRequest<'_>,
    ) -> Result<Vec<Coordinate>, ResolveError>;
}

impl<R: DependencyResolver + ?Sized> DependencyResolver for &mut R {
    fn resolve_transitive(
        &mut self,
        request: &ResolutionRequest<'_>,
    ) -> Result<Vec<Coordinate>, ResolveError> {
        (**self).resolve_transitive(request)
    }
}
