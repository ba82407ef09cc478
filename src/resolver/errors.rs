//! Resolution error types.

use thiserror::Error;

/// Error while resolving an artifact's transitive dependencies.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("artifact not found: `{artifact}`")]
    NotFound {
        artifact: String,
        suggestions: Vec<String>,
    },

    #[error("cycle detected in dependency graph: {}", .path.join(" -> "))]
    CycleDetected { path: Vec<String> },

    #[error("repository error for `{repository}`: {message}")]
    Repository { repository: String, message: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ResolveError {
    /// Hint lines to show with the error.
    pub fn hints(&self) -> Vec<String> {
        match self {
            ResolveError::NotFound { suggestions, .. } if !suggestions.is_empty() => {
                vec![format!("did you mean: {}?", suggestions.join(", "))]
            }
            ResolveError::NotFound { .. } => {
                vec!["Check that the artifact is declared in the reactor descriptor".to_string()]
            }
            ResolveError::CycleDetected { .. } => {
                vec!["Break the cycle by removing or restructuring dependencies".to_string()]
            }
            ResolveError::Repository { .. } => {
                vec!["Verify the repository URL is correct".to_string()]
            }
            ResolveError::Other(_) => Vec::new(),
        }
    }
}
