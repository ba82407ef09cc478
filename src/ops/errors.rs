//! Errors raised while generating a BOM.

use std::error::Error as StdError;
use std::fmt;
use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

use crate::core::{ConfigError, PatternError};
use crate::resolver::ResolveError;
use crate::util::diagnostic::suggestions;

/// Boxed collaborator failure.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Failure while generating or injecting one BOM.
#[derive(Debug, Error)]
pub enum BomError {
    #[error("invalid coordinate pattern in bom `{artifact_id}`")]
    InvalidPattern {
        artifact_id: String,
        #[source]
        source: PatternError,
    },

    #[error("invalid bom configuration")]
    InvalidConfig(#[source] ConfigError),

    #[error("failed to create output directory for bom `{artifact_id}`: {}", .path.display())]
    DirectoryCreation {
        artifact_id: String,
        path: PathBuf,
        #[source]
        source: BoxError,
    },

    #[error("failed to resolve dependencies of `{module}`")]
    Resolution {
        module: String,
        #[source]
        source: ResolveError,
    },

    #[error("failed to generate bom `{artifact_id}`")]
    Render {
        artifact_id: String,
        #[source]
        source: BoxError,
    },

    #[error("error building generated bom: {artifact_id}")]
    Injection {
        artifact_id: String,
        #[source]
        source: BoxError,
    },
}

impl Diagnostic for BomError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match self {
            BomError::InvalidPattern { .. } => "bomsmith::pattern::invalid",
            BomError::InvalidConfig(_) => "bomsmith::config::invalid",
            BomError::DirectoryCreation { .. } => "bomsmith::fs::create_dir",
            BomError::Resolution { .. } => "bomsmith::resolve::failed",
            BomError::Render { .. } => "bomsmith::render::failed",
            BomError::Injection { .. } => "bomsmith::inject::failed",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match self {
            BomError::InvalidPattern { .. } => suggestions::PATTERN_FORMAT.to_string(),
            BomError::InvalidConfig(_) => suggestions::CHECK_SETTINGS.to_string(),
            BomError::DirectoryCreation { path, .. } => {
                format!("Check that {} is writable", path.display())
            }
            BomError::Resolution { source, .. } => {
                let hints = source.hints();
                if hints.is_empty() {
                    return None;
                }
                hints.join("\n")
            }
            BomError::Render { .. } => suggestions::BUILTIN_TEMPLATE.to_string(),
            BomError::Injection { .. } => suggestions::VERBOSE.to_string(),
        };
        Some(Box::new(help))
    }
}

impl From<ConfigError> for BomError {
    fn from(err: ConfigError) -> Self {
        BomError::from_config(None, err)
    }
}

impl BomError {
    /// Classify a config failure. Pattern failures get their own variant.
    pub fn from_config(artifact_id: Option<&str>, err: ConfigError) -> Self {
        match err {
            ConfigError::Pattern(source) => BomError::InvalidPattern {
                artifact_id: artifact_id.unwrap_or_default().to_string(),
                source,
            },
            other => BomError::InvalidConfig(other),
        }
    }

    /// Artifact id of the BOM the error belongs to, when known.
    pub fn artifact_id(&self) -> Option<&str> {
        match self {
            BomError::InvalidPattern { artifact_id, .. }
            | BomError::DirectoryCreation { artifact_id, .. }
            | BomError::Render { artifact_id, .. }
            | BomError::Injection { artifact_id, .. } => Some(artifact_id),
            BomError::InvalidConfig(_) | BomError::Resolution { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BomConfig, FilterSpec};
    use crate::util::diagnostic::render;

    #[test]
    fn test_pattern_error_is_classified() {
        let cfg = BomConfig::new("x-bom").with_modules(FilterSpec::new(["broken"], []));
        let err = BomError::from_config(Some("x-bom"), cfg.compile().unwrap_err());

        assert!(matches!(err, BomError::InvalidPattern { .. }));
        assert_eq!(err.artifact_id(), Some("x-bom"));
        assert_eq!(
            err.code().map(|c| c.to_string()).as_deref(),
            Some("bomsmith::pattern::invalid")
        );
    }

    #[test]
    fn test_other_config_errors() {
        let err = BomError::from(ConfigError::EmptyArtifactId);
        assert!(matches!(err, BomError::InvalidConfig(_)));
        assert_eq!(err.artifact_id(), None);
    }

    #[test]
    fn test_injection_message_and_report() {
        let err = BomError::Injection {
            artifact_id: "acme-bom".into(),
            source: "segment failed".into(),
        };

        assert_eq!(err.to_string(), "error building generated bom: acme-bom");
        let output = render(&err, false);
        assert!(output.contains("bomsmith::inject::failed"));
        assert!(output.contains("segment failed"));
        assert!(output.contains(suggestions::VERBOSE));
    }

    #[test]
    fn test_resolution_diagnostic_carries_hints() {
        let err = BomError::Resolution {
            module: "g:a:1".into(),
            source: ResolveError::NotFound {
                artifact: "g:a:1".into(),
                suggestions: vec!["g:a:2".into()],
            },
        };
        let help = err.help().map(|h| h.to_string());
        assert_eq!(help.as_deref(), Some("did you mean: g:a:2?"));
        assert!(render(&err, false).contains("did you mean: g:a:2?"));
    }

    #[test]
    fn test_resolution_without_hints_has_no_help() {
        let err = BomError::Resolution {
            module: "g:a:1".into(),
            source: ResolveError::Other(anyhow::anyhow!("repository offline")),
        };
        assert!(err.help().is_none());
    }
}
