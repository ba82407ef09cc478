//! BOM configuration - what to put in one generated bill of materials.
//!
//! [`BomConfig`] is the raw form as written in `Bom.toml`. Before any work is
//! done it is validated and compiled into a [`BomSpec`], which carries parsed
//! pattern filters.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::pattern::{PatternError, PatternFilter};
use crate::core::task::GoalFilter;
use crate::core::Project;

/// Suffix of the implicit BOM's artifact id.
pub const DEFAULT_BOM_SUFFIX: &str = "-bom";

/// Description of the implicit BOM.
pub const DEFAULT_BOM_DESCRIPTION: &str = "Generated bom";

static ARTIFACT_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_.\-]+$").expect("artifact id pattern is valid"));

static GOAL_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_.\-]+(:[A-Za-z0-9_.\-]+)*$").expect("goal name pattern is valid")
});

/// A BOM configuration failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("bom `artifact-id` must not be empty")]
    EmptyArtifactId,

    #[error("invalid bom artifact id `{0}`")]
    InvalidArtifactId(String),

    #[error("invalid goal name `{goal}` in bom `{artifact_id}`")]
    InvalidGoal { artifact_id: String, goal: String },

    #[error(transparent)]
    Pattern(#[from] PatternError),
}

/// Raw include/exclude patterns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSpec {
    pub includes: Vec<String>,
    pub excludes: Vec<String>,
}

impl FilterSpec {
    /// Create a filter spec.
    pub fn new<I, E, S>(includes: I, excludes: E) -> Self
    where
        I: IntoIterator<Item = S>,
        E: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FilterSpec {
            includes: includes.into_iter().map(Into::into).collect(),
            excludes: excludes.into_iter().map(Into::into).collect(),
        }
    }

    fn compile(&self) -> Result<PatternFilter, PatternError> {
        PatternFilter::parse(&self.includes, &self.excludes)
    }
}

/// One `[[bom]]` entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct BomConfig {
    /// Artifact id of the generated BOM
    pub artifact_id: String,

    /// Display name
    #[serde(default)]
    pub name: Option<String>,

    /// Description
    #[serde(default)]
    pub description: Option<String>,

    /// Which run modules contribute (default: all)
    #[serde(default)]
    pub modules: FilterSpec,

    /// Which transitive dependencies of contributing modules are listed
    #[serde(default)]
    pub dependencies: FilterSpec,

    /// Which lifecycle tasks are replayed against the generated unit
    #[serde(default)]
    pub goals: GoalFilter,

    /// Extra properties for the generated unit
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
}

impl BomConfig {
    /// Create a config with only an artifact id.
    pub fn new(artifact_id: impl Into<String>) -> Self {
        BomConfig {
            artifact_id: artifact_id.into(),
            ..Default::default()
        }
    }

    /// The implicit config used when none are supplied: `<artifact>-bom`.
    pub fn default_for(origin: &Project) -> Self {
        BomConfig {
            artifact_id: format!("{}{}", origin.artifact, DEFAULT_BOM_SUFFIX),
            name: Some(format!("{} Bom", origin.display_name())),
            description: Some(DEFAULT_BOM_DESCRIPTION.to_string()),
            ..Default::default()
        }
    }

    /// Set the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the module filter.
    pub fn with_modules(mut self, modules: FilterSpec) -> Self {
        self.modules = modules;
        self
    }

    /// Set the dependency filter.
    pub fn with_dependencies(mut self, dependencies: FilterSpec) -> Self {
        self.dependencies = dependencies;
        self
    }

    /// Set the goal filter.
    pub fn with_goals(mut self, goals: GoalFilter) -> Self {
        self.goals = goals;
        self
    }

    /// Add an extra property.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Validate and compile the config.
    pub fn compile(&self) -> Result<BomSpec, ConfigError> {
        let artifact_id = self.artifact_id.trim();
        if artifact_id.is_empty() {
            return Err(ConfigError::EmptyArtifactId);
        }
        if !ARTIFACT_ID.is_match(artifact_id) {
            return Err(ConfigError::InvalidArtifactId(artifact_id.to_string()));
        }

        if let Some(goal) = self.goals.names().find(|g| !GOAL_NAME.is_match(g)) {
            return Err(ConfigError::InvalidGoal {
                artifact_id: artifact_id.to_string(),
                goal: goal.to_string(),
            });
        }

        Ok(BomSpec {
            artifact_id: artifact_id.to_string(),
            name: self.name.clone(),
            description: self.description.clone(),
            modules: self.modules.compile()?.or_match_all(),
            dependencies: self.dependencies.compile()?,
            goals: self.goals.clone(),
            properties: self.properties.clone(),
        })
    }
}

/// A validated BOM configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BomSpec {
    pub artifact_id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    /// Module filter; empty includes were replaced by `*:*`
    pub modules: PatternFilter,
    pub dependencies: PatternFilter,
    pub goals: GoalFilter,
    pub properties: BTreeMap<String, String>,
}
