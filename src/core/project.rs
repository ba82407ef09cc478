//! Project snapshot - one module participating in a run.
//!
//! A Project carries identity, descriptive metadata (the parts that end up in a
//! published POM), the inheritance/publishing sections a buildable unit needs,
//! and the on-disk locations the host uses while building it.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::coordinate::{Coordinate, DEFAULT_TYPE};

/// Default POM model version.
pub const MODEL_VERSION: &str = "4.0.0";

/// File name of a module descriptor.
pub const POM_FILE_NAME: &str = "pom.xml";

/// A license entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct License {
    pub name: Option<String>,
    pub url: Option<String>,
    pub distribution: Option<String>,
    pub comments: Option<String>,
}

/// Source-control pointer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Scm {
    pub connection: Option<String>,
    pub developer_connection: Option<String>,
    pub url: Option<String>,
    pub tag: Option<String>,
}

/// A contributor entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Developer {
    pub id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub organization: Option<String>,
    pub url: Option<String>,
    pub roles: Vec<String>,
}

/// Parent linkage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Parent {
    pub group: String,
    pub artifact: String,
    pub version: String,
    #[serde(default)]
    pub relative_path: Option<String>,
}

/// A build profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Profile {
    pub id: String,
    pub active_by_default: bool,
    pub properties: BTreeMap<String, String>,
}

/// A deployment target.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeploymentRepository {
    pub id: String,
    pub url: String,
}

/// Where releases and snapshots are published.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct DistributionManagement {
    pub repository: Option<DeploymentRepository>,
    pub snapshot_repository: Option<DeploymentRepository>,
}

/// On-disk build locations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct BuildPaths {
    /// Build directory (`target/`)
    pub directory: PathBuf,
    /// Output directory (`target/classes/`)
    pub output_directory: PathBuf,
}

impl BuildPaths {
    /// The conventional layout under a module base directory.
    pub fn for_basedir(basedir: &Path) -> Self {
        let directory = basedir.join("target");
        BuildPaths {
            output_directory: directory.join("classes"),
            directory,
        }
    }
}

/// A module in the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Project {
    pub group: String,
    pub artifact: String,
    pub version: String,

    #[serde(default = "default_packaging")]
    pub packaging: String,

    #[serde(default = "default_model_version")]
    pub model_version: String,

    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub licenses: Vec<License>,
    #[serde(default)]
    pub scm: Option<Scm>,
    #[serde(default)]
    pub developers: Vec<Developer>,

    #[serde(default)]
    pub parent: Option<Parent>,
    #[serde(default)]
    pub profiles: Vec<Profile>,
    #[serde(default)]
    pub distribution_management: Option<DistributionManagement>,
    #[serde(default)]
    pub properties: BTreeMap<String, String>,

    /// Declared sub-modules (aggregators only)
    #[serde(default)]
    pub modules: Vec<String>,

    /// Declared direct dependencies
    #[serde(default)]
    pub dependencies: Vec<Coordinate>,

    /// Path of the module descriptor
    #[serde(default)]
    pub file: PathBuf,

    #[serde(default)]
    pub build: BuildPaths,

    /// Whether this module is where the run was started
    #[serde(default)]
    pub execution_root: bool,
}

fn default_packaging() -> String {
    DEFAULT_TYPE.to_string()
}

fn default_model_version() -> String {
    MODEL_VERSION.to_string()
}

impl Project {
    /// Create a `jar` project with no metadata.
    pub fn new(
        group: impl Into<String>,
        artifact: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Project {
            group: group.into(),
            artifact: artifact.into(),
            version: version.into(),
            packaging: default_packaging(),
            model_version: default_model_version(),
            name: None,
            description: None,
            url: None,
            licenses: Vec::new(),
            scm: None,
            developers: Vec::new(),
            parent: None,
            profiles: Vec::new(),
            distribution_management: None,
            properties: BTreeMap::new(),
            modules: Vec::new(),
            dependencies: Vec::new(),
            file: PathBuf::new(),
            build: BuildPaths::default(),
            execution_root: false,
        }
    }

    /// Set the packaging.
    pub fn with_packaging(mut self, packaging: impl Into<String>) -> Self {
        self.packaging = packaging.into();
        self
    }

    /// Set the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Add a declared dependency.
    pub fn with_dependency(mut self, dependency: Coordinate) -> Self {
        self.dependencies.push(dependency);
        self
    }

    /// Set the declared modules.
    pub fn with_modules<I, S>(mut self, modules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.modules = modules.into_iter().map(Into::into).collect();
        self
    }

    /// Place the project under `basedir` using the conventional layout.
    pub fn located_at(mut self, basedir: &Path) -> Self {
        self.file = basedir.join(POM_FILE_NAME);
        self.build = BuildPaths::for_basedir(basedir);
        self
    }

    /// Mark whether this is the execution root.
    pub fn execution_root(mut self, root: bool) -> Self {
        self.execution_root = root;
        self
    }

    /// The project's own artifact coordinate. Its type follows the packaging.
    pub fn artifact(&self) -> Coordinate {
        Coordinate::new(&self.group, &self.artifact, &self.version).with_kind(&self.packaging)
    }

    /// The `group:artifact:version` identifier.
    pub fn id(&self) -> String {
        format!("{}:{}:{}", self.group, self.artifact, self.version)
    }

    /// Name to show to users; falls back to the artifact id.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.artifact)
    }

    /// Directory holding the module descriptor.
    pub fn basedir(&self) -> &Path {
        self.file.parent().unwrap_or(Path::new("."))
    }

    /// Is this the module the run was started from?
    pub fn is_execution_root(&self) -> bool {
        self.execution_root
    }

    /// Does this module aggregate sub-modules?
    pub fn has_modules(&self) -> bool {
        !self.modules.is_empty()
    }
}
