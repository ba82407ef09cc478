//! Settings file support.
//!
//! Settings live in `Bom.toml` next to the reactor descriptor (or wherever
//! `--settings` points). A missing file means defaults: the built-in
//! template, `~/.m2/repository`, no remotes and the implicit BOM.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::core::BomConfig;
use crate::ops::render::TemplateRef;
use crate::ops::GenerateOptions;
use crate::resolver::RemoteRepository;
use crate::util::context::GlobalContext;

/// bomsmith settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Template settings
    pub template: TemplateConfig,

    /// Repository settings
    pub repository: RepositoryConfig,

    /// BOMs to generate
    #[serde(rename = "bom")]
    pub boms: Vec<BomConfig>,
}

/// Which template the renderer uses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Template file, relative to the settings file
    pub resource: Option<PathBuf>,

    /// Template URL
    pub url: Option<Url>,
}

impl TemplateConfig {
    /// The template reference. Relative resources resolve against `base`.
    pub fn template_ref(&self, base: &Path) -> Result<TemplateRef> {
        match (&self.resource, &self.url) {
            (Some(_), Some(_)) => bail!("[template] sets both `resource` and `url`"),
            (Some(resource), None) => Ok(TemplateRef::Resource(base.join(resource))),
            (None, Some(url)) => Ok(TemplateRef::Url(url.clone())),
            (None, None) => Ok(TemplateRef::Builtin),
        }
    }
}

/// Repository settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RepositoryConfig {
    /// Local repository; defaults to `~/.m2/repository`
    pub local: Option<PathBuf>,

    /// Remote repositories in lookup order
    pub remotes: Vec<RemoteRepository>,
}

impl Settings {
    /// Load settings from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read settings: {}", path.display()))?;

        Self::parse(&contents)
            .with_context(|| format!("failed to parse settings: {}", path.display()))
    }

    /// Parse settings from TOML.
    pub fn parse(contents: &str) -> Result<Self> {
        let settings: Settings = toml::from_str(contents)?;
        Ok(settings)
    }

    /// Load settings, falling back to defaults if the file doesn't exist.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!("no settings at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Generation options for these settings.
    ///
    /// `settings_dir` anchors relative paths.
    pub fn generate_options(
        &self,
        ctx: &GlobalContext,
        settings_dir: &Path,
    ) -> Result<GenerateOptions> {
        let local_repository = match &self.repository.local {
            Some(local) => settings_dir.join(local),
            None => ctx.local_repository().to_path_buf(),
        };

        Ok(GenerateOptions {
            configs: self.boms.clone(),
            template: self.template.template_ref(settings_dir)?,
            local_repository,
            remote_repositories: self.repository.remotes.clone(),
        })
    }
}
