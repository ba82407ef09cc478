//! Command implementations

pub mod check;
pub mod generate;
pub mod select;

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::cli::RunArgs;
use bomsmith::core::{BomConfig, Project};
use bomsmith::reactor::ReactorDescriptor;
use bomsmith::util::context::SETTINGS_FILE;
use bomsmith::util::diagnostic::emit;
use bomsmith::util::{GlobalContext, Settings};
use bomsmith::{BomError, GenerateOptions};

/// A loaded run: its modules, the descriptor they came from and the options.
pub struct LoadedRun {
    pub descriptor: ReactorDescriptor,
    pub projects: Vec<Project>,
    pub opts: GenerateOptions,
}

impl LoadedRun {
    /// Load the reactor descriptor and the settings `args` points at.
    pub fn load(args: &RunArgs) -> Result<Self> {
        let mut ctx = GlobalContext::new()?;

        let reactor_path = ctx.resolve_path(&args.reactor);
        let descriptor = ReactorDescriptor::load(&reactor_path)?;

        let settings_path = match &args.settings {
            Some(path) => ctx.resolve_path(path),
            None => parent_dir(&reactor_path, ctx.cwd()).join(SETTINGS_FILE),
        };
        let settings = Settings::load_or_default(&settings_path)?;
        let mut opts =
            settings.generate_options(&ctx, &parent_dir(&settings_path, ctx.cwd()))?;

        if let Some(local) = &args.local_repository {
            ctx.set_local_repository(ctx.resolve_path(local));
            opts.local_repository = ctx.local_repository().to_path_buf();
        }
        tracing::debug!("local repository: {}", opts.local_repository.display());

        let projects = descriptor.projects();
        Ok(LoadedRun {
            descriptor,
            projects,
            opts,
        })
    }

    /// The execution root of the run.
    pub fn origin(&self) -> &Project {
        &self.projects[0]
    }

    /// The configs to run, or the implicit default BOM.
    pub fn configs(&self) -> Vec<BomConfig> {
        if self.opts.configs.is_empty() {
            vec![BomConfig::default_for(self.origin())]
        } else {
            self.opts.configs.clone()
        }
    }
}

fn parent_dir(path: &Path, fallback: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => fallback.to_path_buf(),
    }
}

/// Print a BOM error with its hints and exit.
pub fn fail(err: &BomError, color: bool) -> ! {
    emit(err, color);
    std::process::exit(1);
}
