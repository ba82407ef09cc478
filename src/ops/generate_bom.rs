//! Generate BOMs for the run and build them in the same run.
//!
//! Runs only from the execution root of a multi-module build. Every config is
//! attempted: all manifests are rendered first, then each generated unit is
//! injected into the run. A failing config is logged and does not stop the
//! others; the first failure is returned once everything has been attempted.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::core::{BomConfig, BomSpec, BuildableView, GeneratedRegistry, Project, TaskSegment};
use crate::ops::errors::BomError;
use crate::ops::inject::{inject, planned_projects};
use crate::ops::render::{ManifestRenderer, TemplateRef};
use crate::ops::select::{select, Repositories, Selection};
use crate::ops::synthesize::{buildable_view, manifest_path, manifest_view};
use crate::reactor::Reactor;
use crate::resolver::{DependencyResolver, RemoteRepository};
use crate::util::fs;

/// Options for a generation run.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// BOMs to generate; empty means one implicit `<artifact>-bom`
    pub configs: Vec<BomConfig>,
    /// Template handed to the renderer
    pub template: TemplateRef,
    /// Local repository path for resolution
    pub local_repository: PathBuf,
    /// Remote repositories for resolution
    pub remote_repositories: Vec<RemoteRepository>,
}

/// Where one generated unit got to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitState {
    Idle,
    Selecting,
    Synthesizing,
    Injected { success: bool },
}

impl UnitState {
    /// Has the unit reached a final state?
    pub fn is_terminal(self) -> bool {
        matches!(self, UnitState::Injected { .. })
    }
}

impl fmt::Display for UnitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitState::Idle => f.write_str("idle"),
            UnitState::Selecting => f.write_str("selecting"),
            UnitState::Synthesizing => f.write_str("synthesizing"),
            UnitState::Injected { success: true } => f.write_str("injected"),
            UnitState::Injected { success: false } => f.write_str("injection failed"),
        }
    }
}

/// One BOM the run produced.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedBom {
    pub artifact_id: String,
    pub manifest_path: PathBuf,
    pub selection: Selection,
    pub state: UnitState,
    /// Filtered segments run against the unit
    pub segments: Vec<TaskSegment>,
}

/// Outcome of a generation run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GenerateReport {
    /// BOMs rendered in this run, in config order
    pub generated: Vec<GeneratedBom>,
    /// Ids skipped because they were already generated
    pub skipped: Vec<String>,
    /// Ids whose generation or injection failed
    pub failed: Vec<String>,
}

impl GenerateReport {
    /// Did generation run at all?
    pub fn is_empty(&self) -> bool {
        self.generated.is_empty() && self.skipped.is_empty() && self.failed.is_empty()
    }
}

struct Pending {
    spec: BomSpec,
    unit: BuildableView,
    report: usize,
}

/// Tracks the first failure while letting the remaining configs run.
#[derive(Default)]
struct Failures {
    first: Option<BomError>,
}

impl Failures {
    fn record(&mut self, report: &mut GenerateReport, artifact_id: &str, err: BomError) {
        tracing::error!("{}", err);
        report.failed.push(artifact_id.to_string());
        if self.first.is_none() {
            self.first = Some(err);
        }
    }
}

fn transition(artifact_id: &str, state: &mut UnitState, next: UnitState) {
    debug_assert!(!state.is_terminal(), "{} already injected", artifact_id);
    tracing::debug!("{}: {} -> {}", artifact_id, state, next);
    *state = next;
}

/// Generate every configured BOM for `origin` and build it in the run.
///
/// `origin` is the module the run was started from; a no-op unless it is the
/// execution root and aggregates modules.
pub fn generate_bom<R, D, M>(
    origin: &Project,
    reactor: &mut R,
    resolver: &mut D,
    renderer: &M,
    registry: &GeneratedRegistry,
    opts: &GenerateOptions,
) -> Result<GenerateReport, BomError>
where
    R: Reactor + ?Sized,
    D: DependencyResolver + ?Sized,
    M: ManifestRenderer + ?Sized,
{
    let mut report = GenerateReport::default();

    if !origin.is_execution_root() || !origin.has_modules() {
        tracing::debug!("{} is not an aggregating execution root, skipping", origin.id());
        return Ok(report);
    }

    let configs = if opts.configs.is_empty() {
        vec![BomConfig::default_for(origin)]
    } else {
        opts.configs.clone()
    };

    let repositories = Repositories {
        local: &opts.local_repository,
        remotes: &opts.remote_repositories,
    };
    let mut failures = Failures::default();
    let mut pending = Vec::with_capacity(configs.len());

    for config in &configs {
        let artifact_id = config.artifact_id.trim();
        let spec = match config.compile() {
            Ok(spec) => spec,
            Err(err) => {
                let err = BomError::from_config(Some(artifact_id), err);
                failures.record(&mut report, artifact_id, err);
                continue;
            }
        };

        if !registry.register(&spec.artifact_id) {
            tracing::debug!("bom {} already generated, skipping", spec.artifact_id);
            report.skipped.push(spec.artifact_id.clone());
            continue;
        }

        let mut state = UnitState::Idle;
        let synthesized = synthesize(
            origin,
            &spec,
            reactor.projects(),
            resolver,
            renderer,
            opts,
            &repositories,
            &mut state,
        );
        match synthesized {
            Ok((selection, unit)) => {
                report.generated.push(GeneratedBom {
                    artifact_id: spec.artifact_id.clone(),
                    manifest_path: unit.manifest_path().to_path_buf(),
                    selection,
                    state,
                    segments: Vec::new(),
                });
                pending.push(Pending {
                    spec,
                    unit,
                    report: report.generated.len() - 1,
                });
            }
            Err(err) => failures.record(&mut report, &spec.artifact_id, err),
        }
    }

    let units: Vec<BuildableView> = pending.iter().map(|p| p.unit.clone()).collect();
    let planned = planned_projects(origin, &units, reactor.projects());

    for Pending { spec, unit, report: slot } in pending {
        let result = inject(reactor, planned.clone(), &unit, &spec.goals);
        let generated = &mut report.generated[slot];

        match result {
            Ok(segments) => {
                let next = UnitState::Injected { success: true };
                transition(&spec.artifact_id, &mut generated.state, next);
                generated.segments = segments;
            }
            Err(err) => {
                let next = UnitState::Injected { success: false };
                transition(&spec.artifact_id, &mut generated.state, next);
                failures.record(&mut report, &spec.artifact_id, err);
            }
        }
    }

    match failures.first {
        Some(err) => Err(err),
        None => Ok(report),
    }
}

/// Select, render and wrap one BOM.
#[allow(clippy::too_many_arguments)]
fn synthesize<D, M>(
    origin: &Project,
    spec: &BomSpec,
    projects: &[Project],
    resolver: &mut D,
    renderer: &M,
    opts: &GenerateOptions,
    repositories: &Repositories<'_>,
    state: &mut UnitState,
) -> Result<(Selection, BuildableView), BomError>
where
    D: DependencyResolver + ?Sized,
    M: ManifestRenderer + ?Sized,
{
    let artifact_id = spec.artifact_id.as_str();

    transition(artifact_id, state, UnitState::Selecting);
    let selection = select(projects, spec, resolver, repositories)?;

    transition(artifact_id, state, UnitState::Synthesizing);
    let path = manifest_path(origin, artifact_id);
    if let Some(dir) = path.parent() {
        fs::ensure_dir(dir).map_err(|err| BomError::DirectoryCreation {
            artifact_id: artifact_id.to_string(),
            path: dir.to_path_buf(),
            source: err.into(),
        })?;
    }

    tracing::info!("Generating BOM: {}", artifact_id);
    let render_failed = |err: anyhow::Error| BomError::Render {
        artifact_id: artifact_id.to_string(),
        source: err.into(),
    };
    let manifest = manifest_view(origin, spec, &selection.libraries, &selection.plugins);
    let mut rendered = Vec::new();
    renderer
        .render(&manifest, &opts.template, &mut rendered)
        .map_err(render_failed)?;
    fs::write_atomic(&path, &rendered).map_err(render_failed)?;

    Ok((selection, buildable_view(origin, spec, &path)))
}
