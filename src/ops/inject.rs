//! Splicing generated units into the running build.

use std::collections::HashSet;

use crate::core::{BuildableView, GoalFilter, Project, TaskSegment};
use crate::ops::errors::BomError;
use crate::reactor::{ExecutionRequest, ProjectIndex, Reactor};

/// The run's module list once `generated` units are added.
///
/// The origin comes first, then the generated units, then every other module
/// already in the run.
pub fn planned_projects(
    origin: &Project,
    generated: &[BuildableView],
    current: &[Project],
) -> Vec<Project> {
    let mut placed: HashSet<String> = HashSet::with_capacity(current.len() + generated.len() + 1);
    let mut projects = Vec::with_capacity(current.len() + generated.len() + 1);

    placed.insert(origin.id());
    projects.push(origin.clone());

    for unit in generated {
        if placed.insert(unit.id()) {
            projects.push(unit.project().clone());
        }
    }
    for project in current {
        if placed.insert(project.id()) {
            projects.push(project.clone());
        }
    }
    projects
}

/// Install `projects` as the run's module list and replay the scheduled task
/// segments, filtered by `goals`, against `unit` only.
///
/// Returns the filtered segments that were executed. The first failure aborts
/// the unit's remaining segments.
pub fn inject<R>(
    reactor: &mut R,
    projects: Vec<Project>,
    unit: &BuildableView,
    goals: &GoalFilter,
) -> Result<Vec<TaskSegment>, BomError>
where
    R: Reactor + ?Sized,
{
    let artifact_id = unit.artifact_id();
    let fail = |err: anyhow::Error| BomError::Injection {
        artifact_id: artifact_id.to_string(),
        source: err.into(),
    };

    let index = ProjectIndex::build(&projects);
    reactor.set_projects(projects).map_err(fail)?;

    let segments = reactor.task_segments().map_err(fail)?;
    let mut executed = Vec::with_capacity(segments.len());

    for segment in &segments {
        let filtered = goals.filter_segment(segment);
        tracing::debug!(
            "building {} with [{}]",
            unit.id(),
            filtered.task_names().join(", ")
        );

        reactor
            .execute(&ExecutionRequest {
                unit: unit.project(),
                segment: &filtered,
                index: &index,
            })
            .map_err(fail)?;
        executed.push(filtered);
    }

    Ok(executed)
}
