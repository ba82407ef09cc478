//! Lifecycle tasks and task segments.
//!
//! A run schedules its work as an ordered list of [`TaskSegment`]s. Each segment
//! holds lifecycle tasks, which are either a bare phase (`install`) or an
//! explicit plugin goal (`versions:set`).

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A single lifecycle task.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum Task {
    /// A lifecycle phase, e.g. `install`
    Phase(String),
    /// A plugin goal, e.g. `source:jar`
    Goal(String),
}

impl Task {
    /// Parse a CLI-style task: anything containing `:` is a goal.
    pub fn parse(s: &str) -> Self {
        if s.contains(':') {
            Task::Goal(s.to_string())
        } else {
            Task::Phase(s.to_string())
        }
    }

    /// The name goal filters are matched against.
    pub fn display_name(&self) -> &str {
        match self {
            Task::Phase(name) | Task::Goal(name) => name,
        }
    }

    /// Is this a lifecycle phase?
    pub fn is_phase(&self) -> bool {
        matches!(self, Task::Phase(_))
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// An ordered group of tasks scheduled against one or more units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSegment {
    /// Whether the segment runs once for the whole run rather than per unit
    pub aggregating: bool,
    /// Tasks in execution order
    pub tasks: Vec<Task>,
}

impl TaskSegment {
    /// Create a segment.
    pub fn new(aggregating: bool, tasks: Vec<Task>) -> Self {
        TaskSegment { aggregating, tasks }
    }

    /// Is the segment empty?
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Task names in order.
    pub fn task_names(&self) -> Vec<&str> {
        self.tasks.iter().map(Task::display_name).collect()
    }
}

/// Which tasks to replay against a generated unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GoalFilter {
    /// Task names to keep; when non-empty, only these pass
    pub includes: BTreeSet<String>,
    /// Task names to drop; consulted only when `includes` is empty
    pub excludes: BTreeSet<String>,
}

impl GoalFilter {
    /// Create a filter from include and exclude names.
    pub fn new<I, E, S>(includes: I, excludes: E) -> Self
    where
        I: IntoIterator<Item = S>,
        E: IntoIterator<Item = S>,
        S: Into<String>,
    {
        GoalFilter {
            includes: includes.into_iter().map(Into::into).collect(),
            excludes: excludes.into_iter().map(Into::into).collect(),
        }
    }

    /// Does the task pass the filter?
    pub fn allows(&self, task: &Task) -> bool {
        let name = task.display_name();
        if self.includes.is_empty() {
            !self.excludes.contains(name)
        } else {
            self.includes.contains(name)
        }
    }

    /// Copy of `segment` keeping only allowed tasks. The aggregating flag is preserved.
    pub fn filter_segment(&self, segment: &TaskSegment) -> TaskSegment {
        let tasks = segment
            .tasks
            .iter()
            .filter(|task| {
                let keep = self.allows(task);
                if !keep {
                    tracing::debug!("skipping task `{}` for generated unit", task);
                }
                keep
            })
            .cloned()
            .collect();

        TaskSegment::new(segment.aggregating, tasks)
    }

    /// All names mentioned by the filter.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.includes
            .iter()
            .chain(self.excludes.iter())
            .map(String::as_str)
    }
}
