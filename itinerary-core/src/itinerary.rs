//! Planner output and its diagnostics.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{Route, Task};

/// The result of one planning request.
///
/// `tasks` lists the visiting order, which generally differs from the order
/// the tasks were submitted in.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Itinerary {
    /// Concatenated route through every successfully routed leg.
    pub route: Route,
    /// Tasks in visiting order.
    pub tasks: Vec<Task>,
    /// What the planner skipped or tried along the way.
    #[serde(default)]
    pub diagnostics: Diagnostics,
}

/// Planner bookkeeping returned alongside the itinerary.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Diagnostics {
    /// Wall-clock time spent planning.
    pub solve_time: Duration,
    /// Filler combinations whose durations fitted a gap and were ordered.
    pub candidates_evaluated: u64,
    /// Ids of tasks whose arriving leg could not be routed.
    pub failed_legs: Vec<String>,
    /// Ids of tasks dropped because no location could be resolved.
    pub dropped_tasks: Vec<String>,
}

impl Itinerary {
    /// Ids of the tasks in visiting order.
    ///
    /// # Examples
    /// ```
    /// use itinerary_core::{Itinerary, Task};
    ///
    /// let itinerary = Itinerary {
    ///     tasks: vec![Task::new("a", "first"), Task::new("b", "second")],
    ///     ..Itinerary::default()
    /// };
    /// assert_eq!(itinerary.task_ids(), vec!["a", "b"]);
    /// ```
    #[must_use]
    pub fn task_ids(&self) -> Vec<&str> {
        self.tasks.iter().map(|task| task.id.as_str()).collect()
    }
}
