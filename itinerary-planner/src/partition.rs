//! Split enriched tasks into fixed-time core tasks and flexible fillers.

use chrono::Timelike;
use itinerary_core::Task;

use crate::CoreOrdering;

/// Enriched tasks grouped by how the planner treats them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Partition {
    /// Located tasks with a start time, in visiting order.
    pub core: Vec<Task>,
    /// Located tasks without a start time, in input order.
    pub filler: Vec<Task>,
    /// Tasks without a location, in input order.
    pub dropped: Vec<Task>,
}

/// Partition tasks into core, filler and dropped groups.
///
/// Core tasks are sorted stably according to `ordering`.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use itinerary_core::Task;
/// use itinerary_core::test_support::location;
/// use itinerary_planner::{CoreOrdering, partition_tasks};
///
/// let at = |hour| {
///     NaiveDate::from_ymd_opt(2024, 9, 2)
///         .and_then(|day| day.and_hms_opt(hour, 0, 0))
///         .expect("valid timestamp")
/// };
/// let tasks = vec![
///     Task::new("late", "seminar").with_location(location("S", 0.0, 0.0)).with_start_time(at(14)),
///     Task::new("early", "lecture").with_location(location("L", 1.0, 0.0)).with_start_time(at(9)),
///     Task::new("flex", "coffee").with_location(location("C", 2.0, 0.0)),
///     Task::new("lost", "somewhere"),
/// ];
/// let partition = partition_tasks(tasks, CoreOrdering::HourOfDay);
/// let core: Vec<_> = partition.core.iter().map(|task| task.id.as_str()).collect();
/// assert_eq!(core, vec!["early", "late"]);
/// assert_eq!(partition.filler.len(), 1);
/// assert_eq!(partition.dropped.len(), 1);
/// ```
#[must_use]
pub fn partition_tasks(tasks: Vec<Task>, ordering: CoreOrdering) -> Partition {
    let mut partition = Partition::default();
    for task in tasks {
        if !task.is_located() {
            partition.dropped.push(task);
        } else if task.start_time.is_some() {
            partition.core.push(task);
        } else {
            partition.filler.push(task);
        }
    }
    match ordering {
        CoreOrdering::HourOfDay => partition
            .core
            .sort_by_key(|task| task.start_time.map(|start| start.hour())),
        CoreOrdering::FullTimestamp => partition.core.sort_by_key(|task| task.start_time),
    }
    partition
}
