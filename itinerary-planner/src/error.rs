//! Errors surfaced by the planner.

use thiserror::Error;

/// Errors returned while planning an itinerary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum PlanError {
    /// There were no tasks to route.
    #[error("no tasks selected")]
    NoTasksSelected,
    /// A leg between two consecutive stops could not be routed.
    #[error("no route found from {from} to {to}")]
    RouteNotFound {
        /// Id of the task the leg starts at.
        from: String,
        /// Id of the task the leg arrives at.
        to: String,
    },
}
