//! Inference seam for filling in missing task details.
//!
//! The planner asks a [`TaskInference`] implementation to estimate how long a
//! task takes and where it happens when the user left those fields blank.
//! Implementations typically wrap a language model or a geocoder; the planner
//! treats every failure as "unknown" and carries on.

use async_trait::async_trait;
use geo::Coord;
use thiserror::Error;

use crate::Location;

/// Errors reported by a [`TaskInference`] implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum InferenceError {
    /// The backing service could not answer.
    #[error("inference service unavailable: {message}")]
    Unavailable {
        /// Description of the failure.
        message: String,
    },
}

/// Estimate missing task attributes from the task text.
///
/// `Ok(None)` means the service answered but could not infer a value.
#[async_trait(?Send)]
pub trait TaskInference {
    /// Estimate the task duration in minutes.
    async fn infer_duration(&self, task_text: &str) -> Result<Option<u32>, InferenceError>;

    /// Resolve the place a task refers to, preferring matches near `bias`.
    async fn infer_location(
        &self,
        task_text: &str,
        bias: Coord<f64>,
    ) -> Result<Option<Location>, InferenceError>;
}
