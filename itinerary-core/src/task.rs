//! Tasks submitted for planning.

use chrono::NaiveDateTime;
use geo::Coord;
use serde::{Deserialize, Serialize};

use crate::Location;

/// Something the user wants to get done during the day.
///
/// Any of `location`, `start_time` and `duration` may be missing when the task
/// arrives from the caller. The planner fills the gaps it can and drops tasks
/// that still have no location afterwards.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use geo::Coord;
/// use itinerary_core::{Location, Task};
///
/// let start = NaiveDate::from_ymd_opt(2024, 9, 2)
///     .and_then(|day| day.and_hms_opt(9, 0, 0))
///     .expect("valid timestamp");
/// let lecture = Task::new("t1", "Algorithms lecture")
///     .with_location(Location::new("Hall A", Coord { x: 0.0, y: 0.0 }))
///     .with_start_time(start)
///     .with_duration(90);
///
/// assert!(lecture.is_core());
/// assert_eq!(lecture.duration_minutes(), 90);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Caller supplied identifier.
    pub id: String,
    /// Free-form description, also the input for inference.
    pub text: String,
    /// Where the task happens.
    #[serde(default)]
    pub location: Option<Location>,
    /// Fixed wall-clock start, if any.
    #[serde(default)]
    pub start_time: Option<NaiveDateTime>,
    /// Expected length in minutes.
    #[serde(default)]
    pub duration: Option<u32>,
    /// Label for the travel time of the leg arriving at this task.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub travel_time: Option<String>,
}

impl Task {
    /// Construct a task with only an id and text.
    #[must_use]
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            location: None,
            start_time: None,
            duration: None,
            travel_time: None,
        }
    }

    /// Set the task location.
    #[must_use]
    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    /// Pin the task to a start time.
    #[must_use]
    pub const fn with_start_time(mut self, start_time: NaiveDateTime) -> Self {
        self.start_time = Some(start_time);
        self
    }

    /// Set the expected duration in minutes.
    #[must_use]
    pub const fn with_duration(mut self, minutes: u32) -> Self {
        self.duration = Some(minutes);
        self
    }

    /// Whether the task has a resolved location.
    #[must_use]
    pub const fn is_located(&self) -> bool {
        self.location.is_some()
    }

    /// Whether the task is pinned in time and can be routed.
    #[must_use]
    pub const fn is_core(&self) -> bool {
        self.is_located() && self.start_time.is_some()
    }

    /// Duration in minutes, treating a missing value as zero.
    #[must_use]
    pub fn duration_minutes(&self) -> u32 {
        self.duration.unwrap_or(0)
    }

    /// Coordinates of the task location, if resolved.
    #[must_use]
    pub fn coordinates(&self) -> Option<Coord<f64>> {
        self.location.as_ref().map(|location| location.coordinates)
    }
}
