//! Planner tuning knobs.

use itinerary_core::TravelMode;

/// Upper bound on [`PlannerConfig::max_filler_candidates`].
///
/// Subset enumeration is exponential in this value.
pub(crate) const FILLER_CANDIDATE_LIMIT: usize = 20;

/// How core tasks are ordered before routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoreOrdering {
    /// Stable sort on the hour of the start time only.
    ///
    /// Tasks starting within the same hour keep their input order, as do tasks
    /// on different days that share an hour.
    #[default]
    HourOfDay,
    /// Stable sort on the complete start timestamp.
    FullTimestamp,
}

/// Configuration for [`ItineraryPlanner`](crate::ItineraryPlanner).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannerConfig {
    /// Mode requested for every leg.
    pub travel_mode: TravelMode,
    /// Sort applied to core tasks.
    pub core_ordering: CoreOrdering,
    /// How many unconsumed fillers, in order, are considered for each gap.
    ///
    /// Values above 20 are clamped.
    pub max_filler_candidates: usize,
    /// Largest filler subset tried for a single gap. `None` means unbounded.
    pub max_subset_size: Option<usize>,
    /// Reorder trailing fillers by distance from the last visited stop.
    pub reorder_trailing_fillers: bool,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            travel_mode: TravelMode::Walking,
            core_ordering: CoreOrdering::HourOfDay,
            max_filler_candidates: 12,
            max_subset_size: None,
            reorder_trailing_fillers: false,
        }
    }
}

impl PlannerConfig {
    /// Filler candidate cap after clamping.
    ///
    /// # Examples
    /// ```
    /// use itinerary_planner::PlannerConfig;
    ///
    /// let config = PlannerConfig {
    ///     max_filler_candidates: 64,
    ///     ..PlannerConfig::default()
    /// };
    /// assert_eq!(config.filler_candidate_cap(), 20);
    /// ```
    #[must_use]
    pub fn filler_candidate_cap(&self) -> usize {
        self.max_filler_candidates.min(FILLER_CANDIDATE_LIMIT)
    }
}
