//! Route consecutive stops with a [`RouteProvider`].

use std::iter;
use std::time::Duration;

use futures_util::future::join_all;
use itinerary_core::{Location, Route, RouteProvider, Task, TravelMode};
use log::{debug, warn};

use crate::PlanError;

/// Id of the synthetic stop standing for the user's current location.
pub const START_TASK_ID: &str = "current-location";

/// A routed leg together with the task it arrives at.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedLeg {
    /// Copy of the destination task with its travel time label set.
    pub task: Task,
    /// The leg, with every segment tagged with the destination id.
    pub route: Route,
}

impl PlannedLeg {
    fn arriving_at(destination: &Task, mut route: Route) -> Self {
        for segment in &mut route.segments {
            segment.task_id = Some(destination.id.clone());
        }
        let task = Task {
            travel_time: Some(format_travel_time(route.duration)),
            ..destination.clone()
        };
        Self { task, route }
    }
}

/// Human readable travel time: whole minutes below an hour, hours otherwise.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use itinerary_planner::format_travel_time;
///
/// assert_eq!(format_travel_time(Duration::from_secs(750)), "13 min");
/// assert_eq!(format_travel_time(Duration::from_secs(5_400)), "1.50 h");
/// ```
#[expect(
    clippy::float_arithmetic,
    reason = "labels round fractional minutes and hours"
)]
#[must_use]
pub fn format_travel_time(duration: Duration) -> String {
    let seconds = duration.as_secs_f64();
    if duration < Duration::from_secs(3_600) {
        format!("{:.0} min", (seconds / 60.0).round())
    } else {
        format!("{:.2} h", seconds / 3_600.0)
    }
}

/// Issues one routing request per consecutive pair of stops.
#[derive(Debug)]
pub struct LegRouter<'a, R: ?Sized> {
    provider: &'a R,
    mode: TravelMode,
}

impl<'a, R> LegRouter<'a, R>
where
    R: RouteProvider + ?Sized,
{
    /// Construct a router requesting legs by `mode`.
    #[must_use]
    pub const fn new(provider: &'a R, mode: TravelMode) -> Self {
        Self { provider, mode }
    }

    /// Route `start` followed by `tasks`, keeping each leg's outcome.
    ///
    /// Legs are requested concurrently and returned in stop order, one per
    /// task. A leg the provider could not route yields
    /// [`PlanError::RouteNotFound`] in its slot.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::NoTasksSelected`] when `tasks` is empty.
    pub async fn fetch_legs(
        &self,
        start: &Location,
        tasks: &[Task],
    ) -> Result<Vec<Result<PlannedLeg, PlanError>>, PlanError> {
        self.fetch_legs_from(&start_task(start), tasks).await
    }

    /// Route `start` followed by `tasks`, failing if any leg fails.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::NoTasksSelected`] when `tasks` is empty and the
    /// first [`PlanError::RouteNotFound`] in stop order otherwise.
    ///
    /// # Examples
    /// ```
    /// use itinerary_core::{Task, TravelMode};
    /// use itinerary_core::test_support::{StubRouteProvider, location};
    /// use itinerary_planner::{LegRouter, PlanError};
    ///
    /// # tokio::runtime::Builder::new_current_thread().build().expect("runtime").block_on(async {
    /// let provider = StubRouteProvider::new(60.0);
    /// let router = LegRouter::new(&provider, TravelMode::Walking);
    /// let start = location("Gate", 0.0, 0.0);
    /// let empty = router.route_through(&start, &[]).await;
    /// assert_eq!(empty, Err(PlanError::NoTasksSelected));
    ///
    /// let tasks = vec![Task::new("t1", "coffee").with_location(location("Cafe", 3.0, 4.0))];
    /// let legs = router.route_through(&start, &tasks).await.expect("stub routes");
    /// assert_eq!(legs.len(), 1);
    /// # });
    /// ```
    pub async fn route_through(
        &self,
        start: &Location,
        tasks: &[Task],
    ) -> Result<Vec<PlannedLeg>, PlanError> {
        self.route_from(&start_task(start), tasks).await
    }

    pub(crate) async fn fetch_legs_from(
        &self,
        origin: &Task,
        tasks: &[Task],
    ) -> Result<Vec<Result<PlannedLeg, PlanError>>, PlanError> {
        if tasks.is_empty() {
            return Err(PlanError::NoTasksSelected);
        }
        let departures = iter::once(origin).chain(tasks);
        let requests = departures
            .zip(tasks)
            .map(|(from, to)| self.fetch_leg(from, to));
        Ok(join_all(requests).await)
    }

    pub(crate) async fn route_from(
        &self,
        origin: &Task,
        tasks: &[Task],
    ) -> Result<Vec<PlannedLeg>, PlanError> {
        self.fetch_legs_from(origin, tasks)
            .await?
            .into_iter()
            .collect()
    }

    async fn fetch_leg(&self, from: &Task, to: &Task) -> Result<PlannedLeg, PlanError> {
        let not_found = || PlanError::RouteNotFound {
            from: from.id.clone(),
            to: to.id.clone(),
        };
        let (Some(start), Some(end)) = (&from.location, &to.location) else {
            debug!("skipping leg {} -> {}: unresolved location", from.id, to.id);
            return Err(not_found());
        };
        match self.provider.get_route(start, end, self.mode).await {
            Ok(Some(route)) => Ok(PlannedLeg::arriving_at(to, route)),
            Ok(None) => {
                debug!("no route from {} to {}", start.label(), end.label());
                Err(not_found())
            }
            Err(err) => {
                warn!(
                    "route request from {} to {} failed: {err}",
                    start.label(),
                    end.label()
                );
                Err(not_found())
            }
        }
    }
}

/// Synthetic task standing for the user's position at departure.
pub(crate) fn start_task(start: &Location) -> Task {
    Task::new(START_TASK_ID, "Current location")
        .with_location(start.clone())
        .with_duration(0)
}
