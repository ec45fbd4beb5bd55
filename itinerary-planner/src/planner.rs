//! `ItineraryPlanner` runs the full planning pipeline.

use std::time::Instant;

use chrono::{Local, NaiveDateTime};
use itinerary_core::{
    Diagnostics, Itinerary, Location, Route, RouteProvider, Task, TaskInference,
};
use log::{debug, warn};

use crate::legs::start_task;
use crate::{
    FillerPacker, LegRouter, PlanError, PlannedLeg, PlannerConfig, Partition, assemble_route,
    enrich_tasks, partition_tasks, reorder_by_distance,
};

/// Plans a day of tasks around their fixed start times.
///
/// The planner owns its collaborators: a [`RouteProvider`] for legs and a
/// [`TaskInference`] for filling in missing durations and locations. Each
/// call plans one request from scratch; nothing is cached between calls.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use itinerary_core::Task;
/// use itinerary_core::test_support::{StubInference, StubRouteProvider, location};
/// use itinerary_planner::ItineraryPlanner;
///
/// # tokio::runtime::Builder::new_current_thread().build().expect("runtime").block_on(async {
/// let at = |hour| {
///     NaiveDate::from_ymd_opt(2024, 9, 2)
///         .and_then(|day| day.and_hms_opt(hour, 0, 0))
///         .expect("valid timestamp")
/// };
/// let planner = ItineraryPlanner::new(StubRouteProvider::new(600.0), StubInference::new());
/// let tasks = vec![
///     Task::new("b", "lab").with_location(location("Y", 3.0, 0.0)).with_start_time(at(11)),
///     Task::new("a", "lecture")
///         .with_location(location("X", 1.0, 0.0))
///         .with_start_time(at(9))
///         .with_duration(30),
/// ];
/// let itinerary = planner
///     .generate_task_route_at(&location("Gate", 0.0, 0.0), at(8), tasks)
///     .await
///     .expect("tasks to plan");
/// assert_eq!(itinerary.task_ids(), vec!["a", "b"]);
/// assert_eq!(itinerary.route.segments.len(), 2);
/// # });
/// ```
#[derive(Debug)]
pub struct ItineraryPlanner<R, I> {
    provider: R,
    inference: I,
    config: PlannerConfig,
}

impl<R, I> ItineraryPlanner<R, I>
where
    R: RouteProvider,
    I: TaskInference,
{
    /// Construct a planner using default configuration.
    pub fn new(provider: R, inference: I) -> Self {
        Self::with_config(provider, inference, PlannerConfig::default())
    }

    /// Construct a planner with explicit configuration.
    pub const fn with_config(provider: R, inference: I, config: PlannerConfig) -> Self {
        Self {
            provider,
            inference,
            config,
        }
    }

    /// Configuration in use.
    #[must_use]
    pub const fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Plan `tasks` starting from `start` now.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::NoTasksSelected`] when `tasks` is empty.
    pub async fn generate_task_route(
        &self,
        start: &Location,
        tasks: Vec<Task>,
    ) -> Result<Itinerary, PlanError> {
        self.generate_task_route_at(start, Local::now().naive_local(), tasks)
            .await
    }

    /// Plan `tasks` starting from `start` at `departure`.
    ///
    /// Missing details are inferred first. Tasks that still have no location
    /// are left out and listed in the diagnostics. Fixed-time tasks are
    /// visited in start-time order with flexible tasks packed into the idle
    /// time between them; flexible tasks that fit nowhere follow the last
    /// fixed-time task. A leg the provider cannot route is left out of the
    /// route while its task stays in the itinerary.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::NoTasksSelected`] when `tasks` is empty.
    pub async fn generate_task_route_at(
        &self,
        start: &Location,
        departure: NaiveDateTime,
        tasks: Vec<Task>,
    ) -> Result<Itinerary, PlanError> {
        if tasks.is_empty() {
            return Err(PlanError::NoTasksSelected);
        }
        let started_at = Instant::now();

        let enriched = enrich_tasks(&self.inference, start.coordinates, tasks).await;
        let Partition {
            core,
            filler,
            dropped,
        } = partition_tasks(enriched, self.config.core_ordering);
        let mut plan = PlanBuilder::default();
        for task in dropped {
            debug!("dropping task {}: no location", task.id);
            plan.diagnostics.dropped_tasks.push(task.id);
        }

        let router = LegRouter::new(&self.provider, self.config.travel_mode);
        let mut previous = start_task(start).with_start_time(departure);
        let mut pool = filler;

        if !core.is_empty() {
            let outcomes = router.fetch_legs_from(&previous, &core).await?;
            let packer = FillerPacker::from_config(&self.provider, &self.config);
            for (task, outcome) in core.into_iter().zip(outcomes) {
                match outcome {
                    Ok(leg) => {
                        let packed = packer.pack_gap(&previous, &leg, &pool).await;
                        plan.diagnostics.candidates_evaluated = plan
                            .diagnostics
                            .candidates_evaluated
                            .saturating_add(packed.candidates_evaluated);
                        take_consumed(&mut pool, packed.consumed);
                        plan.visit_all(packed.legs);
                    }
                    Err(err) => plan.skip(task.clone(), &err),
                }
                previous = task;
            }
        }

        if !pool.is_empty() {
            let trailing = match (self.config.reorder_trailing_fillers, previous.coordinates()) {
                (true, Some(here)) => reorder_by_distance(pool, here, here).tasks,
                _ => pool,
            };
            let outcomes = router.fetch_legs_from(&previous, &trailing).await?;
            for (task, outcome) in trailing.into_iter().zip(outcomes) {
                match outcome {
                    Ok(leg) => plan.visit(leg),
                    Err(err) => plan.skip(task, &err),
                }
            }
        }

        let itinerary = plan.finish(started_at);
        debug!(
            "planned {} task(s) over {} segment(s) in {:?}",
            itinerary.tasks.len(),
            itinerary.route.segments.len(),
            itinerary.diagnostics.solve_time
        );
        Ok(itinerary)
    }
}

/// Accumulates visited tasks and their legs in visiting order.
#[derive(Debug, Default)]
struct PlanBuilder {
    tasks: Vec<Task>,
    legs: Vec<Route>,
    diagnostics: Diagnostics,
}

impl PlanBuilder {
    fn visit(&mut self, leg: PlannedLeg) {
        self.tasks.push(leg.task);
        self.legs.push(leg.route);
    }

    fn visit_all(&mut self, legs: Vec<PlannedLeg>) {
        for leg in legs {
            self.visit(leg);
        }
    }

    fn skip(&mut self, task: Task, err: &PlanError) {
        warn!("leaving leg to task {} out of the route: {err}", task.id);
        self.diagnostics.failed_legs.push(task.id.clone());
        self.tasks.push(task);
    }

    fn finish(self, started_at: Instant) -> Itinerary {
        Itinerary {
            route: assemble_route(self.legs),
            tasks: self.tasks,
            diagnostics: Diagnostics {
                solve_time: started_at.elapsed(),
                ..self.diagnostics
            },
        }
    }
}

/// Remove the fillers at `consumed` from `pool`, keeping the rest in order.
fn take_consumed(pool: &mut Vec<Task>, mut consumed: Vec<usize>) {
    consumed.sort_unstable_by(|left, right| right.cmp(left));
    consumed.dedup();
    for index in consumed {
        if index < pool.len() {
            pool.remove(index);
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use itinerary_core::test_support::{StubInference, StubRouteProvider, location};
    use rstest::{fixture, rstest};

    use super::*;

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 9, 2)
            .and_then(|day| day.and_hms_opt(hour, minute, 0))
            .expect("valid timestamp")
    }

    fn planner(provider: StubRouteProvider) -> ItineraryPlanner<StubRouteProvider, StubInference> {
        ItineraryPlanner::new(provider, StubInference::new())
    }

    #[fixture]
    fn gate() -> Location {
        location("Gate", 0.0, 0.0)
    }

    #[rstest]
    #[tokio::test]
    async fn empty_request_is_rejected(gate: Location) {
        let outcome = planner(StubRouteProvider::new(600.0))
            .generate_task_route(&gate, Vec::new())
            .await;
        assert_eq!(outcome, Err(PlanError::NoTasksSelected));
    }

    #[rstest]
    #[tokio::test]
    async fn fully_dropped_request_yields_empty_itinerary(gate: Location) {
        let itinerary = planner(StubRouteProvider::new(600.0))
            .generate_task_route_at(&gate, at(8, 0), vec![Task::new("x", "somewhere")])
            .await
            .expect("dropping is not an error");
        assert!(itinerary.tasks.is_empty());
        assert_eq!(itinerary.route, Route::empty());
        assert_eq!(itinerary.diagnostics.dropped_tasks, vec!["x".to_owned()]);
    }

    #[rstest]
    #[tokio::test]
    async fn fillers_alone_follow_input_order(gate: Location) {
        let tasks = vec![
            Task::new("far", "far").with_location(location("Far", 5.0, 0.0)),
            Task::new("near", "near").with_location(location("Near", 1.0, 0.0)),
        ];
        let itinerary = planner(StubRouteProvider::new(600.0))
            .generate_task_route_at(&gate, at(8, 0), tasks)
            .await
            .expect("fillers plan");
        assert_eq!(itinerary.task_ids(), vec!["far", "near"]);
        assert_eq!(itinerary.route.duration.as_secs(), 5_400);
    }

    #[rstest]
    #[tokio::test]
    async fn trailing_fillers_can_be_reordered(gate: Location) {
        let tasks = vec![
            Task::new("far", "far").with_location(location("Far", 5.0, 0.0)),
            Task::new("near", "near").with_location(location("Near", 1.0, 0.0)),
        ];
        let config = PlannerConfig {
            reorder_trailing_fillers: true,
            ..PlannerConfig::default()
        };
        let itinerary =
            ItineraryPlanner::with_config(StubRouteProvider::new(600.0), StubInference::new(), config)
                .generate_task_route_at(&gate, at(8, 0), tasks)
                .await
                .expect("fillers plan");
        assert_eq!(itinerary.task_ids(), vec!["near", "far"]);
    }

    #[rstest]
    #[tokio::test]
    async fn late_departure_leaves_no_room_for_fillers(gate: Location) {
        let tasks = vec![
            Task::new("a", "lecture")
                .with_location(location("X", 1.0, 0.0))
                .with_start_time(at(9, 0)),
            Task::new("c", "coffee")
                .with_location(location("Z", 0.5, 0.0))
                .with_duration(5),
        ];
        let itinerary = planner(StubRouteProvider::new(600.0))
            .generate_task_route_at(&gate, at(8, 55), tasks)
            .await
            .expect("plan");
        assert_eq!(itinerary.task_ids(), vec!["a", "c"]);
    }

    #[rstest]
    #[tokio::test]
    async fn tunnel_on_any_leg_marks_the_route(gate: Location) {
        let tasks = vec![Task::new("a", "lecture").with_location(location("X", 1.0, 0.0))];
        let itinerary = planner(StubRouteProvider::new(600.0).tunnel_towards("X"))
            .generate_task_route_at(&gate, at(8, 0), tasks)
            .await
            .expect("plan");
        assert!(itinerary.route.tunnel);
    }

    #[rstest]
    fn consumed_fillers_are_removed_in_order() {
        let mut pool: Vec<_> = ["a", "b", "c", "d"]
            .into_iter()
            .map(|id| Task::new(id, id))
            .collect();
        take_consumed(&mut pool, vec![0, 2]);
        let ids: Vec<_> = pool.iter().map(|task| task.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "d"]);
    }
}
