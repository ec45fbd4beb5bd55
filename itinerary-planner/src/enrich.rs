//! Fill in missing task durations and locations.

use futures_util::future::{join, join_all};
use geo::Coord;
use itinerary_core::{Location, Task, TaskInference};
use log::{debug, warn};

/// Return copies of `tasks` with missing durations and locations inferred.
///
/// Every inference call for every task is in flight at once. Fields the
/// caller already set are kept as they are. A duration that cannot be
/// inferred becomes zero minutes; a location that cannot be inferred stays
/// `None` and the task is later dropped. Inference failures are logged and
/// never abort the request. Output order matches input order.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use itinerary_core::Task;
/// use itinerary_core::test_support::{StubInference, location};
/// use itinerary_planner::enrich_tasks;
///
/// # tokio::runtime::Builder::new_current_thread().build().expect("runtime").block_on(async {
/// let inference = StubInference::new()
///     .with_duration("print poster", 15)
///     .with_location("print poster", location("Library", 1.0, 1.0));
/// let tasks = vec![Task::new("t1", "print poster")];
/// let enriched = enrich_tasks(&inference, Coord { x: 0.0, y: 0.0 }, tasks).await;
/// let task = enriched.first().expect("one task");
/// assert_eq!(task.duration, Some(15));
/// assert!(task.is_located());
/// # });
/// ```
pub async fn enrich_tasks<I>(inference: &I, bias: Coord<f64>, tasks: Vec<Task>) -> Vec<Task>
where
    I: TaskInference + ?Sized,
{
    join_all(
        tasks
            .into_iter()
            .map(|task| enrich_task(inference, bias, task)),
    )
    .await
}

async fn enrich_task<I>(inference: &I, bias: Coord<f64>, task: Task) -> Task
where
    I: TaskInference + ?Sized,
{
    let (duration, location) = join(
        resolve_duration(inference, &task),
        resolve_location(inference, bias, &task),
    )
    .await;
    Task {
        duration: Some(duration),
        location,
        ..task
    }
}

async fn resolve_duration<I>(inference: &I, task: &Task) -> u32
where
    I: TaskInference + ?Sized,
{
    if let Some(minutes) = task.duration {
        return minutes;
    }
    match inference.infer_duration(&task.text).await {
        Ok(Some(minutes)) => minutes,
        Ok(None) => {
            debug!("no duration inferred for task {}", task.id);
            0
        }
        Err(err) => {
            warn!("duration inference failed for task {}: {err}", task.id);
            0
        }
    }
}

async fn resolve_location<I>(inference: &I, bias: Coord<f64>, task: &Task) -> Option<Location>
where
    I: TaskInference + ?Sized,
{
    if let Some(location) = &task.location {
        return Some(location.clone());
    }
    match inference.infer_location(&task.text, bias).await {
        Ok(Some(location)) => Some(location),
        Ok(None) => {
            debug!("no location inferred for task {}", task.id);
            None
        }
        Err(err) => {
            warn!("location inference failed for task {}: {err}", task.id);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use async_trait::async_trait;
    use itinerary_core::InferenceError;
    use itinerary_core::test_support::{StubInference, location};
    use rstest::{fixture, rstest};

    use super::*;

    /// Counts calls and answers like the wrapped stub.
    #[derive(Debug, Default)]
    struct CountingInference {
        inner: StubInference,
        duration_calls: Cell<usize>,
        location_calls: Cell<usize>,
    }

    #[async_trait(?Send)]
    impl TaskInference for CountingInference {
        async fn infer_duration(&self, task_text: &str) -> Result<Option<u32>, InferenceError> {
            self.duration_calls.set(self.duration_calls.get() + 1);
            self.inner.infer_duration(task_text).await
        }

        async fn infer_location(
            &self,
            task_text: &str,
            bias: Coord<f64>,
        ) -> Result<Option<Location>, InferenceError> {
            self.location_calls.set(self.location_calls.get() + 1);
            self.inner.infer_location(task_text, bias).await
        }
    }

    #[fixture]
    fn origin() -> Coord<f64> {
        Coord { x: 0.0, y: 0.0 }
    }

    #[rstest]
    #[tokio::test]
    async fn keeps_fields_the_caller_set(origin: Coord<f64>) {
        let inference = CountingInference {
            inner: StubInference::new()
                .with_duration("lecture", 90)
                .with_location("lecture", location("Elsewhere", 9.0, 9.0)),
            ..CountingInference::default()
        };
        let task = Task::new("t1", "lecture")
            .with_duration(45)
            .with_location(location("Hall A", 1.0, 0.0));

        let enriched = enrich_tasks(&inference, origin, vec![task.clone()]).await;

        assert_eq!(enriched, vec![task]);
        assert_eq!(inference.duration_calls.get(), 0);
        assert_eq!(inference.location_calls.get(), 0);
    }

    #[rstest]
    #[tokio::test]
    async fn asks_once_per_missing_field(origin: Coord<f64>) {
        let inference = CountingInference {
            inner: StubInference::new().with_duration("coffee", 10),
            ..CountingInference::default()
        };
        let tasks = vec![
            Task::new("t1", "coffee"),
            Task::new("t2", "seminar").with_duration(60),
        ];

        let enriched = enrich_tasks(&inference, origin, tasks).await;

        assert_eq!(inference.duration_calls.get(), 1);
        assert_eq!(inference.location_calls.get(), 2);
        let durations: Vec<_> = enriched.iter().map(|task| task.duration).collect();
        assert_eq!(durations, vec![Some(10), Some(60)]);
    }

    #[rstest]
    #[tokio::test]
    async fn unavailable_inference_defaults_duration_and_leaves_location(origin: Coord<f64>) {
        let inference = StubInference::new().unavailable();
        let tasks = vec![Task::new("t1", "meet tutor")];

        let enriched = enrich_tasks(&inference, origin, tasks).await;

        let task = enriched.first().expect("task kept");
        assert_eq!(task.duration, Some(0));
        assert!(task.location.is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn failure_for_one_task_spares_its_siblings(origin: Coord<f64>) {
        let inference = StubInference::new()
            .failing_for("meet tutor")
            .with_duration("coffee", 10)
            .with_location("coffee", location("Cafe", 2.0, 0.0));
        let tasks = vec![Task::new("t1", "meet tutor"), Task::new("t2", "coffee")];

        let enriched = enrich_tasks(&inference, origin, tasks).await;

        let failed = enriched.first().expect("failing task kept");
        assert_eq!(failed.duration, Some(0));
        assert!(failed.location.is_none());
        let sibling = enriched.get(1).expect("sibling kept");
        assert_eq!(sibling.duration, Some(10));
        assert_eq!(
            sibling.location.as_ref().and_then(|place| place.name.as_deref()),
            Some("Cafe")
        );
    }

    #[rstest]
    #[tokio::test]
    async fn preserves_input_order(origin: Coord<f64>) {
        let inference = StubInference::new();
        let tasks: Vec<_> = ["a", "b", "c"]
            .into_iter()
            .map(|id| Task::new(id, id))
            .collect();

        let enriched = enrich_tasks(&inference, origin, tasks).await;

        let ids: Vec<_> = enriched.iter().map(|task| task.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }
}
