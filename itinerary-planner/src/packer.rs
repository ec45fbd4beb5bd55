//! Pack flexible tasks into the idle time between fixed-time tasks.
//!
//! For each gap the packer enumerates subsets of the still unused fillers,
//! keeps those whose durations fit the idle budget, orders each one with
//! [`reorder_by_distance`] and ranks them by size and then estimated
//! distance. Candidates are routed in rank order and the first whose real
//! travel plus task time still fits is accepted.

use std::time::Duration;

use chrono::TimeDelta;
use itinerary_core::{RouteProvider, Task};
use log::debug;

use crate::config::FILLER_CANDIDATE_LIMIT;
use crate::{LegRouter, PlannedLeg, PlannerConfig, Reordered, reorder_by_distance};

/// Idle time between leaving `start` and having to set off for `end`.
///
/// Computed as `end.start_time - (start.start_time + start.duration) - leg`.
/// The result is negative when the schedule is already tight. Returns `None`
/// when either task lacks a start time.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use chrono::{NaiveDate, TimeDelta};
/// use itinerary_core::Task;
/// use itinerary_planner::maximum_free_time;
///
/// let at = |hour| {
///     NaiveDate::from_ymd_opt(2024, 9, 2)
///         .and_then(|day| day.and_hms_opt(hour, 0, 0))
///         .expect("valid timestamp")
/// };
/// let lecture = Task::new("a", "lecture").with_start_time(at(9)).with_duration(30);
/// let lab = Task::new("b", "lab").with_start_time(at(11));
/// let free = maximum_free_time(&lecture, &lab, Duration::from_secs(1_200));
/// assert_eq!(free, Some(TimeDelta::minutes(70)));
/// ```
#[must_use]
pub fn maximum_free_time(start: &Task, end: &Task, leg: Duration) -> Option<TimeDelta> {
    let departure = start.start_time?;
    let deadline = end.start_time?;
    let busy = TimeDelta::try_minutes(i64::from(start.duration_minutes())).unwrap_or(TimeDelta::MAX);
    let travel = TimeDelta::from_std(leg).unwrap_or(TimeDelta::MAX);
    let free = deadline
        .signed_duration_since(departure)
        .checked_sub(&busy)
        .and_then(|remaining| remaining.checked_sub(&travel))
        .unwrap_or(TimeDelta::MIN);
    Some(free)
}

/// Every non-empty subset of `0..count` as ascending index lists.
///
/// `count` is clamped to 20. Subsets larger than `max_size` are skipped.
/// Subsets are produced in bitmask order.
///
/// # Examples
/// ```
/// use itinerary_planner::filler_combinations;
///
/// let subsets = filler_combinations(3, None);
/// assert_eq!(subsets.len(), 7);
/// assert_eq!(subsets.last(), Some(&vec![0, 1, 2]));
/// assert_eq!(filler_combinations(3, Some(1)), vec![vec![0], vec![1], vec![2]]);
/// ```
#[must_use]
pub fn filler_combinations(count: usize, max_size: Option<usize>) -> Vec<Vec<usize>> {
    let members = count.min(FILLER_CANDIDATE_LIMIT);
    let size_cap = max_size.unwrap_or(members);
    (1_u32..(1_u32 << members))
        .filter(|mask| usize::try_from(mask.count_ones()).is_ok_and(|size| size <= size_cap))
        .map(|mask| {
            (0..members)
                .filter(|&bit| mask & (1_u32 << bit) != 0)
                .collect()
        })
        .collect()
}

/// Result of packing one gap.
#[derive(Debug, Clone, PartialEq)]
pub struct PackedGap {
    /// Legs replacing the gap's original leg, ending at the gap's end task.
    pub legs: Vec<PlannedLeg>,
    /// Pool indices of the fillers placed in this gap.
    pub consumed: Vec<usize>,
    /// Subsets whose durations fitted the budget and were ordered.
    pub candidates_evaluated: u64,
}

impl PackedGap {
    fn unchanged(leg: &PlannedLeg, candidates_evaluated: u64) -> Self {
        Self {
            legs: vec![leg.clone()],
            consumed: Vec::new(),
            candidates_evaluated,
        }
    }
}

struct Candidate {
    indices: Vec<usize>,
    minutes: u64,
    ordered: Reordered,
}

/// Fills gaps between fixed-time tasks with flexible ones.
#[derive(Debug)]
pub struct FillerPacker<'a, R: ?Sized> {
    router: LegRouter<'a, R>,
    max_candidates: usize,
    max_subset_size: Option<usize>,
}

impl<'a, R> FillerPacker<'a, R>
where
    R: RouteProvider + ?Sized,
{
    /// Construct a packer routing candidates through `router`.
    ///
    /// At most `max_candidates` fillers (clamped to 20) are considered per
    /// gap.
    #[must_use]
    pub fn new(
        router: LegRouter<'a, R>,
        max_candidates: usize,
        max_subset_size: Option<usize>,
    ) -> Self {
        Self {
            router,
            max_candidates: max_candidates.min(FILLER_CANDIDATE_LIMIT),
            max_subset_size,
        }
    }

    /// Construct a packer using the limits and travel mode in `config`.
    #[must_use]
    pub fn from_config(provider: &'a R, config: &PlannerConfig) -> Self {
        Self::new(
            LegRouter::new(provider, config.travel_mode),
            config.filler_candidate_cap(),
            config.max_subset_size,
        )
    }

    /// Try to replace `leg`, which runs from `origin` to `leg.task`, with a
    /// detour through some of the fillers in `pool`.
    ///
    /// Only the first `max_candidates` tasks of `pool` are considered. When
    /// no candidate fits, the returned legs hold just `leg` and nothing is
    /// consumed.
    pub async fn pack_gap(&self, origin: &Task, leg: &PlannedLeg, pool: &[Task]) -> PackedGap {
        let end = &leg.task;
        let (Some(budget), Some(from), Some(to)) = (
            maximum_free_time(origin, end, leg.route.duration),
            origin.coordinates(),
            end.coordinates(),
        ) else {
            return PackedGap::unchanged(leg, 0);
        };

        let considered = pool.len().min(self.max_candidates);
        let mut candidates: Vec<Candidate> = filler_combinations(considered, self.max_subset_size)
            .into_iter()
            .filter_map(|indices| {
                let tasks: Vec<Task> = indices
                    .iter()
                    .filter_map(|&index| pool.get(index))
                    .cloned()
                    .collect();
                let minutes = total_minutes(&tasks);
                fits(Duration::ZERO, minutes, budget).then(|| Candidate {
                    indices,
                    minutes,
                    ordered: reorder_by_distance(tasks, from, to),
                })
            })
            .collect();
        let evaluated = u64::try_from(candidates.len()).unwrap_or(u64::MAX);
        candidates.sort_by(|left, right| {
            right
                .ordered
                .tasks
                .len()
                .cmp(&left.ordered.tasks.len())
                .then(left.ordered.distance.total_cmp(&right.ordered.distance))
        });

        for candidate in candidates {
            let mut stops = candidate.ordered.tasks;
            stops.push(end.clone());
            let legs = match self.router.route_from(origin, &stops).await {
                Ok(legs) => legs,
                Err(err) => {
                    debug!("filler candidate before {} disqualified: {err}", end.id);
                    continue;
                }
            };
            let travel = legs
                .iter()
                .map(|planned| planned.route.duration)
                .fold(Duration::ZERO, Duration::saturating_add);
            if fits(travel, candidate.minutes, budget) {
                debug!(
                    "packed {} filler(s) before {} within a {} min budget",
                    candidate.indices.len(),
                    end.id,
                    budget.num_minutes()
                );
                return PackedGap {
                    legs,
                    consumed: candidate.indices,
                    candidates_evaluated: evaluated,
                };
            }
            debug!(
                "filler candidate before {} overruns its {} min budget",
                end.id,
                budget.num_minutes()
            );
        }
        PackedGap::unchanged(leg, evaluated)
    }
}

fn total_minutes(tasks: &[Task]) -> u64 {
    tasks
        .iter()
        .map(|task| u64::from(task.duration_minutes()))
        .sum()
}

/// Whether `travel` plus `minutes` of task time fits in `budget`.
fn fits(travel: Duration, minutes: u64, budget: TimeDelta) -> bool {
    let busy = i64::try_from(minutes)
        .ok()
        .and_then(TimeDelta::try_minutes)
        .unwrap_or(TimeDelta::MAX);
    let moving = TimeDelta::from_std(travel).unwrap_or(TimeDelta::MAX);
    busy.checked_add(&moving)
        .is_some_and(|needed| needed <= budget)
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};
    use itinerary_core::TravelMode;
    use itinerary_core::test_support::{StubRouteProvider, location};
    use rstest::{fixture, rstest};

    use super::*;

    const SECONDS_PER_UNIT: f64 = 600.0;

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 9, 2)
            .and_then(|day| day.and_hms_opt(hour, minute, 0))
            .expect("valid timestamp")
    }

    fn filler(id: &str, minutes: u32, x: f64, y: f64) -> Task {
        Task::new(id, id)
            .with_location(location(id, x, y))
            .with_duration(minutes)
    }

    #[fixture]
    fn lecture() -> Task {
        Task::new("a", "lecture")
            .with_location(location("X", 1.0, 0.0))
            .with_start_time(at(9, 0))
            .with_duration(30)
    }

    #[fixture]
    fn lab() -> Task {
        Task::new("b", "lab")
            .with_location(location("Y", 3.0, 0.0))
            .with_start_time(at(11, 0))
    }

    async fn direct_leg(provider: &StubRouteProvider, origin: &Task, end: &Task) -> PlannedLeg {
        LegRouter::new(provider, TravelMode::Walking)
            .route_from(origin, std::slice::from_ref(end))
            .await
            .expect("direct leg routes")
            .pop()
            .expect("one leg")
    }

    #[rstest]
    fn free_time_can_be_negative(lecture: Task, lab: Task) {
        let free = maximum_free_time(&lecture, &lab, Duration::from_secs(6_000));
        assert_eq!(free, Some(TimeDelta::minutes(-10)));
    }

    #[rstest]
    fn free_time_needs_both_start_times(lab: Task) {
        let loose = Task::new("x", "coffee");
        assert_eq!(maximum_free_time(&loose, &lab, Duration::ZERO), None);
    }

    #[rstest]
    #[case(0, 0)]
    #[case(1, 1)]
    #[case(4, 15)]
    fn enumerates_every_non_empty_subset(#[case] count: usize, #[case] expected: usize) {
        assert_eq!(filler_combinations(count, None).len(), expected);
    }

    #[rstest]
    fn member_count_is_clamped() {
        let singles = filler_combinations(25, Some(1));
        assert_eq!(singles.len(), FILLER_CANDIDATE_LIMIT);
    }

    #[rstest]
    fn subset_size_cap_applies() {
        let subsets = filler_combinations(4, Some(2));
        assert_eq!(subsets.len(), 10);
        assert!(subsets.iter().all(|subset| subset.len() <= 2));
    }

    #[rstest]
    #[tokio::test]
    async fn packs_filler_that_fits(lecture: Task, lab: Task) {
        let provider = StubRouteProvider::new(SECONDS_PER_UNIT);
        let leg = direct_leg(&provider, &lecture, &lab).await;
        let pool = vec![filler("c", 20, 2.0, 0.1)];
        let packer = FillerPacker::new(LegRouter::new(&provider, TravelMode::Walking), 12, None);

        let packed = packer.pack_gap(&lecture, &leg, &pool).await;

        let ids: Vec<_> = packed.legs.iter().map(|leg| leg.task.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "b"]);
        assert_eq!(packed.consumed, vec![0]);
        assert_eq!(packed.candidates_evaluated, 1);
    }

    #[rstest]
    #[tokio::test]
    async fn prefers_more_fillers_over_shorter_detours(lecture: Task, lab: Task) {
        let provider = StubRouteProvider::new(SECONDS_PER_UNIT);
        let leg = direct_leg(&provider, &lecture, &lab).await;
        let pool = vec![
            filler("c", 10, 2.0, 0.0),
            filler("d", 10, 2.5, 0.0),
            filler("e", 10, 2.0, 3.0),
        ];
        let packer = FillerPacker::new(LegRouter::new(&provider, TravelMode::Walking), 12, None);

        let packed = packer.pack_gap(&lecture, &leg, &pool).await;

        // The detour to "e" overruns the budget, so the pair on the direct
        // line wins.
        let ids: Vec<_> = packed.legs.iter().map(|leg| leg.task.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "d", "b"]);
        assert_eq!(packed.consumed, vec![0, 1]);
        assert_eq!(packed.candidates_evaluated, 7);
    }

    #[rstest]
    #[tokio::test]
    async fn keeps_direct_leg_when_budget_is_exceeded(lecture: Task, lab: Task) {
        let provider = StubRouteProvider::new(SECONDS_PER_UNIT);
        let leg = direct_leg(&provider, &lecture, &lab).await;
        let pool = vec![filler("c", 90, 2.0, 0.1)];
        let packer = FillerPacker::new(LegRouter::new(&provider, TravelMode::Walking), 12, None);

        let packed = packer.pack_gap(&lecture, &leg, &pool).await;

        assert_eq!(packed.legs, vec![leg]);
        assert!(packed.consumed.is_empty());
        assert_eq!(packed.candidates_evaluated, 0);
    }

    #[rstest]
    #[tokio::test]
    async fn unroutable_candidate_is_skipped(lecture: Task, lab: Task) {
        let provider = StubRouteProvider::new(SECONDS_PER_UNIT).failing_towards("c");
        let leg = direct_leg(&provider, &lecture, &lab).await;
        let pool = vec![filler("c", 5, 2.0, 0.0), filler("d", 5, 2.5, 0.0)];
        let packer = FillerPacker::new(LegRouter::new(&provider, TravelMode::Walking), 12, None);

        let packed = packer.pack_gap(&lecture, &leg, &pool).await;

        let ids: Vec<_> = packed.legs.iter().map(|leg| leg.task.id.as_str()).collect();
        assert_eq!(ids, vec!["d", "b"]);
        assert_eq!(packed.consumed, vec![1]);
    }

    #[rstest]
    #[tokio::test]
    async fn candidate_cap_limits_the_pool(lecture: Task, lab: Task) {
        let provider = StubRouteProvider::new(SECONDS_PER_UNIT);
        let leg = direct_leg(&provider, &lecture, &lab).await;
        let pool = vec![filler("c", 90, 2.0, 0.0), filler("d", 5, 2.5, 0.0)];
        let packer = FillerPacker::new(LegRouter::new(&provider, TravelMode::Walking), 1, None);

        let packed = packer.pack_gap(&lecture, &leg, &pool).await;

        assert!(packed.consumed.is_empty());
    }
}
