//! Nearest-neighbour ordering with adjacent-swap refinement.
//!
//! Distances are planar on raw coordinates. The orderer only ranks filler
//! candidates before real legs are requested, so the approximation is cheap
//! and good enough over campus-sized areas.
//!
//! Besides the greedy order, the input order is also refined and the shorter
//! of the two wins, so the result is never longer than the input order.

use geo::Coord;
use itinerary_core::Task;

/// Tasks in visiting order and the path length through them.
#[derive(Debug, Clone, PartialEq)]
pub struct Reordered {
    /// Length of `start -> tasks -> end` in coordinate units.
    pub distance: f64,
    /// Tasks in visiting order.
    pub tasks: Vec<Task>,
}

/// Planar distance between two coordinates.
#[expect(
    clippy::float_arithmetic,
    reason = "euclidean distance needs coordinate differences"
)]
#[must_use]
pub fn euclidean(from: Coord<f64>, to: Coord<f64>) -> f64 {
    (to.x - from.x).hypot(to.y - from.y)
}

/// Length of the path `start -> tasks -> end`.
///
/// A task without a location is treated as sitting where the path currently
/// is and adds nothing.
#[expect(clippy::float_arithmetic, reason = "path length sums leg distances")]
#[must_use]
pub fn path_distance(start: Coord<f64>, tasks: &[Task], end: Coord<f64>) -> f64 {
    let mut current = start;
    let mut total = 0.0;
    for task in tasks {
        let next = task.coordinates().unwrap_or(current);
        total += euclidean(current, next);
        current = next;
    }
    total + euclidean(current, end)
}

/// Order `tasks` to keep the path from `start` to `end` short.
///
/// Builds a greedy nearest-neighbour tour from `start`, breaking ties towards
/// the earlier task, then swaps adjacent tasks while a swap strictly shortens
/// the path. The input order is refined the same way and kept when it ends up
/// strictly shorter, so the result is never longer than the input order.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use itinerary_core::Task;
/// use itinerary_core::test_support::location;
/// use itinerary_planner::reorder_by_distance;
///
/// let tasks = vec![
///     Task::new("far", "far").with_location(location("Far", 3.0, 0.0)),
///     Task::new("near", "near").with_location(location("Near", 1.0, 0.0)),
/// ];
/// let ordered = reorder_by_distance(tasks, Coord { x: 0.0, y: 0.0 }, Coord { x: 4.0, y: 0.0 });
/// let ids: Vec<_> = ordered.tasks.iter().map(|task| task.id.as_str()).collect();
/// assert_eq!(ids, vec!["near", "far"]);
/// assert!((ordered.distance - 4.0).abs() < 1e-9);
/// ```
#[must_use]
pub fn reorder_by_distance(tasks: Vec<Task>, start: Coord<f64>, end: Coord<f64>) -> Reordered {
    if tasks.len() < 2 {
        let distance = path_distance(start, &tasks, end);
        return Reordered { distance, tasks };
    }
    let refined_input = refine(tasks.clone(), start, end);
    let refined_greedy = refine(nearest_neighbour(tasks, start), start, end);
    if refined_greedy.distance <= refined_input.distance {
        refined_greedy
    } else {
        refined_input
    }
}

fn nearest_neighbour(mut remaining: Vec<Task>, start: Coord<f64>) -> Vec<Task> {
    let mut ordered = Vec::with_capacity(remaining.len());
    let mut current = start;
    while let Some(index) = closest_index(&remaining, current) {
        let task = remaining.remove(index);
        current = task.coordinates().unwrap_or(current);
        ordered.push(task);
    }
    ordered
}

fn closest_index(tasks: &[Task], from: Coord<f64>) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (index, task) in tasks.iter().enumerate() {
        let distance = euclidean(from, task.coordinates().unwrap_or(from));
        if best.is_none_or(|(_, best_distance)| distance < best_distance) {
            best = Some((index, distance));
        }
    }
    best.map(|(index, _)| index)
}

fn refine(mut tasks: Vec<Task>, start: Coord<f64>, end: Coord<f64>) -> Reordered {
    let mut distance = path_distance(start, &tasks, end);
    let mut improved = true;
    while improved {
        improved = false;
        for index in 1..tasks.len() {
            tasks.swap(index - 1, index);
            let candidate = path_distance(start, &tasks, end);
            if candidate < distance {
                distance = candidate;
                improved = true;
            } else {
                tasks.swap(index - 1, index);
            }
        }
    }
    Reordered { distance, tasks }
}

#[cfg(test)]
mod tests {
    use itinerary_core::test_support::location;
    use rstest::rstest;

    use super::*;

    fn at(id: &str, x: f64, y: f64) -> Task {
        Task::new(id, id).with_location(location(id, x, y))
    }

    fn ids(ordered: &Reordered) -> Vec<&str> {
        ordered.tasks.iter().map(|task| task.id.as_str()).collect()
    }

    const ORIGIN: Coord<f64> = Coord { x: 0.0, y: 0.0 };

    #[rstest]
    fn empty_input_measures_direct_path() {
        let ordered = reorder_by_distance(Vec::new(), ORIGIN, Coord { x: 3.0, y: 4.0 });
        assert!(ordered.tasks.is_empty());
        assert!((ordered.distance - 5.0).abs() < 1e-9);
    }

    #[rstest]
    fn single_task_is_returned_as_is() {
        let ordered = reorder_by_distance(vec![at("a", 0.0, 3.0)], ORIGIN, ORIGIN);
        assert_eq!(ids(&ordered), vec!["a"]);
        assert!((ordered.distance - 6.0).abs() < 1e-9);
    }

    #[rstest]
    fn collinear_tasks_are_visited_in_line() {
        let tasks = vec![at("c", 3.0, 0.0), at("a", 1.0, 0.0), at("b", 2.0, 0.0)];
        let ordered = reorder_by_distance(tasks, ORIGIN, Coord { x: 4.0, y: 0.0 });
        assert_eq!(ids(&ordered), vec!["a", "b", "c"]);
        assert!((ordered.distance - 4.0).abs() < 1e-9);
    }

    #[rstest]
    fn equidistant_tasks_keep_input_order() {
        let tasks = vec![at("north", 0.0, 1.0), at("south", 0.0, -1.0)];
        let ordered = reorder_by_distance(tasks, ORIGIN, ORIGIN);
        assert_eq!(ids(&ordered), vec!["north", "south"]);
    }

    #[rstest]
    fn refinement_fixes_greedy_detour() {
        // Greedy goes to "near" first and then has to double back past the
        // start; visiting "near" last is shorter because the path ends beside
        // it.
        let tasks = vec![at("near", -1.0, 0.0), at("mid", 2.0, 0.0)];
        let end = Coord { x: -1.5, y: 0.0 };
        let ordered = reorder_by_distance(tasks.clone(), ORIGIN, end);
        assert!(ordered.distance <= path_distance(ORIGIN, &tasks, end));
        assert_eq!(ids(&ordered), vec!["mid", "near"]);
    }

    #[rstest]
    fn unlocated_task_adds_no_distance() {
        let tasks = vec![Task::new("ghost", "ghost"), at("a", 1.0, 0.0)];
        let distance = path_distance(ORIGIN, &tasks, ORIGIN);
        assert!((distance - 2.0).abs() < 1e-9);
    }
}
