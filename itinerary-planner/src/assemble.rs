//! Concatenate legs into one renderable route.

use itinerary_core::Route;

/// Join `legs` in visiting order.
///
/// Durations and distances are summed, segments are flattened and numbered
/// `segment-0`, `segment-1`, ... and the result passes through a tunnel if
/// any leg does.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use geo::{Coord, LineString};
/// use itinerary_core::{Route, Segment, SegmentKind};
/// use itinerary_planner::assemble_route;
///
/// let leg = |seconds| {
///     let steps = LineString::new(vec![Coord { x: 0.0, y: 0.0 }, Coord { x: 1.0, y: 0.0 }]);
///     Route::new(Duration::from_secs(seconds), 100.0, vec![Segment::new(SegmentKind::Solid, steps)])
/// };
/// let route = assemble_route([leg(60), leg(120)]);
/// assert_eq!(route.duration, Duration::from_secs(180));
/// let ids: Vec<_> = route.segments.iter().map(|segment| segment.id.as_str()).collect();
/// assert_eq!(ids, vec!["segment-0", "segment-1"]);
/// ```
#[expect(
    clippy::float_arithmetic,
    reason = "leg distances are summed in metres"
)]
#[must_use]
pub fn assemble_route<I>(legs: I) -> Route
where
    I: IntoIterator<Item = Route>,
{
    let mut route = Route::empty();
    for leg in legs {
        route.duration = route.duration.saturating_add(leg.duration);
        route.distance += leg.distance;
        route.tunnel |= leg.tunnel;
        route.segments.extend(leg.segments);
    }
    for (index, segment) in route.segments.iter_mut().enumerate() {
        segment.id = format!("segment-{index}");
    }
    route
}
