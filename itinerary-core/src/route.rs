//! Routed legs and assembled routes.
//!
//! The same [`Route`] shape describes a single point-to-point leg returned by
//! a [`RouteProvider`](crate::RouteProvider) and the concatenated itinerary
//! the planner hands back to its caller.

use std::time::Duration;

use geo::LineString;
use serde::{Deserialize, Serialize};

/// How a segment should be drawn on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    /// Regular path.
    #[default]
    Solid,
    /// Indoor, tunnel or otherwise approximate path.
    Dashed,
}

/// A renderable polyline belonging to one leg.
///
/// `id` is positional and only meaningful after assembly; providers leave it
/// empty. `task_id` names the task the leg arrives at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Position-derived identifier, e.g. `segment-3`.
    #[serde(default)]
    pub id: String,
    /// Drawing style.
    #[serde(default)]
    pub kind: SegmentKind,
    /// Ordered coordinates of the polyline.
    pub steps: LineString<f64>,
    /// Task reached at the end of the leg this segment belongs to.
    #[serde(default)]
    pub task_id: Option<String>,
}

impl Segment {
    /// Construct an unnumbered, untagged segment.
    ///
    /// # Examples
    /// ```
    /// use geo::{Coord, LineString};
    /// use itinerary_core::{Segment, SegmentKind};
    ///
    /// let steps = LineString::new(vec![Coord { x: 0.0, y: 0.0 }, Coord { x: 1.0, y: 0.0 }]);
    /// let segment = Segment::new(SegmentKind::Solid, steps);
    /// assert!(segment.id.is_empty());
    /// assert!(segment.task_id.is_none());
    /// ```
    #[must_use]
    pub const fn new(kind: SegmentKind, steps: LineString<f64>) -> Self {
        Self {
            id: String::new(),
            kind,
            steps,
            task_id: None,
        }
    }
}

/// Travel time, distance and geometry of a leg or a whole itinerary.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use itinerary_core::Route;
///
/// let route = Route::new(Duration::from_secs(300), 420.0, Vec::new());
/// assert_eq!(route.duration.as_secs(), 300);
/// assert!(!route.tunnel);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Route {
    /// Travel time.
    pub duration: Duration,
    /// Distance in metres.
    pub distance: f64,
    /// Geometry in travel order.
    pub segments: Vec<Segment>,
    /// Whether any part of the route passes through a tunnel.
    #[serde(default)]
    pub tunnel: bool,
}

impl Route {
    /// Construct a route without tunnels.
    #[must_use]
    pub const fn new(duration: Duration, distance: f64, segments: Vec<Segment>) -> Self {
        Self {
            duration,
            distance,
            segments,
            tunnel: false,
        }
    }

    /// Construct an empty route with zero duration and distance.
    #[must_use]
    pub const fn empty() -> Self {
        Self::new(Duration::ZERO, 0.0, Vec::new())
    }

    /// Mark whether the route uses a tunnel.
    #[must_use]
    pub const fn with_tunnel(mut self, tunnel: bool) -> Self {
        self.tunnel = tunnel;
        self
    }
}
