//! Deterministic collaborator doubles for unit and behaviour tests.
//!
//! [`StubRouteProvider`] derives legs from planar distance so tests can reason
//! about travel times with pencil and paper. [`StubInference`] answers from
//! lookup tables keyed by task text.

use std::cell::Cell;
use std::collections::{HashMap, HashSet};
use std::time::Duration;

use async_trait::async_trait;
use geo::{Coord, LineString};

use crate::{
    InferenceError, Location, Route, RouteProvider, RouteProviderError, Segment, SegmentKind,
    TaskInference, TravelMode,
};

/// Construct a named location at planar coordinates.
///
/// # Examples
/// ```
/// use itinerary_core::test_support::location;
///
/// let hall = location("Hall", 1.0, 2.0);
/// assert_eq!(hall.coordinates.x, 1.0);
/// ```
#[must_use]
pub fn location(name: &str, x: f64, y: f64) -> Location {
    Location::new(name, Coord { x, y })
}

/// [`RouteProvider`] whose legs take `seconds_per_unit` per unit of planar
/// distance between the endpoints.
///
/// Distances are reported as one kilometre per coordinate unit. Destinations
/// can be configured to fail, to return no route, or to pass a tunnel; they
/// are matched on the end location's name.
#[derive(Debug, Default)]
pub struct StubRouteProvider {
    seconds_per_unit: f64,
    failing: HashSet<String>,
    unreachable: HashSet<String>,
    tunnels: HashSet<String>,
    calls: Cell<usize>,
}

impl StubRouteProvider {
    /// Construct a provider with the given travel pace.
    #[must_use]
    pub fn new(seconds_per_unit: f64) -> Self {
        Self {
            seconds_per_unit,
            ..Self::default()
        }
    }

    /// Fail every request towards the named location.
    #[must_use]
    pub fn failing_towards(mut self, name: &str) -> Self {
        self.failing.insert(name.to_owned());
        self
    }

    /// Answer `Ok(None)` for every request towards the named location.
    #[must_use]
    pub fn unreachable_towards(mut self, name: &str) -> Self {
        self.unreachable.insert(name.to_owned());
        self
    }

    /// Flag legs towards the named location as passing through a tunnel.
    #[must_use]
    pub fn tunnel_towards(mut self, name: &str) -> Self {
        self.tunnels.insert(name.to_owned());
        self
    }

    /// Number of `get_route` calls answered so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    /// Leg between two coordinates as this provider computes it.
    #[expect(
        clippy::float_arithmetic,
        reason = "stub legs scale planar distance by a fixed pace"
    )]
    #[must_use]
    pub fn leg_between(&self, from: Coord<f64>, to: Coord<f64>) -> Route {
        let units = (to.x - from.x).hypot(to.y - from.y);
        let seconds = (units * self.seconds_per_unit).max(0.0);
        let steps = LineString::new(vec![from, to]);
        Route::new(
            Duration::from_secs_f64(seconds),
            units * 1_000.0,
            vec![Segment::new(SegmentKind::Solid, steps)],
        )
    }
}

#[async_trait(?Send)]
impl RouteProvider for StubRouteProvider {
    async fn get_route(
        &self,
        start: &Location,
        end: &Location,
        _mode: TravelMode,
    ) -> Result<Option<Route>, RouteProviderError> {
        self.calls.set(self.calls.get().saturating_add(1));
        let name = end.name.clone().unwrap_or_default();
        if self.failing.contains(&name) {
            return Err(RouteProviderError::Service {
                message: format!("stubbed failure towards {name}"),
            });
        }
        if self.unreachable.contains(&name) {
            return Ok(None);
        }
        let leg = self
            .leg_between(start.coordinates, end.coordinates)
            .with_tunnel(self.tunnels.contains(&name));
        Ok(Some(leg))
    }
}

/// [`TaskInference`] answering from fixed tables keyed by task text.
#[derive(Debug, Default, Clone)]
pub struct StubInference {
    durations: HashMap<String, u32>,
    locations: HashMap<String, Location>,
    failing: HashSet<String>,
    unavailable: bool,
}

impl StubInference {
    /// Construct an inference double that knows nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `minutes` for the given task text.
    #[must_use]
    pub fn with_duration(mut self, text: &str, minutes: u32) -> Self {
        self.durations.insert(text.to_owned(), minutes);
        self
    }

    /// Answer `location` for the given task text.
    #[must_use]
    pub fn with_location(mut self, text: &str, location: Location) -> Self {
        self.locations.insert(text.to_owned(), location);
        self
    }

    /// Fail every call with [`InferenceError::Unavailable`].
    #[must_use]
    pub const fn unavailable(mut self) -> Self {
        self.unavailable = true;
        self
    }

    /// Fail calls for the given task text only.
    #[must_use]
    pub fn failing_for(mut self, text: &str) -> Self {
        self.failing.insert(text.to_owned());
        self
    }

    fn check_available(&self, task_text: &str) -> Result<(), InferenceError> {
        if self.unavailable || self.failing.contains(task_text) {
            return Err(InferenceError::Unavailable {
                message: format!("stubbed outage for {task_text:?}"),
            });
        }
        Ok(())
    }
}

#[async_trait(?Send)]
impl TaskInference for StubInference {
    async fn infer_duration(&self, task_text: &str) -> Result<Option<u32>, InferenceError> {
        self.check_available(task_text)?;
        Ok(self.durations.get(task_text).copied())
    }

    async fn infer_location(
        &self,
        task_text: &str,
        _bias: Coord<f64>,
    ) -> Result<Option<Location>, InferenceError> {
        self.check_available(task_text)?;
        Ok(self.locations.get(task_text).cloned())
    }
}
