//! Offline route estimates from great-circle distance.
//!
//! Less accurate than a routing service (ignores paths and buildings) but
//! always available, which makes it the default for the command-line tool.

use std::time::Duration;

use async_trait::async_trait;
use geo::{Coord, LineString};

use crate::{Location, Route, Segment, SegmentKind};

use super::{RouteProvider, RouteProviderError, TravelMode};

/// Earth radius in metres.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Assumed travel speeds per mode.
#[derive(Debug, Clone, PartialEq)]
pub struct StraightLineConfig {
    /// Walking speed in km/h.
    pub walking_speed_kmh: f64,
    /// Cycling speed in km/h.
    pub cycling_speed_kmh: f64,
    /// Driving speed in km/h.
    pub driving_speed_kmh: f64,
}

impl Default for StraightLineConfig {
    fn default() -> Self {
        Self {
            walking_speed_kmh: 5.0,
            cycling_speed_kmh: 15.0,
            driving_speed_kmh: 30.0,
        }
    }
}

impl StraightLineConfig {
    /// Speed assumed for `mode`.
    #[must_use]
    pub const fn speed_kmh(&self, mode: TravelMode) -> f64 {
        match mode {
            TravelMode::Walking => self.walking_speed_kmh,
            TravelMode::Cycling => self.cycling_speed_kmh,
            TravelMode::Driving => self.driving_speed_kmh,
        }
    }
}

/// [`RouteProvider`] that draws a straight line between the endpoints.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use itinerary_core::{Location, RouteProvider, StraightLineRouteProvider, TravelMode};
///
/// # tokio::runtime::Builder::new_current_thread().build().expect("runtime").block_on(async {
/// let provider = StraightLineRouteProvider::default();
/// let a = Location::new("A", Coord { x: 8.5400, y: 47.3700 });
/// let b = Location::new("B", Coord { x: 8.5500, y: 47.3700 });
/// let leg = provider
///     .get_route(&a, &b, TravelMode::Walking)
///     .await
///     .expect("estimate never fails")
///     .expect("finite speed yields a leg");
/// assert!(leg.distance > 700.0 && leg.distance < 800.0);
/// assert_eq!(leg.segments.len(), 1);
/// # });
/// ```
#[derive(Debug, Clone, Default)]
pub struct StraightLineRouteProvider {
    config: StraightLineConfig,
}

impl StraightLineRouteProvider {
    /// Construct a provider with explicit speeds.
    #[must_use]
    pub const fn with_config(config: StraightLineConfig) -> Self {
        Self { config }
    }

    /// Speeds used by this provider.
    #[must_use]
    pub const fn config(&self) -> &StraightLineConfig {
        &self.config
    }

    /// Estimate the leg between two coordinates.
    ///
    /// Returns `None` when the configured speed cannot produce a finite,
    /// non-negative travel time.
    #[expect(
        clippy::float_arithmetic,
        reason = "travel time estimates divide distance by speed"
    )]
    #[must_use]
    pub fn estimate(&self, from: Coord<f64>, to: Coord<f64>, mode: TravelMode) -> Option<Route> {
        let speed_kmh = self.config.speed_kmh(mode);
        if !speed_kmh.is_finite() || speed_kmh <= 0.0 {
            return None;
        }
        let distance = haversine_m(from, to);
        let seconds = distance / (speed_kmh / 3.6);
        let duration = Duration::try_from_secs_f64(seconds).ok()?;
        let steps = LineString::new(vec![from, to]);
        let segment = Segment::new(SegmentKind::Solid, steps);
        Some(Route::new(
            duration,
            distance,
            vec![segment],
        ))
    }
}

#[async_trait(?Send)]
impl RouteProvider for StraightLineRouteProvider {
    async fn get_route(
        &self,
        start: &Location,
        end: &Location,
        mode: TravelMode,
    ) -> Result<Option<Route>, RouteProviderError> {
        Ok(self.estimate(start.coordinates, end.coordinates, mode))
    }
}

/// Great-circle distance between two WGS84 coordinates in metres.
#[expect(
    clippy::float_arithmetic,
    reason = "haversine formula is floating-point by nature"
)]
fn haversine_m(from: Coord<f64>, to: Coord<f64>) -> f64 {
    let lat1 = from.y.to_radians();
    let lat2 = to.y.to_radians();
    let delta_lat = (to.y - from.y).to_radians();
    let delta_lng = (to.x - from.x).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_M * c
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn same_point_has_zero_distance() {
        let point = Coord { x: 8.54, y: 47.37 };
        assert!(haversine_m(point, point) < 0.001);
    }

    #[rstest]
    fn known_distance_is_reasonable() {
        // Zurich HB to the ETH main building, a little over 600 m.
        let station = Coord { x: 8.5402, y: 47.3779 };
        let eth = Coord { x: 8.5481, y: 47.3763 };
        let metres = haversine_m(station, eth);
        assert!(metres > 500.0 && metres < 1_000.0, "got {metres}");
    }

    #[rstest]
    fn walking_one_kilometre_takes_twelve_minutes() {
        let provider = StraightLineRouteProvider::default();
        // Exactly 1 km north along a meridian.
        let from = Coord { x: 0.0, y: 0.0 };
        let to = Coord {
            x: 0.0,
            y: (1_000.0_f64 / EARTH_RADIUS_M).to_degrees(),
        };
        let leg = provider
            .estimate(from, to, TravelMode::Walking)
            .expect("leg for positive speed");
        let secs = leg.duration.as_secs_f64();
        assert!((secs - 720.0).abs() < 1.0, "got {secs}");
    }

    #[rstest]
    #[case(0.0)]
    #[case(-3.0)]
    #[case(f64::NAN)]
    #[case(1e-20)]
    fn unusable_speed_yields_no_route(#[case] speed: f64) {
        let provider = StraightLineRouteProvider::with_config(StraightLineConfig {
            walking_speed_kmh: speed,
            ..StraightLineConfig::default()
        });
        let leg = provider.estimate(
            Coord { x: 0.0, y: 0.0 },
            Coord { x: 0.0, y: 0.01 },
            TravelMode::Walking,
        );
        assert!(leg.is_none());
    }

    #[tokio::test]
    async fn provider_tags_nothing_and_uses_one_segment() {
        let provider = StraightLineRouteProvider::default();
        let a = Location::new("A", Coord { x: 0.0, y: 0.0 });
        let b = Location::new("B", Coord { x: 0.0, y: 0.001 });
        let leg = provider
            .get_route(&a, &b, TravelMode::Cycling)
            .await
            .expect("estimate is infallible")
            .expect("leg");
        let segment = leg.segments.first().expect("one segment");
        assert!(segment.task_id.is_none());
        assert_eq!(segment.steps.0.len(), 2);
    }
}
