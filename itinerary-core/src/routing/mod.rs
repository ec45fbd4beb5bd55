//! Point-to-point routing between locations.
//!
//! The [`RouteProvider`] trait abstracts the routing backend. Callers pass a
//! start and end [`Location`](crate::Location) with a [`TravelMode`] and get
//! back a single [`Route`](crate::Route) leg, `None` when the backend found no
//! path, or an error when the backend could not be asked.
//!
//! [`StraightLineRouteProvider`] estimates legs from great-circle distance and
//! is used where no routing service is reachable.

mod error;
mod mode;
mod provider;
mod straight_line;

pub use error::RouteProviderError;
pub use mode::{ParseTravelModeError, TravelMode};
pub use provider::RouteProvider;
pub use straight_line::{StraightLineConfig, StraightLineRouteProvider};
