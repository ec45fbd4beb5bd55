//! Route provider trait for single point-to-point legs.

use async_trait::async_trait;

use crate::{Location, Route};

use super::{RouteProviderError, TravelMode};

/// Fetch a routed leg between two locations.
///
/// Implementations return `Ok(None)` when the backend answered without a
/// usable route, and `Err` when the backend could not be reached. The planner
/// treats both as "this leg cannot be routed".
///
/// Calls are awaited concurrently on one thread, so implementations do not
/// need to be `Send`.
#[async_trait(?Send)]
pub trait RouteProvider {
    /// Return the leg from `start` to `end` travelling by `mode`.
    async fn get_route(
        &self,
        start: &Location,
        end: &Location,
        mode: TravelMode,
    ) -> Result<Option<Route>, RouteProviderError>;
}
