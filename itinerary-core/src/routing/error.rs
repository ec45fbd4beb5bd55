//! Errors reported by route providers.

use thiserror::Error;

/// Errors from [`crate::routing::RouteProvider::get_route`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum RouteProviderError {
    /// The backend reported that no path exists between the endpoints.
    #[error("no path from {from} to {to}")]
    Unreachable {
        /// Label of the start location.
        from: String,
        /// Label of the end location.
        to: String,
    },
    /// The backend failed to answer the request.
    #[error("routing service failed: {message}")]
    Service {
        /// Description of the failure.
        message: String,
    },
}
