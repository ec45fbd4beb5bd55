//! Facade crate for the campus itinerary planner.
//!
//! This crate re-exports the core domain types and collaborator traits and,
//! behind the default `planner` feature, the optimisation engine.

#![forbid(unsafe_code)]

pub use itinerary_core::{
    Diagnostics, InferenceError, Itinerary, Location, ParseTravelModeError, Route, RouteProvider,
    RouteProviderError, Segment, SegmentKind, StraightLineConfig, StraightLineRouteProvider, Task,
    TaskInference, TravelMode,
};

#[cfg(feature = "test-support")]
pub use itinerary_core::test_support;

#[cfg(feature = "planner")]
pub use itinerary_planner::{CoreOrdering, ItineraryPlanner, PlanError, PlannerConfig};
