//! Core domain types for the campus itinerary planner.
//!
//! This crate holds the values exchanged between the planner and its callers
//! ([`Location`], [`Task`], [`Route`], [`Itinerary`]) together with the two
//! collaborator seams the planner consumes: [`RouteProvider`] for point-to-point
//! legs and [`TaskInference`] for filling in missing task details.
//!
//! Concrete network clients live outside this workspace. The
//! [`StraightLineRouteProvider`] offers an offline estimate suitable for tools
//! and demos.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod inference;
mod itinerary;
mod location;
mod route;
pub mod routing;
mod task;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use inference::{InferenceError, TaskInference};
pub use itinerary::{Diagnostics, Itinerary};
pub use location::Location;
pub use route::{Route, Segment, SegmentKind};
pub use routing::{
    ParseTravelModeError, RouteProvider, RouteProviderError, StraightLineConfig,
    StraightLineRouteProvider, TravelMode,
};
pub use task::Task;
