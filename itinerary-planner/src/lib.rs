//! Task-route optimisation for the campus itinerary planner.
//!
//! [`ItineraryPlanner`] turns a start location and a list of loosely specified
//! tasks into an ordered [`Itinerary`](itinerary_core::Itinerary). Tasks with a
//! fixed start time form the backbone of the day; flexible tasks are packed
//! into the idle windows between them and any that do not fit are appended at
//! the end.
//!
//! The pipeline stages are exposed individually so they can be tested and
//! reused: [`enrich_tasks`], [`partition_tasks`], [`LegRouter`],
//! [`reorder_by_distance`], [`FillerPacker`] and [`assemble_route`].

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod assemble;
mod config;
mod enrich;
mod error;
mod legs;
mod packer;
mod partition;
mod planner;
mod reorder;

pub use assemble::assemble_route;
pub use config::{CoreOrdering, PlannerConfig};
pub use enrich::enrich_tasks;
pub use error::PlanError;
pub use legs::{LegRouter, PlannedLeg, START_TASK_ID, format_travel_time};
pub use packer::{FillerPacker, PackedGap, filler_combinations, maximum_free_time};
pub use partition::{Partition, partition_tasks};
pub use planner::ItineraryPlanner;
pub use reorder::{Reordered, euclidean, path_distance, reorder_by_distance};
