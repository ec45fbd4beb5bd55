//! Command-line interface for planning a campus day offline.
//!
//! `itinerary plan request.json` reads a JSON planning request, plans it with
//! straight-line travel estimates and a place catalogue supplied in the
//! request, and prints the resulting itinerary as JSON.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod catalogue;
mod error;
mod plan;

pub use catalogue::{CatalogueInference, DurationHint};
pub use error::CliError;
pub use plan::PlanRequest;

use plan::{PlanArgs, run_plan};

pub(crate) const ARG_PLAN_REQUEST: &str = "request";
pub(crate) const ARG_PLAN_MODE: &str = "mode";
pub(crate) const ARG_PLAN_WALKING_SPEED: &str = "walking-speed-kmh";
pub(crate) const ARG_PLAN_CYCLING_SPEED: &str = "cycling-speed-kmh";
pub(crate) const ARG_PLAN_DRIVING_SPEED: &str = "driving-speed-kmh";
pub(crate) const ARG_PLAN_MAX_FILLERS: &str = "max-filler-candidates";
pub(crate) const ARG_PLAN_MAX_SUBSET: &str = "max-subset-size";
pub(crate) const ARG_PLAN_FULL_TIMESTAMP: &str = "full-timestamp-order";
pub(crate) const ARG_PLAN_REORDER_TRAILING: &str = "reorder-trailing";
pub(crate) const ENV_PLAN_REQUEST: &str = "ITINERARY_CMDS_PLAN_REQUEST_PATH";

/// Run the itinerary CLI with the current process arguments and environment.
///
/// # Errors
///
/// Returns [`CliError`] when arguments or configuration are invalid, the
/// request cannot be read, or the itinerary cannot be written.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Plan(args) => run_plan(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "itinerary",
    about = "Plan a day of campus tasks around fixed appointments",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Plan the tasks in a JSON request and print the itinerary.
    Plan(PlanArgs),
}

#[cfg(test)]
mod tests;
