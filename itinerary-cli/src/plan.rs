//! Plan command implementation for the itinerary CLI.

use std::io::{BufReader, Write};

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};
use chrono::NaiveDateTime;
use clap::Parser;
use itinerary_core::{Itinerary, Location, StraightLineConfig, StraightLineRouteProvider, Task, TravelMode};
use itinerary_planner::{CoreOrdering, ItineraryPlanner, PlannerConfig};
use log::{info, warn};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::{
    ARG_PLAN_CYCLING_SPEED, ARG_PLAN_DRIVING_SPEED, ARG_PLAN_FULL_TIMESTAMP, ARG_PLAN_MAX_FILLERS,
    ARG_PLAN_MAX_SUBSET, ARG_PLAN_MODE, ARG_PLAN_REORDER_TRAILING, ARG_PLAN_REQUEST,
    ARG_PLAN_WALKING_SPEED, CatalogueInference, CliError, DurationHint, ENV_PLAN_REQUEST,
};

/// CLI arguments for the `plan` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Plan a day of tasks from a JSON request holding the start \
                 location, the tasks and a catalogue of known places. Travel \
                 times are estimated from straight-line distance. Options can \
                 come from CLI flags, configuration files, or environment \
                 variables.",
    about = "Plan a day of tasks"
)]
#[ortho_config(prefix = "ITINERARY")]
pub(crate) struct PlanArgs {
    /// Path to a JSON file containing a plan request.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request_path: Option<Utf8PathBuf>,
    /// Travel mode for every leg (walking, cycling or driving).
    #[arg(long = ARG_PLAN_MODE, value_name = "mode")]
    #[serde(default)]
    pub(crate) mode: Option<TravelMode>,
    /// Assumed walking speed.
    #[arg(long = ARG_PLAN_WALKING_SPEED, value_name = "km/h")]
    #[serde(default)]
    pub(crate) walking_speed_kmh: Option<f64>,
    /// Assumed cycling speed.
    #[arg(long = ARG_PLAN_CYCLING_SPEED, value_name = "km/h")]
    #[serde(default)]
    pub(crate) cycling_speed_kmh: Option<f64>,
    /// Assumed driving speed.
    #[arg(long = ARG_PLAN_DRIVING_SPEED, value_name = "km/h")]
    #[serde(default)]
    pub(crate) driving_speed_kmh: Option<f64>,
    /// How many flexible tasks are considered for each gap (at most 20).
    #[arg(long = ARG_PLAN_MAX_FILLERS, value_name = "count")]
    #[serde(default)]
    pub(crate) max_filler_candidates: Option<usize>,
    /// Largest number of flexible tasks packed into one gap.
    #[arg(long = ARG_PLAN_MAX_SUBSET, value_name = "count")]
    #[serde(default)]
    pub(crate) max_subset_size: Option<usize>,
    /// Order fixed-time tasks by full timestamp instead of hour of day.
    #[arg(long = ARG_PLAN_FULL_TIMESTAMP, value_name = "bool")]
    #[serde(default)]
    pub(crate) full_timestamp_order: Option<bool>,
    /// Reorder leftover flexible tasks by distance from the last stop.
    #[arg(long = ARG_PLAN_REORDER_TRAILING, value_name = "bool")]
    #[serde(default)]
    pub(crate) reorder_trailing: Option<bool>,
}

impl PlanArgs {
    pub(crate) fn into_config(self) -> Result<PlanConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        PlanConfig::try_from(merged)
    }
}

/// Resolved `plan` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PlanConfig {
    /// Path to the JSON request file.
    pub(crate) request_path: Utf8PathBuf,
    /// Planner tuning.
    pub(crate) planner: PlannerConfig,
    /// Speeds for the straight-line estimator.
    pub(crate) speeds: StraightLineConfig,
}

impl PlanConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_file(&self.request_path, ARG_PLAN_REQUEST)
    }
}

impl TryFrom<PlanArgs> for PlanConfig {
    type Error = CliError;

    fn try_from(args: PlanArgs) -> Result<Self, Self::Error> {
        let request_path = args.request_path.ok_or(CliError::MissingArgument {
            field: ARG_PLAN_REQUEST,
            env: ENV_PLAN_REQUEST,
        })?;

        let defaults = StraightLineConfig::default();
        let speeds = StraightLineConfig {
            walking_speed_kmh: positive_speed(
                args.walking_speed_kmh,
                defaults.walking_speed_kmh,
                ARG_PLAN_WALKING_SPEED,
            )?,
            cycling_speed_kmh: positive_speed(
                args.cycling_speed_kmh,
                defaults.cycling_speed_kmh,
                ARG_PLAN_CYCLING_SPEED,
            )?,
            driving_speed_kmh: positive_speed(
                args.driving_speed_kmh,
                defaults.driving_speed_kmh,
                ARG_PLAN_DRIVING_SPEED,
            )?,
        };

        let planner_defaults = PlannerConfig::default();
        let core_ordering = if args.full_timestamp_order.unwrap_or(false) {
            CoreOrdering::FullTimestamp
        } else {
            CoreOrdering::HourOfDay
        };
        let planner = PlannerConfig {
            travel_mode: args.mode.unwrap_or(planner_defaults.travel_mode),
            core_ordering,
            max_filler_candidates: args
                .max_filler_candidates
                .unwrap_or(planner_defaults.max_filler_candidates),
            max_subset_size: args.max_subset_size.or(planner_defaults.max_subset_size),
            reorder_trailing_fillers: args
                .reorder_trailing
                .unwrap_or(planner_defaults.reorder_trailing_fillers),
        };

        Ok(Self {
            request_path,
            planner,
            speeds,
        })
    }
}

fn positive_speed(value: Option<f64>, default: f64, field: &'static str) -> Result<f64, CliError> {
    match value {
        None => Ok(default),
        Some(speed) if speed.is_finite() && speed > 0.0 => Ok(speed),
        Some(speed) => Err(CliError::InvalidSpeed { field, value: speed }),
    }
}

fn require_file(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    let parent = path
        .parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let Some(name) = path.file_name() else {
        return Err(CliError::SourcePathNotFile {
            field,
            path: path.to_path_buf(),
        });
    };
    let metadata = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())
        .and_then(|dir| dir.metadata(name));
    match metadata {
        Ok(meta) if meta.is_file() => Ok(()),
        Ok(_) => Err(CliError::SourcePathNotFile {
            field,
            path: path.to_path_buf(),
        }),
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
            Err(CliError::MissingSourceFile {
                field,
                path: path.to_path_buf(),
            })
        }
        Err(source) => Err(CliError::InspectSourcePath {
            field,
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// JSON document describing one planning request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanRequest {
    /// Where the user is now.
    pub start: Location,
    /// When the user sets off; the current local time when absent.
    #[serde(default)]
    pub departure: Option<NaiveDateTime>,
    /// Tasks to plan.
    pub tasks: Vec<Task>,
    /// Known places that task texts may mention.
    #[serde(default)]
    pub catalogue: Vec<Location>,
    /// Keyword duration estimates; built-in hints apply when absent.
    #[serde(default)]
    pub durations: Option<Vec<DurationHint>>,
}

pub(crate) fn run_plan(args: PlanArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_plan_with(args, &mut stdout)
}

pub(crate) fn run_plan_with(args: PlanArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = resolve_plan_config(args)?;
    let request = load_plan_request(&config.request_path)?;
    let itinerary = execute_plan(&config, request)?;
    write_itinerary(writer, &itinerary)
}

fn resolve_plan_config(args: PlanArgs) -> Result<PlanConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

/// Plans `request` with the offline collaborators described by `config`.
pub(crate) fn execute_plan(config: &PlanConfig, request: PlanRequest) -> Result<Itinerary, CliError> {
    let PlanRequest {
        start,
        departure,
        tasks,
        catalogue,
        durations,
    } = request;
    let provider = StraightLineRouteProvider::with_config(config.speeds.clone());
    let inference =
        CatalogueInference::new(catalogue, durations.unwrap_or_else(DurationHint::defaults));
    let planner = ItineraryPlanner::with_config(provider, inference, config.planner.clone());

    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .map_err(CliError::StartRuntime)?;
    let itinerary = runtime.block_on(async {
        match departure {
            Some(at) => planner.generate_task_route_at(&start, at, tasks).await,
            None => planner.generate_task_route(&start, tasks).await,
        }
    })?;

    for id in &itinerary.diagnostics.dropped_tasks {
        warn!("task {id} was left out: no location could be resolved");
    }
    info!(
        "planned {} task(s), {:.0} m in {}",
        itinerary.tasks.len(),
        itinerary.route.distance,
        itinerary_planner::format_travel_time(itinerary.route.duration)
    );
    Ok(itinerary)
}

/// Loads a JSON-encoded [`PlanRequest`] from disk.
pub(crate) fn load_plan_request(path: &Utf8Path) -> Result<PlanRequest, CliError> {
    let file = fs_utf8::File::open_ambient(path, ambient_authority()).map_err(|source| {
        CliError::OpenPlanRequest {
            path: path.to_path_buf(),
            source,
        }
    })?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|source| CliError::ParsePlanRequest {
        path: path.to_path_buf(),
        source,
    })
}

fn write_itinerary(writer: &mut dyn Write, itinerary: &Itinerary) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(itinerary).map_err(CliError::SerialiseItinerary)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteItinerary)?;
    writer
        .write_all(b"\n")
        .map_err(CliError::WriteItinerary)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<PlanConfig, CliError> {
    let merged = PlanArgs::merge_from_layers(layers).map_err(CliError::from)?;
    PlanConfig::try_from(merged)
}
