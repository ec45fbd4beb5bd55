//! Error types emitted by the itinerary CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use itinerary_planner::PlanError;
use thiserror::Error;

/// Errors emitted by the itinerary CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Name of the missing option.
        field: &'static str,
        /// Environment variable that can provide it.
        env: &'static str,
    },
    /// A configured speed cannot produce travel times.
    #[error("{field} must be a positive number of km/h, got {value}")]
    InvalidSpeed {
        /// Name of the offending option.
        field: &'static str,
        /// Value that was supplied.
        value: f64,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Name of the option holding the path.
        field: &'static str,
        /// Path that was supplied.
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Name of the option holding the path.
        field: &'static str,
        /// Path that was supplied.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Name of the option holding the path.
        field: &'static str,
        /// Path that was supplied.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// Opening the plan request file failed.
    #[error("failed to open plan request at {path:?}: {source}")]
    OpenPlanRequest {
        /// Path of the request file.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// Plan request JSON could not be decoded.
    #[error("failed to parse plan request JSON at {path:?}: {source}")]
    ParsePlanRequest {
        /// Path of the request file.
        path: Utf8PathBuf,
        /// Underlying decode failure.
        #[source]
        source: serde_json::Error,
    },
    /// The async runtime could not be started.
    #[error("failed to start runtime: {0}")]
    StartRuntime(#[source] std::io::Error),
    /// The planner rejected the request.
    #[error("planning failed: {source}")]
    Plan {
        /// Planner failure.
        #[from]
        source: PlanError,
    },
    /// Serialising the itinerary failed.
    #[error("failed to serialise itinerary: {0}")]
    SerialiseItinerary(#[source] serde_json::Error),
    /// Writing the itinerary failed.
    #[error("failed to write itinerary: {0}")]
    WriteItinerary(#[source] std::io::Error),
}
