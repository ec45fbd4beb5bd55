//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = itinerary_cli::run() {
        eprintln!("itinerary: {err}");
        std::process::exit(1);
    }
}
