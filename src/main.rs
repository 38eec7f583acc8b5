//! # reqline Main Entry Point
//!
//! Sets up logging, parses arguments and hands off to [`reqline::cmd`].

use reqline::{cmd, config, CommandLineArgs};
use std::process::ExitCode;
use tracing_subscriber::{fmt::time::ChronoLocal, layer::SubscriberExt, util::SubscriberInitExt};

fn init_tracing(verbose: bool) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_new(config::get_log_filter(verbose))
                .unwrap_or_else(|_| config::DEFAULT_LOG_FILTER.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_timer(ChronoLocal::rfc_3339())
                .with_writer(std::io::stderr),
        )
        .init();
}

fn main() -> ExitCode {
    let args = CommandLineArgs::parse();
    init_tracing(args.verbose());
    tracing::debug!(?args, "parsed arguments");

    match cmd::run(&args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
