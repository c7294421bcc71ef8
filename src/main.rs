//! instrumentation-reporter main module.
//!
//! This program reads the instrumentation mapping produced by the compiler's
//! production instrumentation pass, together with a directory of execution
//! reports sent by instrumented deployments, and generates a JSON summary:
//! for every instrumentation point, the percent of reports it was executed in
//! and its average frequency.
//!
//! Each report is a JSON object mapping point identifiers to measurements:
//!     `{"<point id>": {"frequency": 10}}`

#![forbid(unsafe_code)]

mod cli;

use instrumentation_reporter::error::Result;
use instrumentation_reporter::{config, gen, points};
use tracing::Level;

fn main() {
    let app = cli::application();
    init_logger(app.verbose);
    if let Err(err) = execute(app) {
        eprintln!("Error: {:#}", err);
        std::process::exit(config::FAILURE);
    }
}

/// Initializes the logger; stage progress is shown only when verbose.
fn init_logger(verbose: bool) {
    let level = if verbose { Level::INFO } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();
}

/// Dispatches CLI commands.
fn execute(app: cli::Application) -> Result<()> {
    match app.cmd {
        cli::Command::Generate {
            mapping,
            reports,
            output,
            format,
        } => {
            gen::run(
                &mapping,
                &reports,
                &format,
                output.as_ref().map(|p| p.as_ref()), // Option<T> -> Option<&T>
            )?;
        }

        cli::Command::Points { mapping } => {
            points::run(&mapping)?;
        }
    }

    Ok(())
}
