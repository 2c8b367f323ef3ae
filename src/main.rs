//! Celestial rise/set/transit calculator CLI - entry point and exit handling.

mod cli;
mod compute;
mod data;
mod engine;
mod ephemeris;
mod error;
mod geocode;
mod output;
mod planner;

use error::{CliError, ComputeError};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "CALCELESTIAL_LOG";
const EXIT_FAILURE: u8 = 1;
const EXIT_CIRCUMPOLAR: u8 = 2;

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn report_usage(diagnostics: &[String]) {
    for diagnostic in diagnostics {
        eprintln!("{}", diagnostic);
    }
    eprintln!();
    eprint!("{}", cli::get_help_text());
}

fn run(args: &[String]) -> Result<(), CliError> {
    let alias = args.first().and_then(|program| cli::invocation_alias(program));
    let (source, params) = cli::parse_cli(args, alias.as_deref())?;

    let geocoder = geocode::default_geocoder();
    let request = planner::build_request(source, params, geocoder.as_deref())?;

    let details = match compute::calculate(&engine::Almanac, &request) {
        Ok(details) => details,
        Err(ComputeError::Circumpolar(body)) => {
            tracing::info!(%body, moment = %request.moment, "no such event today");
            return Err(CliError::Circumpolar);
        }
        Err(err) => return Err(CliError::Message(err.to_string())),
    };

    let mut stdout = std::io::stdout().lock();
    output::write_result(
        &mut stdout,
        &details,
        &request.output.format,
        request.output.timezone,
    )
    .map_err(|err| CliError::Message(format!("failed to write output: {}", err)))
}

fn main() -> ExitCode {
    init_logging();
    let args: Vec<String> = std::env::args().collect();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::Exit(text)) => {
            println!("{}", text.trim_end());
            ExitCode::SUCCESS
        }
        Err(CliError::Usage(diagnostics)) => {
            report_usage(&diagnostics);
            ExitCode::from(EXIT_FAILURE)
        }
        Err(err @ CliError::Circumpolar) => {
            eprintln!("{}", err);
            ExitCode::from(EXIT_CIRCUMPOLAR)
        }
        Err(CliError::Message(message)) => {
            eprintln!("Error: {}", message);
            ExitCode::from(EXIT_FAILURE)
        }
    }
}
