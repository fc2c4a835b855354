//! `gherkin-pickles` binary.
//!
//! Streams Gherkin sources, parsed documents and compiled pickles as NDJSON
//! on stdout. Diagnostics go to stderr.

use std::io;
use std::process::ExitCode;

use camino::Utf8PathBuf;
use clap::Parser;
use eyre::{Result, WrapErr};
use gherkin_pickles::events::{EventProcessor, StreamConfig};
use tracing::{error, info};

use gherkin_pickles_cli::config::{CliConfig, LogLevel};
use gherkin_pickles_cli::error::{CliError, EXIT_FAILURE, EXIT_INVALID_CONFIG};
use gherkin_pickles_cli::logging::init_logging;
use gherkin_pickles_cli::run::{run_paths, run_stream};

/// Compile Gherkin feature files into pickles, emitted as NDJSON events.
#[derive(Parser, Debug)]
#[command(name = "gherkin-pickles", version, about)]
struct Args {
    /// Do not emit `source` events.
    #[arg(long)]
    no_source: bool,
    /// Do not emit `gherkin-document` events.
    #[arg(long)]
    no_ast: bool,
    /// Do not emit `pickle` events.
    #[arg(long)]
    no_pickles: bool,
    /// Log level (trace, debug, info, warn, error).
    #[arg(long)]
    log_level: Option<LogLevel>,
    /// Feature files or directories. Reads NDJSON events from stdin when
    /// omitted.
    paths: Vec<Utf8PathBuf>,
}

impl Args {
    const fn stream_config(&self) -> StreamConfig {
        StreamConfig {
            print_source: !self.no_source,
            print_ast: !self.no_ast,
            print_pickles: !self.no_pickles,
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    let config = match build_config(&args) {
        Ok(config) => config,
        Err(e) => {
            init_logging(&CliConfig::default());
            error!(error = %e, "invalid configuration");
            return ExitCode::from(EXIT_INVALID_CONFIG);
        }
    };
    init_logging(&config);
    info!(version = env!("CARGO_PKG_VERSION"), "starting gherkin-pickles");

    match run(&args, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(report) => {
            error!(error = ?report, "gherkin-pickles failed");
            let code = report
                .downcast_ref::<CliError>()
                .map_or(EXIT_FAILURE, CliError::exit_code);
            ExitCode::from(code)
        }
    }
}

fn build_config(args: &Args) -> Result<CliConfig, CliError> {
    let config = CliConfig::from_env()?;
    Ok(config.apply_overrides(args.log_level, Some(args.stream_config())))
}

fn run(args: &Args, config: &CliConfig) -> Result<()> {
    let processor = EventProcessor::new(config.stream);
    let mut stdout = io::stdout().lock();
    if args.paths.is_empty() {
        run_stream(io::stdin().lock(), processor, &mut stdout)
            .wrap_err("failed to process events from stdin")?;
    } else {
        run_paths(&args.paths, processor, &mut stdout)
            .wrap_err("failed to process feature files")?;
    }
    Ok(())
}
