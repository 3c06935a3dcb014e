#[cfg(not(feature = "cli"))]
compile_error!("The `ibdstat` binary requires the `cli` feature. Build with `--features cli`.");

use clap::Parser;
use std::fs::File;
use std::io::Write;
use std::process;

use tracing_subscriber::EnvFilter;

use ibdstat::cli;
use ibdstat::cli::app::{Cli, ColorMode, Commands};
use ibdstat::IbdError;

fn main() {
    let cli = Cli::parse();

    init_logging(&cli.log_level);

    match cli.color {
        ColorMode::Always => colored::control::set_override(true),
        ColorMode::Never => colored::control::set_override(false),
        ColorMode::Auto => {} // colored auto-detects tty
    }

    let writer_result: Result<Box<dyn Write>, IbdError> = match &cli.output {
        Some(path) => File::create(path)
            .map(|f| Box::new(f) as Box<dyn Write>)
            .map_err(|e| IbdError::Io(format!("Cannot create {}: {}", path, e))),
        None => Ok(Box::new(std::io::stdout()) as Box<dyn Write>),
    };

    let mut writer = match writer_result {
        Ok(w) => w,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Stats {
            file,
            json,
            page_size,
        } => cli::stats::execute(
            &cli::stats::StatsOptions {
                file,
                json,
                page_size,
            },
            &mut writer,
        ),

        Commands::Header {
            file,
            page,
            json,
            page_size,
        } => cli::header::execute(
            &cli::header::HeaderOptions {
                file,
                page,
                json,
                page_size,
            },
            &mut writer,
        ),
    };

    if let Err(e) = result.and_then(|_| writer.flush().map_err(|e| IbdError::Io(e.to_string()))) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Install the stderr log subscriber. `RUST_LOG` wins over `--log-level`.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("ibdstat={}", level)))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}
