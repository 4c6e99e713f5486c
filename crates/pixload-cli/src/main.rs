//! pixload CLI: inspect, compare and verify raster images
//!
//! ## Usage
//!
//! ```bash
//! pixload info photo.png                      # Dimensions and pixel layout
//! pixload -d fixtures compare ref.png out.jpg # Compare pixels (lossy for JPEG)
//! pixload verify bw.png --width 800 --height 600
//! pixload convert in.tiff out.bmp
//! pixload formats
//! ```

use clap::Parser;
use pixload_cli::{handlers, init_logging, Cli, CliConfig, CliResult, Commands, Reporter, Verbosity};
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();

    let config = build_config(&cli)?;
    init_logging(&config);
    tracing::debug!(search_paths = ?config.effective_loader_config().search_paths, "configured");

    let reporter = Reporter::new(config.color.should_color(), config.verbosity.is_quiet());

    match &cli.command {
        Commands::Info(args) => handlers::execute_info(&config, &reporter, args),
        Commands::Compare(args) => handlers::execute_compare(&config, &reporter, args),
        Commands::Verify(args) => handlers::execute_verify(&config, &reporter, args),
        Commands::Convert(args) => handlers::execute_convert(&config, &reporter, args),
        Commands::Formats => {
            handlers::execute_formats(&reporter);
            Ok(())
        }
    }
}

fn build_config(cli: &Cli) -> CliResult<CliConfig> {
    let verbosity = if cli.quiet {
        Verbosity::Quiet
    } else {
        match cli.verbose {
            0 => Verbosity::Normal,
            1 => Verbosity::Verbose,
            _ => Verbosity::Debug,
        }
    };

    let mut config = CliConfig::new()
        .with_verbosity(verbosity)
        .with_color(cli.color.clone().into())
        .with_log_format(cli.log_format.into());

    if let Some(path) = &cli.config {
        config = config.with_loader_file(path)?;
    }
    if cli.no_env {
        config.loader.use_env = false;
    }
    for dir in &cli.data_paths {
        config = config.with_data_path(dir);
    }
    Ok(config)
}
