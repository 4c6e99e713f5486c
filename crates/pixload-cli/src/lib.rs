//! pixload CLI library
//!
//! Command-line interface over the pixload image loader.

#![warn(missing_docs)]

mod commands;
mod config;
mod error;
pub mod handlers;
mod output;

pub use commands::{
    Cli, ColorArg, Commands, CompareArgs, ConvertArgs, InfoArgs, LogFormatArg, ModeArg,
    OutputFormatArg, VerifyArgs,
};
pub use config::{init_logging, CliConfig, ColorChoice, LogFormat, Verbosity};
pub use error::{CliError, CliResult};
pub use output::Reporter;
