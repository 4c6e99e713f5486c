//! CLI command definitions using clap

use clap::{Parser, Subcommand, ValueEnum};
use pixload::CompareMode;
use std::path::PathBuf;

/// pixload: inspect, compare and verify raster images
#[derive(Parser, Debug)]
#[command(name = "pixload")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Log line format on stderr
    #[arg(long, value_enum, default_value = "text", global = true)]
    pub log_format: LogFormatArg,

    /// Extra search directory for relative file names (repeatable, searched first)
    #[arg(short = 'd', long = "data-path", global = true)]
    pub data_paths: Vec<PathBuf>,

    /// Loader configuration file (YAML)
    #[arg(long, global = true, env = "PIXLOAD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Ignore PIXLOAD_DATA_PATH
    #[arg(long, global = true)]
    pub no_env: bool,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show dimensions and pixel layout of an image
    Info(InfoArgs),

    /// Compare the pixels of two images
    Compare(CompareArgs),

    /// Check an image against a black/white split reference
    Verify(VerifyArgs),

    /// Re-encode an image; the output format follows the extension
    Convert(ConvertArgs),

    /// List the formats this build can decode
    Formats,
}

/// Arguments for the info command
#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// Image file (path or name inside a search directory)
    pub file: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormatArg,
}

/// Arguments for the compare command
#[derive(Parser, Debug)]
pub struct CompareArgs {
    /// Reference image
    pub reference: PathBuf,

    /// Image compared against the reference
    pub candidate: PathBuf,

    /// Comparison mode
    #[arg(long, value_enum, default_value = "auto")]
    pub mode: ModeArg,

    /// Average per-byte tolerance for lossy comparison
    #[arg(long)]
    pub tolerance: Option<f64>,
}

/// Arguments for the verify command
#[derive(Parser, Debug)]
pub struct VerifyArgs {
    /// Image file (path or name inside a search directory)
    pub file: PathBuf,

    /// Expected width
    #[arg(long)]
    pub width: u32,

    /// Expected height
    #[arg(long)]
    pub height: u32,

    /// Expected bytes per pixel
    #[arg(long, default_value = "3")]
    pub bpp: u8,

    /// Comparison mode
    #[arg(long, value_enum, default_value = "auto")]
    pub mode: ModeArg,

    /// Average per-byte tolerance for lossy comparison (defaults to the
    /// configured one)
    #[arg(long)]
    pub tolerance: Option<f64>,
}

/// Arguments for the convert command
#[derive(Parser, Debug)]
pub struct ConvertArgs {
    /// Source image
    pub input: PathBuf,

    /// Destination file
    pub output: PathBuf,
}

/// Comparison mode argument
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ModeArg {
    /// Lossy for lossy formats (JPEG), exact otherwise
    #[default]
    Auto,
    /// Byte-for-byte equality
    Exact,
    /// Average difference below the tolerance
    Lossy,
}

impl ModeArg {
    /// Resolve to a concrete mode; `lossy_source` applies to `Auto` only
    #[must_use]
    pub const fn resolve(self, lossy_source: bool) -> CompareMode {
        match self {
            Self::Auto => CompareMode::for_lossy(lossy_source),
            Self::Exact => CompareMode::Exact,
            Self::Lossy => CompareMode::Lossy,
        }
    }
}

/// Output format argument
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormatArg {
    /// Human-readable text
    #[default]
    Text,
    /// JSON
    Json,
}

/// Log format argument
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogFormatArg {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

impl From<LogFormatArg> for crate::config::LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Text => Self::Text,
            LogFormatArg::Json => Self::Json,
        }
    }
}

/// Color argument for CLI
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum ColorArg {
    /// Automatic color detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for crate::config::ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::config::{ColorChoice, LogFormat};

    mod cli_tests {
        use super::*;

        #[test]
        fn test_parse_info_command() {
            let cli = Cli::parse_from(["pixload", "info", "a.png"]);
            if let Commands::Info(args) = cli.command {
                assert_eq!(args.file, PathBuf::from("a.png"));
                assert_eq!(args.format, OutputFormatArg::Text);
            } else {
                panic!("expected info command");
            }
        }

        #[test]
        fn test_parse_info_json() {
            let cli = Cli::parse_from(["pixload", "info", "a.png", "--format", "json"]);
            if let Commands::Info(args) = cli.command {
                assert_eq!(args.format, OutputFormatArg::Json);
            } else {
                panic!("expected info command");
            }
        }

        #[test]
        fn test_parse_compare_command() {
            let cli = Cli::parse_from([
                "pixload",
                "compare",
                "ref.png",
                "out.jpg",
                "--mode",
                "lossy",
                "--tolerance",
                "2.5",
            ]);
            if let Commands::Compare(args) = cli.command {
                assert_eq!(args.reference, PathBuf::from("ref.png"));
                assert_eq!(args.candidate, PathBuf::from("out.jpg"));
                assert_eq!(args.mode, ModeArg::Lossy);
                assert_eq!(args.tolerance, Some(2.5));
            } else {
                panic!("expected compare command");
            }
        }

        #[test]
        fn test_parse_verify_defaults() {
            let cli = Cli::parse_from([
                "pixload", "verify", "bw.png", "--width", "800", "--height", "600",
            ]);
            if let Commands::Verify(args) = cli.command {
                assert_eq!(args.width, 800);
                assert_eq!(args.height, 600);
                assert_eq!(args.bpp, 3);
                assert_eq!(args.mode, ModeArg::Auto);
                assert_eq!(args.tolerance, None);
            } else {
                panic!("expected verify command");
            }
        }

        #[test]
        fn test_parse_verify_tolerance() {
            let cli = Cli::parse_from([
                "pixload",
                "verify",
                "bw.jpg",
                "--width",
                "8",
                "--height",
                "8",
                "--tolerance",
                "5",
            ]);
            if let Commands::Verify(args) = cli.command {
                assert_eq!(args.tolerance, Some(5.0));
            } else {
                panic!("expected verify command");
            }
        }

        #[test]
        fn test_parse_verify_requires_dimensions() {
            assert!(Cli::try_parse_from(["pixload", "verify", "bw.png"]).is_err());
        }

        #[test]
        fn test_parse_convert_command() {
            let cli = Cli::parse_from(["pixload", "convert", "in.png", "out.bmp"]);
            assert!(matches!(cli.command, Commands::Convert(_)));
        }

        #[test]
        fn test_parse_formats_command() {
            let cli = Cli::parse_from(["pixload", "formats"]);
            assert!(matches!(cli.command, Commands::Formats));
        }

        #[test]
        fn test_global_flags() {
            let cli = Cli::parse_from([
                "pixload",
                "-vv",
                "--no-env",
                "-d",
                "first",
                "--data-path",
                "second",
                "--log-format",
                "json",
                "formats",
            ]);
            assert_eq!(cli.verbose, 2);
            assert!(cli.no_env);
            assert_eq!(
                cli.data_paths,
                vec![PathBuf::from("first"), PathBuf::from("second")]
            );
            assert_eq!(cli.log_format, LogFormatArg::Json);
        }

        #[test]
        fn test_global_quiet_flag_after_subcommand() {
            let cli = Cli::parse_from(["pixload", "formats", "-q"]);
            assert!(cli.quiet);
        }
    }

    mod conversion_tests {
        use super::*;

        #[test]
        fn test_mode_resolution() {
            assert_eq!(ModeArg::Auto.resolve(true), CompareMode::Lossy);
            assert_eq!(ModeArg::Auto.resolve(false), CompareMode::Exact);
            assert_eq!(ModeArg::Exact.resolve(true), CompareMode::Exact);
            assert_eq!(ModeArg::Lossy.resolve(false), CompareMode::Lossy);
        }

        #[test]
        fn test_color_arg_conversion() {
            assert_eq!(ColorChoice::from(ColorArg::Auto), ColorChoice::Auto);
            assert_eq!(ColorChoice::from(ColorArg::Always), ColorChoice::Always);
            assert_eq!(ColorChoice::from(ColorArg::Never), ColorChoice::Never);
        }

        #[test]
        fn test_log_format_conversion() {
            assert_eq!(LogFormat::from(LogFormatArg::Text), LogFormat::Text);
            assert_eq!(LogFormat::from(LogFormatArg::Json), LogFormat::Json);
        }
    }
}
