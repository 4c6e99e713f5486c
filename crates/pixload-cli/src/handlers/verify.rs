//! Verify command handler

use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::output::Reporter;
use crate::VerifyArgs;
use pixload::{ImageKind, PixloadError, ReferenceImage, VerifyReport};

/// Execute the verify command against a black/white split reference
pub fn execute_verify(config: &CliConfig, reporter: &Reporter, args: &VerifyArgs) -> CliResult<()> {
    let filename = args.file.to_string_lossy().into_owned();
    let lossy = ImageKind::from_path(&args.file).is_some_and(ImageKind::is_lossy);
    let mode = args.mode.resolve(lossy);
    let tolerance = args.tolerance.unwrap_or(config.loader.tolerance);
    if !tolerance.is_finite() || tolerance <= 0.0 {
        return Err(CliError::invalid_argument(format!(
            "tolerance must be a positive number, got {tolerance}"
        )));
    }

    let reference = ReferenceImage::black_white_split(&filename, args.width, args.height, args.bpp)?;
    match reference.verify_with_tolerance(&config.build_loader(), mode, tolerance) {
        Ok(report) => {
            reporter.success(&format!(
                "{filename}: {:?} match, average delta {:.3} (corrupted copy: {:.3})",
                report.mode, report.average_delta, report.corrupted_delta
            ));
            if config.verbosity.is_verbose() {
                print_report(reporter, &report);
            }
            Ok(())
        }
        Err(
            e @ (PixloadError::Mismatch { .. }
            | PixloadError::PixelMismatch { .. }
            | PixloadError::CorruptionUndetected { .. }),
        ) => {
            reporter.failure(&format!("{filename}: {e}"));
            Err(CliError::mismatch(e.to_string()))
        }
        Err(e) => Err(e.into()),
    }
}

fn print_report(reporter: &Reporter, report: &VerifyReport) {
    for (key, value) in report_rows(report) {
        reporter.field(key, value);
    }
}

/// Per-step values of a successful verification
#[must_use]
pub fn report_rows(report: &VerifyReport) -> Vec<(&'static str, String)> {
    vec![
        ("mode", format!("{:?}", report.mode)),
        ("tolerance", report.tolerance.to_string()),
        ("average delta", format!("{:.3}", report.average_delta)),
        ("corruption", format!("+{}", report.corruption_offset)),
        ("corrupted delta", format!("{:.3}", report.corrupted_delta)),
    ]
}
