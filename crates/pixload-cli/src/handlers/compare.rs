//! Compare command handler

use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::output::Reporter;
use crate::CompareArgs;
use pixload::{average_delta, compare_pixels_with_tolerance, CompareMode, ImageInfo};

/// Execute the compare command
pub fn execute_compare(
    config: &CliConfig,
    reporter: &Reporter,
    args: &CompareArgs,
) -> CliResult<()> {
    let loader = config.build_loader();
    let (reference, ref_info) = loader.inspect(&args.reference)?;
    let (candidate, cand_info) = loader.inspect(&args.candidate)?;

    check_same_layout(&ref_info, &cand_info)?;

    let lossy_source = [ref_info.kind, cand_info.kind]
        .into_iter()
        .flatten()
        .any(|kind| kind.is_lossy());
    let mode = args.mode.resolve(lossy_source);
    let tolerance = args.tolerance.unwrap_or(config.loader.tolerance);
    if !tolerance.is_finite() || tolerance <= 0.0 {
        return Err(CliError::invalid_argument(format!(
            "tolerance must be a positive number, got {tolerance}"
        )));
    }

    let delta = average_delta(reference.pixels(), candidate.pixels());
    let summary = format_summary(mode, delta, tolerance);

    if compare_pixels_with_tolerance(mode, reference.pixels(), candidate.pixels(), tolerance) {
        reporter.success(&format!("images match ({summary})"));
        Ok(())
    } else {
        reporter.failure(&format!("images differ ({summary})"));
        Err(CliError::mismatch(format!(
            "{} vs {}",
            args.reference.display(),
            args.candidate.display()
        )))
    }
}

/// Dimensions and bytes per pixel must agree before pixels are compared
pub fn check_same_layout(reference: &ImageInfo, candidate: &ImageInfo) -> CliResult<()> {
    if (reference.width, reference.height) != (candidate.width, candidate.height) {
        return Err(CliError::mismatch(format!(
            "dimensions {}x{} vs {}x{}",
            reference.width, reference.height, candidate.width, candidate.height
        )));
    }
    if reference.bytes_per_pixel != candidate.bytes_per_pixel {
        return Err(CliError::mismatch(format!(
            "bytes per pixel {} vs {}",
            reference.bytes_per_pixel, candidate.bytes_per_pixel
        )));
    }
    Ok(())
}

fn format_summary(mode: CompareMode, delta: f64, tolerance: f64) -> String {
    match mode {
        CompareMode::Exact => format!("exact, average delta {delta:.3}"),
        CompareMode::Lossy => format!("lossy, average delta {delta:.3} < {tolerance}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn info(width: u32, height: u32, bpp: u8) -> ImageInfo {
        ImageInfo {
            path: PathBuf::from("x.png"),
            kind: None,
            width,
            height,
            bytes_per_pixel: bpp,
            pixel_count: u64::from(width) * u64::from(height),
        }
    }

    #[test]
    fn test_same_layout_ok() {
        assert!(check_same_layout(&info(8, 6, 3), &info(8, 6, 3)).is_ok());
    }

    #[test]
    fn test_different_dimensions() {
        let err = check_same_layout(&info(8, 6, 3), &info(6, 8, 3)).unwrap_err();
        assert!(err.to_string().contains("8x6 vs 6x8"));
    }

    #[test]
    fn test_different_bpp() {
        let err = check_same_layout(&info(8, 6, 3), &info(8, 6, 4)).unwrap_err();
        assert!(err.to_string().contains("bytes per pixel 3 vs 4"));
    }

    #[test]
    fn test_format_summary() {
        assert_eq!(
            format_summary(CompareMode::Exact, 0.0, 1.0),
            "exact, average delta 0.000"
        );
        assert_eq!(
            format_summary(CompareMode::Lossy, 0.25, 1.0),
            "lossy, average delta 0.250 < 1"
        );
    }
}
