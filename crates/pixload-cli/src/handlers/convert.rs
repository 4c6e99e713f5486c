//! Convert command handler

use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::output::Reporter;
use crate::ConvertArgs;
use pixload::ImageKind;

/// Execute the convert command
pub fn execute_convert(config: &CliConfig, reporter: &Reporter, args: &ConvertArgs) -> CliResult<()> {
    let kind = ImageKind::from_path(&args.output)
        .filter(|kind| kind.is_enabled())
        .ok_or_else(|| {
            CliError::invalid_argument(format!(
                "cannot encode {}: unknown or disabled extension",
                args.output.display()
            ))
        })?;

    let img = config.build_loader().load(&args.input)?;
    img.save(&args.output)?;

    reporter.success(&format!(
        "wrote {} ({kind}, {}x{}, {} bytes/pixel)",
        args.output.display(),
        img.width(),
        img.height(),
        img.bytes_per_pixel()
    ));
    Ok(())
}
