//! Info command handler

use crate::config::CliConfig;
use crate::error::CliResult;
use crate::output::Reporter;
use crate::{InfoArgs, OutputFormatArg};
use pixload::ImageInfo;

/// Execute the info command
pub fn execute_info(config: &CliConfig, reporter: &Reporter, args: &InfoArgs) -> CliResult<()> {
    let loader = config.build_loader();
    let (_, info) = loader.inspect(&args.file)?;

    match args.format {
        OutputFormatArg::Json => reporter.raw(&render_info_json(&info)?),
        OutputFormatArg::Text => print_info(reporter, &info),
    }
    Ok(())
}

/// Render image info as pretty JSON
pub fn render_info_json(info: &ImageInfo) -> CliResult<String> {
    Ok(serde_json::to_string_pretty(info)?)
}

fn print_info(reporter: &Reporter, info: &ImageInfo) {
    reporter.header(&info.path.display().to_string());
    reporter.field(
        "format",
        info.kind.map_or_else(|| "unknown".to_string(), |k| k.to_string()),
    );
    reporter.field("width", info.width);
    reporter.field("height", info.height);
    reporter.field("bytes/pixel", info.bytes_per_pixel);
    reporter.field("pixels", info.pixel_count);
}
