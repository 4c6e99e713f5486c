//! Formats command handler

use crate::output::Reporter;
use pixload::ImageKind;

/// Execute the formats command
pub fn execute_formats(reporter: &Reporter) {
    for row in format_rows() {
        reporter.raw(&row);
    }
}

/// One line per enabled format: name, extensions, lossy marker
#[must_use]
pub fn format_rows() -> Vec<String> {
    ImageKind::ALL
        .into_iter()
        .filter(|kind| kind.is_enabled())
        .map(|kind| {
            let marker = if kind.is_lossy() { " (lossy)" } else { "" };
            format!("{:<5} {}{marker}", kind.to_string(), kind.extensions().join(", "))
        })
        .collect()
}
