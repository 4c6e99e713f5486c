//! Result and error types for pixload.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for pixload operations
pub type PixloadResult<T> = Result<T, PixloadError>;

/// Errors that can occur while loading, saving or verifying images
#[derive(Debug, Error)]
pub enum PixloadError {
    /// No file with this name exists in any search directory
    #[error("File not found: {name} (search directories: {searched})")]
    NotFound {
        /// Requested file name
        name: String,
        /// Number of search directories tried
        searched: usize,
    },

    /// The file exists but could not be decoded as an image
    #[error("Failed to decode {}: {message}", .path.display())]
    Decode {
        /// Resolved path
        path: PathBuf,
        /// Decoder message
        message: String,
    },

    /// The decoder does not know this format (or its feature is disabled)
    #[error("Unsupported image format: {format}")]
    UnsupportedFormat {
        /// Format hint (extension or decoder description)
        format: String,
    },

    /// Encoding a buffer to disk failed
    #[error("Failed to encode {}: {message}", .path.display())]
    Encode {
        /// Destination path
        path: PathBuf,
        /// Encoder message
        message: String,
    },

    /// Pixel buffer length does not match width × height × bpp
    #[error("Invalid pixel buffer: expected {expected} bytes, got {actual}")]
    InvalidBuffer {
        /// Expected length
        expected: usize,
        /// Actual length
        actual: usize,
    },

    /// Width × height × bpp does not fit in an addressable buffer
    #[error("Pixel buffer too large: {width}x{height} at {bytes_per_pixel} bytes per pixel")]
    BufferTooLarge {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// Requested bytes per pixel
        bytes_per_pixel: u8,
    },

    /// Bytes-per-pixel value outside 1..=4
    #[error("Unsupported pixel layout: {bytes_per_pixel} bytes per pixel")]
    UnsupportedLayout {
        /// Offending value
        bytes_per_pixel: u8,
    },

    /// A loaded image property differs from the reference
    #[error("{field} mismatch: expected {expected}, got {actual}")]
    Mismatch {
        /// Property name (width, height, ...)
        field: &'static str,
        /// Reference value
        expected: u64,
        /// Loaded value
        actual: u64,
    },

    /// Pixel content differs from the reference
    #[error("Pixel mismatch in {name}: average delta {average_delta:.3}")]
    PixelMismatch {
        /// Fixture name
        name: String,
        /// Measured average delta
        average_delta: f64,
    },

    /// A deliberately corrupted buffer still compared equal
    #[error("Corrupted copy of {name} still matches the reference")]
    CorruptionUndetected {
        /// Fixture name
        name: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

impl PixloadError {
    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Whether the error means the file was never found
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = PixloadError::NotFound {
            name: "missing.png".to_string(),
            searched: 2,
        };
        let msg = err.to_string();
        assert!(msg.contains("missing.png"));
        assert!(msg.contains("search directories: 2"));
        assert!(err.is_not_found());
    }

    #[test]
    fn test_mismatch_message() {
        let err = PixloadError::Mismatch {
            field: "width",
            expected: 800,
            actual: 640,
        };
        assert_eq!(err.to_string(), "width mismatch: expected 800, got 640");
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_buffer_too_large_message() {
        let err = PixloadError::BufferTooLarge {
            width: 1 << 31,
            height: 1 << 31,
            bytes_per_pixel: 4,
        };
        assert_eq!(
            err.to_string(),
            "Pixel buffer too large: 2147483648x2147483648 at 4 bytes per pixel"
        );
    }

    #[test]
    fn test_io_error_from() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: PixloadError = io_err.into();
        assert!(err.to_string().contains("I/O"));
    }

    #[test]
    fn test_config_error() {
        let err = PixloadError::config("bad tolerance");
        assert!(err.to_string().contains("Configuration"));
        assert!(err.to_string().contains("bad tolerance"));
    }
}
