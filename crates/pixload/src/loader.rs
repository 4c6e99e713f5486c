//! The image adapter: resolve a file name, decode it, hand back pixels.

use crate::format::ImageKind;
use crate::pixel::RasterImage;
use crate::repository::DataRepository;
use crate::result::{PixloadError, PixloadResult};
use image::{ImageError, ImageReader};
use serde::Serialize;
use std::io::Cursor;
use std::path::{Path, PathBuf};

/// Summary of a loaded image
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageInfo {
    /// Resolved path
    pub path: PathBuf,
    /// Detected format, if it is one of the known kinds
    pub kind: Option<ImageKind>,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Bytes per pixel
    pub bytes_per_pixel: u8,
    /// Width × height
    pub pixel_count: u64,
}

/// Loads raster files found through a [`DataRepository`].
///
/// A failed load never yields a partial image: the caller gets either a
/// complete [`RasterImage`] or an error.
#[derive(Debug, Clone)]
pub struct ImageLoader {
    repository: DataRepository,
}

impl Default for ImageLoader {
    fn default() -> Self {
        Self::new(DataRepository::global().clone())
    }
}

impl ImageLoader {
    /// Create a loader resolving names through `repository`
    #[must_use]
    pub const fn new(repository: DataRepository) -> Self {
        Self { repository }
    }

    /// Repository used for name resolution
    #[must_use]
    pub const fn repository(&self) -> &DataRepository {
        &self.repository
    }

    /// Resolve `name` to an existing file. Reports an error diagnostic when
    /// nothing is found.
    pub fn resolve(&self, name: impl AsRef<Path>) -> PixloadResult<PathBuf> {
        let name = name.as_ref();
        if let Some(path) = self.repository.find_file(name) {
            tracing::debug!(name = %name.display(), path = %path.display(), "resolved image file");
            return Ok(path);
        }

        let searched = self.repository.paths();
        tracing::error!(
            name = %name.display(),
            searched = ?searched,
            "image file not found"
        );
        Err(PixloadError::NotFound {
            name: name.display().to_string(),
            searched: searched.len(),
        })
    }

    /// Load `name` (an absolute path, a path relative to the working
    /// directory, or a name inside one of the search directories).
    ///
    /// A missing file is reported at ERROR level. Undecodable content is only
    /// logged at WARN level.
    pub fn load(&self, name: impl AsRef<Path>) -> PixloadResult<RasterImage> {
        let path = self.resolve(name)?;
        Self::load_resolved(&path).map(|(img, _)| img)
    }

    /// Load `name` and describe it
    pub fn inspect(&self, name: impl AsRef<Path>) -> PixloadResult<(RasterImage, ImageInfo)> {
        let path = self.resolve(name)?;
        let (img, kind) = Self::load_resolved(&path)?;
        let info = ImageInfo {
            path,
            kind,
            width: img.width(),
            height: img.height(),
            bytes_per_pixel: img.bytes_per_pixel(),
            pixel_count: img.pixel_count(),
        };
        Ok((img, info))
    }

    /// Decode an in-memory encoded image; the format is sniffed from the
    /// content
    pub fn load_from_memory(bytes: &[u8]) -> PixloadResult<RasterImage> {
        let reader = ImageReader::new(Cursor::new(bytes)).with_guessed_format()?;
        let img = reader.decode().map_err(|e| {
            tracing::warn!(error = %e, "failed to decode in-memory image");
            decode_error(Path::new("<memory>"), e)
        })?;
        Ok(RasterImage::from_dynamic(img))
    }

    fn load_resolved(path: &Path) -> PixloadResult<(RasterImage, Option<ImageKind>)> {
        // Content magic takes precedence over the extension
        let reader = ImageReader::open(path)?.with_guessed_format()?;
        let kind = reader
            .format()
            .and_then(ImageKind::from_image_format)
            .or_else(|| ImageKind::from_path(path));

        let img = reader.decode().map_err(|e| {
            tracing::warn!(path = %path.display(), error = %e, "failed to decode image");
            decode_error(path, e)
        })?;

        let img = RasterImage::from_dynamic(img);
        tracing::debug!(
            path = %path.display(),
            width = img.width(),
            height = img.height(),
            bytes_per_pixel = img.bytes_per_pixel(),
            "loaded image"
        );
        Ok((img, kind))
    }
}

fn decode_error(path: &Path, err: ImageError) -> PixloadError {
    match err {
        ImageError::Unsupported(e) => PixloadError::UnsupportedFormat {
            format: e.to_string(),
        },
        ImageError::IoError(e) => PixloadError::Io(e),
        other => PixloadError::Decode {
            path: path.to_path_buf(),
            message: other.to_string(),
        },
    }
}
