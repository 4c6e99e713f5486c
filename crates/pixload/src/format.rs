//! Supported raster formats and their extensions.
//!
//! Which formats are decodable depends on the crate features this build was
//! compiled with (`png`, `jpeg`, `tiff`, `bmp`).

use crate::compare::CompareMode;
use serde::Serialize;
use std::fmt;
use std::path::Path;

/// A raster format the loader knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageKind {
    /// Portable Network Graphics
    Png,
    /// JPEG (lossy)
    Jpeg,
    /// Tagged Image File Format
    Tiff,
    /// Windows bitmap
    Bmp,
}

impl ImageKind {
    /// All kinds, in display order
    pub const ALL: [Self; 4] = [Self::Png, Self::Jpeg, Self::Tiff, Self::Bmp];

    /// Look up a kind from a file extension (case-insensitive, no leading dot)
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.extensions().contains(&ext.as_str()))
    }

    /// Look up a kind from a path's extension
    #[must_use]
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// Extensions mapped to this kind; the first one is canonical
    #[must_use]
    pub const fn extensions(self) -> &'static [&'static str] {
        match self {
            Self::Png => &["png"],
            Self::Jpeg => &["jpg", "jpeg"],
            Self::Tiff => &["tiff", "tif"],
            Self::Bmp => &["bmp"],
        }
    }

    /// Whether decoded pixels may differ from what was encoded
    #[must_use]
    pub const fn is_lossy(self) -> bool {
        matches!(self, Self::Jpeg)
    }

    /// Comparison mode to use against a reference for this kind
    #[must_use]
    pub const fn compare_mode(self) -> CompareMode {
        if self.is_lossy() {
            CompareMode::Lossy
        } else {
            CompareMode::Exact
        }
    }

    /// Whether this build can decode the kind
    #[must_use]
    pub const fn is_enabled(self) -> bool {
        match self {
            Self::Png => cfg!(feature = "png"),
            Self::Jpeg => cfg!(feature = "jpeg"),
            Self::Tiff => cfg!(feature = "tiff"),
            Self::Bmp => cfg!(feature = "bmp"),
        }
    }

    pub(crate) const fn to_image_format(self) -> image::ImageFormat {
        match self {
            Self::Png => image::ImageFormat::Png,
            Self::Jpeg => image::ImageFormat::Jpeg,
            Self::Tiff => image::ImageFormat::Tiff,
            Self::Bmp => image::ImageFormat::Bmp,
        }
    }

    pub(crate) fn from_image_format(format: image::ImageFormat) -> Option<Self> {
        match format {
            image::ImageFormat::Png => Some(Self::Png),
            image::ImageFormat::Jpeg => Some(Self::Jpeg),
            image::ImageFormat::Tiff => Some(Self::Tiff),
            image::ImageFormat::Bmp => Some(Self::Bmp),
            _ => None,
        }
    }
}

impl fmt::Display for ImageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Png => "PNG",
            Self::Jpeg => "JPEG",
            Self::Tiff => "TIFF",
            Self::Bmp => "BMP",
        };
        f.write_str(name)
    }
}

/// Every extension this build can decode
#[must_use]
pub fn supported_extensions() -> Vec<&'static str> {
    ImageKind::ALL
        .into_iter()
        .filter(|kind| kind.is_enabled())
        .flat_map(|kind| kind.extensions().iter().copied())
        .collect()
}

/// Whether files with this extension can be decoded by this build
#[must_use]
pub fn is_supported_extension(ext: &str) -> bool {
    ImageKind::from_extension(ext).is_some_and(ImageKind::is_enabled)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_extension_aliases() {
        assert_eq!(ImageKind::from_extension("png"), Some(ImageKind::Png));
        assert_eq!(ImageKind::from_extension("JPG"), Some(ImageKind::Jpeg));
        assert_eq!(ImageKind::from_extension("jpeg"), Some(ImageKind::Jpeg));
        assert_eq!(ImageKind::from_extension("tif"), Some(ImageKind::Tiff));
        assert_eq!(ImageKind::from_extension("Tiff"), Some(ImageKind::Tiff));
        assert_eq!(ImageKind::from_extension("bmp"), Some(ImageKind::Bmp));
        assert_eq!(ImageKind::from_extension("gif"), None);
        assert_eq!(ImageKind::from_extension(""), None);
    }

    #[test]
    fn test_from_path() {
        assert_eq!(
            ImageKind::from_path("fixtures/imagetest_blackwhite.jpg"),
            Some(ImageKind::Jpeg)
        );
        assert_eq!(ImageKind::from_path("no_extension"), None);
    }

    #[test]
    fn test_only_jpeg_is_lossy() {
        for kind in ImageKind::ALL {
            assert_eq!(kind.is_lossy(), kind == ImageKind::Jpeg, "{kind}");
        }
        assert_eq!(ImageKind::Jpeg.compare_mode(), CompareMode::Lossy);
        assert_eq!(ImageKind::Bmp.compare_mode(), CompareMode::Exact);
    }

    #[test]
    fn test_image_format_mapping() {
        for kind in ImageKind::ALL {
            assert_eq!(
                ImageKind::from_image_format(kind.to_image_format()),
                Some(kind)
            );
        }
        assert_eq!(ImageKind::from_image_format(image::ImageFormat::Gif), None);
    }

    #[test]
    fn test_supported_extensions_follow_features() {
        let supported = supported_extensions();
        assert_eq!(supported.contains(&"png"), cfg!(feature = "png"));
        assert_eq!(supported.contains(&"jpg"), cfg!(feature = "jpeg"));
        assert_eq!(supported.contains(&"tiff"), cfg!(feature = "tiff"));
        assert_eq!(supported.contains(&"bmp"), cfg!(feature = "bmp"));
        assert!(!is_supported_extension("gif"));
    }
}
