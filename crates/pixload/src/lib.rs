//! pixload: raster image loading with reference-pixel verification
//!
//! Loads PNG, JPEG, TIFF and BMP files through the `image` crate into a
//! plain 8-bit [`RasterImage`], resolving relative names against an ordered
//! list of search directories ([`DataRepository`]). Loaded pixels can be
//! checked against a [`ReferenceImage`]: exactly for lossless formats, on the
//! average byte value for lossy ones.
//!
//! # Example
//!
//! ```no_run
//! use pixload::{CompareMode, DataRepository, ImageLoader, ReferenceImage};
//!
//! let repository = DataRepository::from_paths(["tests/resources"]);
//! let loader = ImageLoader::new(repository);
//!
//! let img = loader.load("imagetest_blackwhite.png")?;
//! assert_eq!(img.pixels().len(), 800 * 600 * 3);
//!
//! let reference = ReferenceImage::black_white_split("imagetest_blackwhite.jpg", 800, 600, 3)?;
//! reference.verify(&loader, CompareMode::Lossy)?;
//! # Ok::<(), pixload::PixloadError>(())
//! ```

#![warn(missing_docs)]

pub mod compare;
mod config;
pub mod diagnostics;
pub mod format;
mod loader;
mod pixel;
mod reference;
mod repository;
mod result;

pub use compare::{
    average_delta, compare_pixels, compare_pixels_with_tolerance, CompareMode, PIXEL_TOLERANCE,
};
pub use config::LoaderConfig;
pub use diagnostics::{MessageCounter, MessageCounts};
pub use format::{is_supported_extension, supported_extensions, ImageKind};
pub use loader::{ImageInfo, ImageLoader};
pub use pixel::RasterImage;
pub use reference::{ReferenceImage, VerifyReport};
pub use repository::{DataRepository, SearchPathGuard, DATA_PATH_ENV};
pub use result::{PixloadError, PixloadResult};
