//! Reference fixtures: expected dimensions and pixels for a known file.

use crate::compare::{self, CompareMode, PIXEL_TOLERANCE};
use crate::loader::ImageLoader;
use crate::pixel::buffer_len;
use crate::result::{PixloadError, PixloadResult};

/// Expected content of an image file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceImage {
    /// File name, resolved through the loader's repository
    pub filename: String,
    /// Expected width
    pub width: u32,
    /// Expected height
    pub height: u32,
    /// Expected bytes per pixel
    pub bytes_per_pixel: u8,
    /// Expected pixel bytes
    pub data: Vec<u8>,
}

/// Outcome of a successful [`ReferenceImage::verify`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerifyReport {
    /// Mode the pixels were compared with
    pub mode: CompareMode,
    /// Lossy tolerance in effect
    pub tolerance: f64,
    /// Average delta between reference and loaded bytes
    pub average_delta: f64,
    /// Value added to every byte of the corrupted copy
    pub corruption_offset: u8,
    /// Average delta after corrupting the loaded bytes
    pub corrupted_delta: f64,
}

impl ReferenceImage {
    /// Create a reference from explicit data.
    ///
    /// # Errors
    ///
    /// Returns an error if `data` does not hold width × height × bpp bytes or
    /// if that size overflows.
    pub fn new(
        filename: impl Into<String>,
        width: u32,
        height: u32,
        bytes_per_pixel: u8,
        data: Vec<u8>,
    ) -> PixloadResult<Self> {
        let expected = buffer_len(width, height, bytes_per_pixel)?;
        if data.len() != expected {
            return Err(PixloadError::InvalidBuffer {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            filename: filename.into(),
            width,
            height,
            bytes_per_pixel,
            data,
        })
    }

    /// Top half black (0), bottom half white (255)
    ///
    /// # Errors
    ///
    /// Returns [`PixloadError::BufferTooLarge`] if the buffer cannot be
    /// sized or allocated.
    pub fn black_white_split(
        filename: impl Into<String>,
        width: u32,
        height: u32,
        bytes_per_pixel: u8,
    ) -> PixloadResult<Self> {
        let too_large = PixloadError::BufferTooLarge {
            width,
            height,
            bytes_per_pixel,
        };
        let total = buffer_len(width, height, bytes_per_pixel)?;
        let black = buffer_len(width, height / 2, bytes_per_pixel)?;

        let mut data = Vec::new();
        data.try_reserve_exact(total).map_err(|_| too_large)?;
        data.resize(black, 0);
        data.resize(total, 255);
        Ok(Self {
            filename: filename.into(),
            width,
            height,
            bytes_per_pixel,
            data,
        })
    }

    /// Same expected content under another file name
    #[must_use]
    pub fn with_filename(&self, filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            ..self.clone()
        }
    }

    /// Number of expected pixels
    #[must_use]
    pub const fn pixel_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Compare `candidate` with the expected bytes
    #[must_use]
    pub fn compare(&self, mode: CompareMode, candidate: &[u8]) -> bool {
        compare::compare_pixels(mode, &self.data, candidate)
    }

    /// Load the file and check it against this reference with the default
    /// [`PIXEL_TOLERANCE`].
    ///
    /// Dimensions and bpp must match exactly, pixels must compare equal under
    /// `mode`, and a corrupted copy of the loaded pixels must compare unequal.
    pub fn verify(&self, loader: &ImageLoader, mode: CompareMode) -> PixloadResult<VerifyReport> {
        self.verify_with_tolerance(loader, mode, PIXEL_TOLERANCE)
    }

    /// [`Self::verify`] with an explicit lossy tolerance. The corruption
    /// offset grows with the tolerance so the corrupted copy stays outside it.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `tolerance` is not a positive finite
    /// number, otherwise the first failed check.
    pub fn verify_with_tolerance(
        &self,
        loader: &ImageLoader,
        mode: CompareMode,
        tolerance: f64,
    ) -> PixloadResult<VerifyReport> {
        if !tolerance.is_finite() || tolerance <= 0.0 {
            return Err(PixloadError::config(format!(
                "tolerance must be a positive number, got {tolerance}"
            )));
        }
        let mut img = loader.load(&self.filename)?;

        check("width", self.width.into(), img.width().into())?;
        check("height", self.height.into(), img.height().into())?;
        check("pixel count", self.pixel_count(), img.pixel_count())?;
        check(
            "bytes per pixel",
            self.bytes_per_pixel.into(),
            img.bytes_per_pixel().into(),
        )?;

        let average_delta = compare::average_delta(&self.data, img.pixels());
        if !self.compare_with_tolerance(mode, img.pixels(), tolerance) {
            return Err(PixloadError::PixelMismatch {
                name: self.filename.clone(),
                average_delta,
            });
        }

        let offset = compare::corruption_offset(tolerance);
        compare::corrupt(img.pixels_mut(), offset);
        let corrupted_delta = compare::average_delta(&self.data, img.pixels());
        if self.compare_with_tolerance(mode, img.pixels(), tolerance) {
            return Err(PixloadError::CorruptionUndetected {
                name: self.filename.clone(),
            });
        }

        tracing::info!(
            file = %self.filename,
            ?mode,
            average_delta,
            corrupted_delta,
            tolerance,
            offset,
            "reference verified"
        );
        Ok(VerifyReport {
            mode,
            tolerance,
            average_delta,
            corruption_offset: offset,
            corrupted_delta,
        })
    }

    fn compare_with_tolerance(&self, mode: CompareMode, candidate: &[u8], tolerance: f64) -> bool {
        compare::compare_pixels_with_tolerance(mode, &self.data, candidate, tolerance)
    }
}

fn check(field: &'static str, expected: u64, actual: u64) -> PixloadResult<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(PixloadError::Mismatch {
            field,
            expected,
            actual,
        })
    }
}
