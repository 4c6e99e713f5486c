//! In-memory 8-bit pixel buffer.

use crate::format::ImageKind;
use crate::result::{PixloadError, PixloadResult};
use image::{DynamicImage, ExtendedColorType};
use std::fmt;
use std::path::Path;

/// A decoded image: interleaved 8-bit channels, row-major, no padding.
///
/// `pixels().len()` always equals `width * height * bytes_per_pixel`.
#[derive(Clone, PartialEq, Eq)]
pub struct RasterImage {
    width: u32,
    height: u32,
    bytes_per_pixel: u8,
    data: Vec<u8>,
}

impl fmt::Debug for RasterImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RasterImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes_per_pixel", &self.bytes_per_pixel)
            .field("len", &self.data.len())
            .finish()
    }
}

impl RasterImage {
    /// Wrap raw pixel bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if `bytes_per_pixel` is not 1..=4, if the dimensions
    /// overflow the address space, or if the buffer length does not match
    /// them.
    pub fn from_raw(
        width: u32,
        height: u32,
        bytes_per_pixel: u8,
        data: Vec<u8>,
    ) -> PixloadResult<Self> {
        if !(1..=4).contains(&bytes_per_pixel) {
            return Err(PixloadError::UnsupportedLayout { bytes_per_pixel });
        }
        let expected = buffer_len(width, height, bytes_per_pixel)?;
        if data.len() != expected {
            return Err(PixloadError::InvalidBuffer {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            bytes_per_pixel,
            data,
        })
    }

    /// Convert a decoded image, narrowing wider samples to 8 bits while
    /// keeping the channel count
    pub(crate) fn from_dynamic(img: DynamicImage) -> Self {
        let (width, height) = (img.width(), img.height());
        let (bytes_per_pixel, data) = match img {
            DynamicImage::ImageLuma8(buf) => (1, buf.into_raw()),
            DynamicImage::ImageLumaA8(buf) => (2, buf.into_raw()),
            DynamicImage::ImageRgb8(buf) => (3, buf.into_raw()),
            DynamicImage::ImageRgba8(buf) => (4, buf.into_raw()),
            other => match other.color().channel_count() {
                1 => (1, other.into_luma8().into_raw()),
                2 => (2, other.into_luma_alpha8().into_raw()),
                3 => (3, other.into_rgb8().into_raw()),
                _ => (4, other.into_rgba8().into_raw()),
            },
        };
        Self {
            width,
            height,
            bytes_per_pixel,
            data,
        }
    }

    /// Image width in pixels
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Number of pixels (width × height)
    #[must_use]
    pub const fn pixel_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Bytes per pixel: 1 gray, 2 gray+alpha, 3 RGB, 4 RGBA
    #[must_use]
    pub const fn bytes_per_pixel(&self) -> u8 {
        self.bytes_per_pixel
    }

    /// Raw pixel bytes
    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        &self.data
    }

    /// Mutable raw pixel bytes. The length cannot change through this slice.
    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Channels of the pixel at (`x`, `y`), or `None` when out of bounds
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<&[u8]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let bpp = self.bytes_per_pixel as usize;
        let start = (y as usize * self.width as usize + x as usize) * bpp;
        self.data.get(start..start + bpp)
    }

    /// Consume the image and return its bytes
    #[must_use]
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Encode to `path`; the format follows the file extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the extension is unknown or disabled in this
    /// build, or if the encoder rejects the buffer (JPEG has no alpha).
    pub fn save(&self, path: impl AsRef<Path>) -> PixloadResult<()> {
        let path = path.as_ref();
        let kind = ImageKind::from_path(path)
            .filter(|kind| kind.is_enabled())
            .ok_or_else(|| PixloadError::UnsupportedFormat {
                format: path
                    .extension()
                    .map(|ext| ext.to_string_lossy().into_owned())
                    .unwrap_or_default(),
            })?;

        image::save_buffer_with_format(
            path,
            &self.data,
            self.width,
            self.height,
            self.color_type(),
            kind.to_image_format(),
        )
        .map_err(|e| PixloadError::Encode {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        tracing::debug!(path = %path.display(), %kind, "saved image");
        Ok(())
    }

    fn color_type(&self) -> ExtendedColorType {
        match self.bytes_per_pixel {
            1 => ExtendedColorType::L8,
            2 => ExtendedColorType::La8,
            3 => ExtendedColorType::Rgb8,
            _ => ExtendedColorType::Rgba8,
        }
    }
}

/// Byte length of a `width` × `height` buffer, or an error when it cannot be
/// allocated as a single slice
pub(crate) fn buffer_len(width: u32, height: u32, bytes_per_pixel: u8) -> PixloadResult<usize> {
    u64::from(width)
        .checked_mul(u64::from(height))
        .and_then(|n| n.checked_mul(u64::from(bytes_per_pixel)))
        .and_then(|n| usize::try_from(n).ok())
        .filter(|&n| isize::try_from(n).is_ok())
        .ok_or(PixloadError::BufferTooLarge {
            width,
            height,
            bytes_per_pixel,
        })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Luma, Rgb, Rgba};

    #[test]
    fn test_from_raw_valid() {
        let img = RasterImage::from_raw(2, 3, 3, vec![7; 18]).unwrap();
        assert_eq!(img.width(), 2);
        assert_eq!(img.height(), 3);
        assert_eq!(img.pixel_count(), 6);
        assert_eq!(img.bytes_per_pixel(), 3);
        assert_eq!(img.pixels().len(), 18);
    }

    #[test]
    fn test_from_raw_wrong_length() {
        let err = RasterImage::from_raw(2, 2, 3, vec![0; 11]).unwrap_err();
        assert!(matches!(
            err,
            PixloadError::InvalidBuffer {
                expected: 12,
                actual: 11
            }
        ));
    }

    #[test]
    fn test_from_raw_bad_bpp() {
        for bpp in [0u8, 5, 8] {
            let err = RasterImage::from_raw(1, 1, bpp, vec![0; bpp as usize]).unwrap_err();
            assert!(matches!(err, PixloadError::UnsupportedLayout { .. }));
        }
    }

    #[test]
    fn test_from_raw_rejects_overflowing_dimensions() {
        let err = RasterImage::from_raw(1 << 31, 1 << 31, 4, Vec::new()).unwrap_err();
        assert!(matches!(
            err,
            PixloadError::BufferTooLarge {
                width: 2_147_483_648,
                height: 2_147_483_648,
                bytes_per_pixel: 4
            }
        ));

        let err = RasterImage::from_raw(u32::MAX, u32::MAX, 4, Vec::new()).unwrap_err();
        assert!(matches!(err, PixloadError::BufferTooLarge { .. }));
    }

    #[test]
    fn test_buffer_len() {
        assert_eq!(buffer_len(800, 600, 3).unwrap(), 1_440_000);
        assert_eq!(buffer_len(0, 600, 3).unwrap(), 0);
        assert!(buffer_len(1 << 31, 1 << 31, 4).is_err());
    }

    #[test]
    fn test_pixel_access() {
        let data: Vec<u8> = (0..12).collect();
        let img = RasterImage::from_raw(2, 2, 3, data).unwrap();
        assert_eq!(img.pixel(0, 0), Some(&[0u8, 1, 2][..]));
        assert_eq!(img.pixel(1, 0), Some(&[3u8, 4, 5][..]));
        assert_eq!(img.pixel(0, 1), Some(&[6u8, 7, 8][..]));
        assert_eq!(img.pixel(1, 1), Some(&[9u8, 10, 11][..]));
        assert_eq!(img.pixel(2, 0), None);
        assert_eq!(img.pixel(0, 2), None);
    }

    #[test]
    fn test_pixels_mut_edits_in_place() {
        let mut img = RasterImage::from_raw(1, 1, 1, vec![5]).unwrap();
        img.pixels_mut()[0] = 9;
        assert_eq!(img.into_raw(), vec![9]);
    }

    #[test]
    fn test_from_dynamic_keeps_channel_count() {
        let gray = ImageBuffer::from_pixel(3, 2, Luma([40u8]));
        let img = RasterImage::from_dynamic(DynamicImage::ImageLuma8(gray));
        assert_eq!(img.bytes_per_pixel(), 1);
        assert_eq!(img.pixels(), &[40u8; 6]);

        let rgba = ImageBuffer::from_pixel(1, 1, Rgba([1u8, 2, 3, 4]));
        let img = RasterImage::from_dynamic(DynamicImage::ImageRgba8(rgba));
        assert_eq!(img.bytes_per_pixel(), 4);
        assert_eq!(img.pixels(), &[1u8, 2, 3, 4]);
    }

    #[test]
    fn test_from_dynamic_narrows_16_bit() {
        let wide = ImageBuffer::from_pixel(2, 1, Rgb([65535u16, 0, 32896]));
        let img = RasterImage::from_dynamic(DynamicImage::ImageRgb16(wide));
        assert_eq!(img.bytes_per_pixel(), 3);
        assert_eq!(img.pixels(), &[255u8, 0, 128, 255, 0, 128]);
    }

    #[test]
    fn test_debug_hides_bytes() {
        let img = RasterImage::from_raw(1, 1, 1, vec![0]).unwrap();
        let dbg = format!("{img:?}");
        assert!(dbg.contains("len: 1"));
        assert!(!dbg.contains("data"));
    }

    #[test]
    fn test_save_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let img = RasterImage::from_raw(1, 1, 3, vec![0, 0, 0]).unwrap();
        let err = img.save(dir.path().join("out.gif")).unwrap_err();
        assert!(matches!(err, PixloadError::UnsupportedFormat { format } if format == "gif"));
    }

    #[cfg(feature = "png")]
    #[test]
    fn test_save_png_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        let img = RasterImage::from_raw(4, 4, 4, vec![200; 64]).unwrap();
        img.save(&path).unwrap();
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }
}
