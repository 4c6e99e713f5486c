//! Pixel buffer comparison.
//!
//! Lossless formats must reproduce the reference byte for byte. Lossy formats
//! are compared on the average of the whole buffer: the absolute difference
//! between the byte sums, divided by the byte count, has to stay under
//! [`PIXEL_TOLERANCE`]. This is deliberately coarse; it catches a wrong or
//! shifted image, not subtle compression artefacts.

/// Allowed average difference per byte for lossy comparison
pub const PIXEL_TOLERANCE: f64 = 1.0;

/// How two pixel buffers are compared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompareMode {
    /// Byte-for-byte equality
    #[default]
    Exact,
    /// Average difference below the tolerance
    Lossy,
}

impl CompareMode {
    /// Pick the mode for a lossy / lossless source
    #[must_use]
    pub const fn for_lossy(lossy: bool) -> Self {
        if lossy {
            Self::Lossy
        } else {
            Self::Exact
        }
    }
}

/// Absolute difference of the byte sums divided by the reference length.
///
/// Only the first `reference.len()` bytes of `candidate` take part. Returns
/// `f64::INFINITY` when the candidate is shorter than the reference and 0
/// for an empty reference.
#[must_use]
pub fn average_delta(reference: &[u8], candidate: &[u8]) -> f64 {
    let total = reference.len();
    if candidate.len() < total {
        return f64::INFINITY;
    }
    if total == 0 {
        return 0.0;
    }

    let sum_ref: u64 = reference.iter().map(|&b| u64::from(b)).sum();
    let sum_test: u64 = candidate[..total].iter().map(|&b| u64::from(b)).sum();

    sum_ref.abs_diff(sum_test) as f64 / total as f64
}

/// Compare `candidate` against `reference` with the default tolerance
#[must_use]
pub fn compare_pixels(mode: CompareMode, reference: &[u8], candidate: &[u8]) -> bool {
    compare_pixels_with_tolerance(mode, reference, candidate, PIXEL_TOLERANCE)
}

/// Compare `candidate` against `reference`; `tolerance` only applies to
/// [`CompareMode::Lossy`]
#[must_use]
pub fn compare_pixels_with_tolerance(
    mode: CompareMode,
    reference: &[u8],
    candidate: &[u8],
    tolerance: f64,
) -> bool {
    if candidate.len() < reference.len() {
        return false;
    }

    match mode {
        CompareMode::Exact => reference == &candidate[..reference.len()],
        CompareMode::Lossy => average_delta(reference, candidate) < tolerance,
    }
}

/// Add `offset` to every byte, wrapping on overflow
pub fn corrupt(bytes: &mut [u8], offset: u8) {
    for b in bytes {
        *b = b.wrapping_add(offset);
    }
}

/// Offset that [`corrupt`] must apply to defeat a lossy comparison at
/// `tolerance`: the next whole value above it, saturating at 255
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn corruption_offset(tolerance: f64) -> u8 {
    // Float-to-int casts saturate; NaN maps to 0
    (tolerance.ceil().clamp(0.0, 255.0) as u8).saturating_add(1)
}
