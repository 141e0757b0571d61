//! Threshold mapping and binarization
//!
//! The viewer's slider runs on a [0, 100] scale; thresholds run on the
//! sample scale [0, 255]. Binarization is a pure function of a buffer and a
//! cutoff, safe to run on a background thread against a snapshot.

use crate::sample::SampleBuffer;

/// Map a [0, 100] slider position to a [0, 255] threshold.
///
/// Truncating integer arithmetic: 50 maps to 127, 100 to 255. Values above
/// 100 are clamped.
pub fn slider_to_threshold(value: u8) -> u8 {
    (u32::from(value.min(100)) * 255 / 100) as u8
}

/// Binarize a sample buffer against a threshold cutoff.
///
/// Every sample strictly above `threshold` becomes 255; all others become 0.
/// The output has the same dimensions as the input.
pub fn binarize(buffer: &SampleBuffer, threshold: u8) -> SampleBuffer {
    let samples = buffer
        .samples()
        .iter()
        .map(|&s| if s > threshold { 255 } else { 0 })
        .collect();

    // Dimensions are carried over unchanged, so this cannot mismatch.
    SampleBuffer::from_raw(buffer.width(), buffer.height(), samples)
        .expect("binarized buffer keeps source dimensions")
}
