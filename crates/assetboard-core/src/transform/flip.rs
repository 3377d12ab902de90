//! Mirror an image along one axis.
//!
//! A horizontal flip is the canvas draw `scale(-1, 1)` followed by
//! `drawImage(img, -width, 0)`; a vertical flip is `scale(1, -1)` with
//! `drawImage(img, 0, -height)`. Dimensions never change.

use serde::{Deserialize, Serialize};

use crate::decode::{DecodedImage, CHANNELS};

/// Axis to mirror along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlipAxis {
    /// Mirror left-to-right.
    Horizontal,
    /// Mirror top-to-bottom.
    Vertical,
}

/// Flip an image along `axis`.
pub fn flip(image: &DecodedImage, axis: FlipAxis) -> DecodedImage {
    if image.is_empty() {
        return image.clone();
    }

    let row_len = image.width as usize * CHANNELS;
    let mut output = Vec::with_capacity(image.pixels.len());

    match axis {
        FlipAxis::Horizontal => {
            for row in image.pixels.chunks_exact(row_len) {
                for px in row.chunks_exact(CHANNELS).rev() {
                    output.extend_from_slice(px);
                }
            }
        }
        FlipAxis::Vertical => {
            for row in image.pixels.chunks_exact(row_len).rev() {
                output.extend_from_slice(row);
            }
        }
    }

    DecodedImage {
        width: image.width,
        height: image.height,
        pixels: output,
    }
}
