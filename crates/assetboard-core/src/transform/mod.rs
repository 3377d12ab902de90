//! The transform engine: quarter-turn rotation, flips and crop extraction.
//!
//! The pixel-level functions work on [`DecodedImage`]s and are pure. The
//! `*_encoded` wrappers are what the edit session runs: decode the current
//! image, draw it through the transform, and encode the result as a brand new
//! [`EncodedImage`]. The input is never modified.

mod crop;
mod flip;
mod rotation;

use thiserror::Error;

use crate::decode::{DecodeError, DecodedImage};
use crate::encode::{EncodeError, OutputEncoding};
use crate::EncodedImage;

pub use crop::{apply_crop, CropRect};
pub use flip::{flip, FlipAxis};
pub use rotation::{rotate_180, rotate_90_clockwise, rotated_dimensions};

/// A transform could not read its source or write its output.
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("failed to decode source image: {0}")]
    Decode(#[from] DecodeError),

    #[error("failed to encode transformed image: {0}")]
    Encode(#[from] EncodeError),
}

/// Rotate an encoded image 90 degrees clockwise.
pub fn rotate_encoded(
    image: &EncodedImage,
    encoding: OutputEncoding,
) -> Result<EncodedImage, TransformError> {
    redraw(image, encoding, rotate_90_clockwise)
}

/// Flip an encoded image along `axis`.
pub fn flip_encoded(
    image: &EncodedImage,
    axis: FlipAxis,
    encoding: OutputEncoding,
) -> Result<EncodedImage, TransformError> {
    redraw(image, encoding, |pixels| flip(pixels, axis))
}

/// Extract `rect` from an encoded image.
pub fn crop_encoded(
    image: &EncodedImage,
    rect: &CropRect,
    encoding: OutputEncoding,
) -> Result<EncodedImage, TransformError> {
    redraw(image, encoding, |pixels| apply_crop(pixels, rect))
}

fn redraw(
    image: &EncodedImage,
    encoding: OutputEncoding,
    draw: impl FnOnce(&DecodedImage) -> DecodedImage,
) -> Result<EncodedImage, TransformError> {
    let source = image.decode()?;
    let canvas = draw(&source);
    Ok(EncodedImage::from_decoded(&canvas, encoding)?)
}
