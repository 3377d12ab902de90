//! Crop adapter.
//!
//! The interactive crop widget is an external collaborator. The core only
//! needs one thing from it: render the current selection as a new image.
//! [`CropSurface`] is that contract and [`extract_crop`] is the adapter the
//! editor calls, reporting [`CropError::Unavailable`] when no widget is bound.
//! [`Cropper`] is a headless implementation that keeps the crop box model.

mod model;
mod options;

use thiserror::Error;

use crate::encode::OutputEncoding;
use crate::transform::TransformError;
use crate::EncodedImage;

pub use model::Cropper;
pub use options::{CropperOptions, ViewMode};

/// Errors from the crop adapter.
#[derive(Debug, Error)]
pub enum CropError {
    /// No crop widget is mounted (the editor surface is closed).
    #[error("cropper instance is not available")]
    Unavailable,

    #[error(transparent)]
    Transform(#[from] TransformError),
}

/// Anything that can render its current crop selection as an image.
pub trait CropSurface {
    fn cropped_image(&self, encoding: OutputEncoding) -> Result<EncodedImage, CropError>;
}

/// Ask the bound widget, if any, for the current crop.
pub fn extract_crop(
    surface: Option<&dyn CropSurface>,
    encoding: OutputEncoding,
) -> Result<EncodedImage, CropError> {
    surface
        .ok_or(CropError::Unavailable)?
        .cropped_image(encoding)
}
