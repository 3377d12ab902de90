//! WASM bindings for the standalone transform engine.
//!
//! These run a single transform on an image without an edit session, for
//! hosts that manage their own state.

use crate::types::{encoding_from_quality, to_js_error, JsEncodedImage};
use assetboard_core::transform::{crop_encoded, flip_encoded, rotate_encoded, CropRect, FlipAxis};
use wasm_bindgen::prelude::*;

/// Rotate an image 90 degrees clockwise.
///
/// The output is PNG unless `jpeg_quality` is given.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const rotated = rotate_image(image);
/// console.log(rotated.dimensions()); // [h, w]
/// ```
#[wasm_bindgen]
pub fn rotate_image(
    image: &JsEncodedImage,
    jpeg_quality: Option<u8>,
) -> Result<JsEncodedImage, JsValue> {
    rotate_encoded(image.as_encoded(), encoding_from_quality(jpeg_quality))
        .map(JsEncodedImage::from_encoded)
        .map_err(to_js_error)
}

/// Mirror an image left-to-right (`horizontal = true`) or top-to-bottom.
#[wasm_bindgen]
pub fn flip_image(
    image: &JsEncodedImage,
    horizontal: bool,
    jpeg_quality: Option<u8>,
) -> Result<JsEncodedImage, JsValue> {
    flip_encoded(
        image.as_encoded(),
        axis_from_bool(horizontal),
        encoding_from_quality(jpeg_quality),
    )
    .map(JsEncodedImage::from_encoded)
    .map_err(to_js_error)
}

/// Extract a pixel rectangle. Out-of-bounds rectangles are clamped.
#[wasm_bindgen]
pub fn crop_image(
    image: &JsEncodedImage,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
    jpeg_quality: Option<u8>,
) -> Result<JsEncodedImage, JsValue> {
    let rect = CropRect::new(x, y, width, height);
    crop_encoded(image.as_encoded(), &rect, encoding_from_quality(jpeg_quality))
        .map(JsEncodedImage::from_encoded)
        .map_err(to_js_error)
}

pub(crate) fn axis_from_bool(horizontal: bool) -> FlipAxis {
    if horizontal {
        FlipAxis::Horizontal
    } else {
        FlipAxis::Vertical
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_from_bool() {
        assert_eq!(axis_from_bool(true), FlipAxis::Horizontal);
        assert_eq!(axis_from_bool(false), FlipAxis::Vertical);
    }
}
