//! Rectangular crop extraction.
//!
//! Crop rectangles are in source pixels, the coordinate space a crop widget
//! reports its selection in. [`CropRect::from_normalized`] converts from the
//! 0.0-1.0 space used by relative selections.
//!
//! # Behavior
//!
//! - Rectangles extending beyond the image are clamped to its bounds
//! - Minimum output dimension is 1x1 pixels
//! - A rectangle covering the whole image returns a copy of it

use serde::{Deserialize, Serialize};

use crate::decode::{DecodedImage, CHANNELS};

/// A crop selection in source pixel coordinates. Origin is top-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CropRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CropRect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The rectangle covering a whole `width` x `height` image.
    pub fn full(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Convert a normalized selection (0.0 to 1.0 relative to the image
    /// dimensions) to pixels, rounding to the nearest pixel.
    pub fn from_normalized(
        image_width: u32,
        image_height: u32,
        left: f64,
        top: f64,
        width: f64,
        height: f64,
    ) -> Self {
        let (src_w, src_h) = (image_width as f64, image_height as f64);
        Self {
            x: (left.clamp(0.0, 1.0) * src_w).round() as u32,
            y: (top.clamp(0.0, 1.0) * src_h).round() as u32,
            width: (width.clamp(0.0, 1.0) * src_w).round() as u32,
            height: (height.clamp(0.0, 1.0) * src_h).round() as u32,
        }
    }

    /// Exclusive right edge.
    pub fn right(&self) -> u32 {
        self.x.saturating_add(self.width)
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> u32 {
        self.y.saturating_add(self.height)
    }

    /// Clamp to a `width` x `height` image, keeping at least one pixel.
    pub fn clamp_to(&self, width: u32, height: u32) -> Self {
        let x = self.x.min(width.saturating_sub(1));
        let y = self.y.min(height.saturating_sub(1));
        let right = self.right().min(width);
        let bottom = self.bottom().min(height);

        Self {
            x,
            y,
            width: right.saturating_sub(x).max(1),
            height: bottom.saturating_sub(y).max(1),
        }
    }

    /// Whether the rectangle covers all of a `width` x `height` image.
    pub fn covers(&self, width: u32, height: u32) -> bool {
        self.x == 0 && self.y == 0 && self.right() >= width && self.bottom() >= height
    }
}

/// Copy the pixels inside `rect` into a new image.
pub fn apply_crop(image: &DecodedImage, rect: &CropRect) -> DecodedImage {
    if image.is_empty() || rect.covers(image.width, image.height) {
        return image.clone();
    }

    let rect = rect.clamp_to(image.width, image.height);
    let row_len = rect.width as usize * CHANNELS;
    let mut output = Vec::with_capacity(row_len * rect.height as usize);

    for y in rect.y..rect.bottom() {
        let start = image.offset(rect.x, y);
        output.extend_from_slice(&image.pixels[start..start + row_len]);
    }

    DecodedImage {
        width: rect.width,
        height: rect.height,
        pixels: output,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::gradient;
    use proptest::prelude::*;

    #[test]
    fn test_full_crop() {
        let img = gradient(100, 100);
        let result = apply_crop(&img, &CropRect::full(100, 100));
        assert_eq!(result, img);
    }

    #[test]
    fn test_center_crop() {
        let img = gradient(10, 10);
        let result = apply_crop(&img, &CropRect::new(2, 2, 6, 6));

        assert_eq!(result.dimensions(), (6, 6));
        assert_eq!(result.pixel(0, 0), img.pixel(2, 2));
        assert_eq!(result.pixel(5, 5), img.pixel(7, 7));
    }

    #[test]
    fn test_crop_clamps_to_bounds() {
        let img = gradient(10, 10);
        let result = apply_crop(&img, &CropRect::new(8, 8, 5, 5));

        assert_eq!(result.dimensions(), (2, 2));
        assert_eq!(result.pixel(1, 1), img.pixel(9, 9));
    }

    #[test]
    fn test_crop_outside_image_keeps_one_pixel() {
        let img = gradient(10, 10);
        let result = apply_crop(&img, &CropRect::new(50, 50, 5, 5));

        assert_eq!(result.dimensions(), (1, 1));
        assert_eq!(result.pixel(0, 0), img.pixel(9, 9));
    }

    #[test]
    fn test_zero_sized_rect_keeps_one_pixel() {
        let img = gradient(10, 10);
        let result = apply_crop(&img, &CropRect::new(3, 4, 0, 0));
        assert_eq!(result.dimensions(), (1, 1));
        assert_eq!(result.pixel(0, 0), img.pixel(3, 4));
    }

    #[test]
    fn test_from_normalized() {
        let rect = CropRect::from_normalized(10, 20, 0.2, 0.25, 0.6, 0.5);
        assert_eq!(rect, CropRect::new(2, 5, 6, 10));

        // Negative and oversized values clamp
        let rect = CropRect::from_normalized(100, 100, -0.1, -0.1, 1.5, 0.5);
        assert_eq!(rect, CropRect::new(0, 0, 100, 50));
    }

    #[test]
    fn test_covers() {
        assert!(CropRect::full(10, 5).covers(10, 5));
        assert!(CropRect::new(0, 0, 20, 20).covers(10, 5));
        assert!(!CropRect::new(1, 0, 10, 5).covers(10, 5));
    }

    fn dimensions_strategy() -> impl Strategy<Value = (u32, u32)> {
        (1u32..=40, 1u32..=40)
    }

    fn rect_strategy() -> impl Strategy<Value = CropRect> {
        (0u32..=50, 0u32..=50, 0u32..=50, 0u32..=50)
            .prop_map(|(x, y, w, h)| CropRect::new(x, y, w, h))
    }

    proptest! {
        /// Property: output is at least 1x1 and never larger than the input.
        #[test]
        fn prop_output_bounded_by_input(
            (width, height) in dimensions_strategy(),
            rect in rect_strategy(),
        ) {
            let result = apply_crop(&gradient(width, height), &rect);

            prop_assert!(result.width >= 1 && result.width <= width);
            prop_assert!(result.height >= 1 && result.height <= height);
            prop_assert_eq!(
                result.pixels.len(),
                result.width as usize * result.height as usize * CHANNELS
            );
        }

        /// Property: the top-left output pixel is the clamped origin pixel.
        #[test]
        fn prop_origin_pixel_preserved(
            (width, height) in dimensions_strategy(),
            rect in rect_strategy(),
        ) {
            let img = gradient(width, height);
            let clamped = rect.clamp_to(width, height);
            let result = apply_crop(&img, &rect);

            prop_assert_eq!(result.pixel(0, 0), img.pixel(clamped.x, clamped.y));
        }
    }
}
