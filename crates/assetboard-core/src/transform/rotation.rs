//! Quarter-turn rotation.
//!
//! The output canvas swaps width and height. Drawing the source through the
//! canvas transform `translate(w'/2, h'/2) · rotate(90°) · translate(-w/2, -h/2)`
//! lands every source pixel on exactly one destination pixel, so the rotation
//! is a pure permutation and four of them give back the input unchanged.
//!
//! For a source of height `H` the inverse mapping is:
//! ```text
//! src_x = dst_y
//! src_y = H - 1 - dst_x
//! ```

use crate::decode::{DecodedImage, CHANNELS};

/// Dimensions of an image after a quarter turn.
#[inline]
pub fn rotated_dimensions(width: u32, height: u32) -> (u32, u32) {
    (height, width)
}

/// Rotate an image 90 degrees clockwise.
pub fn rotate_90_clockwise(image: &DecodedImage) -> DecodedImage {
    let (dst_w, dst_h) = rotated_dimensions(image.width, image.height);
    let mut output = vec![0u8; image.pixels.len()];

    for dst_y in 0..dst_h {
        for dst_x in 0..dst_w {
            let src_idx = image.offset(dst_y, image.height - 1 - dst_x);
            let dst_idx = (dst_y as usize * dst_w as usize + dst_x as usize) * CHANNELS;
            output[dst_idx..dst_idx + CHANNELS]
                .copy_from_slice(&image.pixels[src_idx..src_idx + CHANNELS]);
        }
    }

    DecodedImage {
        width: dst_w,
        height: dst_h,
        pixels: output,
    }
}

/// Rotate an image 180 degrees.
pub fn rotate_180(image: &DecodedImage) -> DecodedImage {
    // Reversing the pixel order reverses both rows and columns.
    let mut output = Vec::with_capacity(image.pixels.len());
    for px in image.pixels.chunks_exact(CHANNELS).rev() {
        output.extend_from_slice(px);
    }

    DecodedImage {
        width: image.width,
        height: image.height,
        pixels: output,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::gradient;
    use proptest::prelude::*;

    #[test]
    fn test_rotation_swaps_dimensions() {
        let img = gradient(200, 100);
        let result = rotate_90_clockwise(&img);

        assert_eq!(result.width, 100);
        assert_eq!(result.height, 200);
        assert_eq!(result.pixels.len(), img.pixels.len());
    }

    #[test]
    fn test_rotation_moves_corners_clockwise() {
        let img = gradient(3, 2);
        let result = rotate_90_clockwise(&img);

        // Top-left goes to top-right, bottom-left goes to top-left
        assert_eq!(result.pixel(1, 0), img.pixel(0, 0));
        assert_eq!(result.pixel(0, 0), img.pixel(0, 1));
        assert_eq!(result.pixel(0, 2), img.pixel(2, 1));
        assert_eq!(result.pixel(1, 2), img.pixel(2, 0));
    }

    #[test]
    fn test_rotation_matches_image_crate() {
        let img = gradient(5, 3);
        let expected = image::imageops::rotate90(&img.to_rgba_image().unwrap());
        let result = rotate_90_clockwise(&img);

        assert_eq!(result.dimensions(), expected.dimensions());
        assert_eq!(result.pixels, expected.into_raw());
    }

    #[test]
    fn test_1x1_image_rotation() {
        let img = DecodedImage::new(1, 1, vec![10, 20, 30, 40]);
        assert_eq!(rotate_90_clockwise(&img), img);
    }

    #[test]
    fn test_very_thin_image_rotation() {
        let img = gradient(100, 1);
        let result = rotate_90_clockwise(&img);
        assert_eq!(result.dimensions(), (1, 100));
        assert_eq!(result.pixel(0, 99), img.pixel(99, 0));
    }

    #[test]
    fn test_rotate_180_is_two_quarter_turns() {
        let img = gradient(7, 4);
        let twice = rotate_90_clockwise(&rotate_90_clockwise(&img));
        assert_eq!(rotate_180(&img), twice);
    }

    fn dimensions_strategy() -> impl Strategy<Value = (u32, u32)> {
        (1u32..=24, 1u32..=24)
    }

    proptest! {
        /// Property: four quarter turns restore dimensions and pixels.
        #[test]
        fn prop_four_rotations_are_identity((width, height) in dimensions_strategy()) {
            let img = gradient(width, height);
            let mut result = img.clone();
            for _ in 0..4 {
                result = rotate_90_clockwise(&result);
            }
            prop_assert_eq!(result, img);
        }

        /// Property: a single quarter turn swaps width and height.
        #[test]
        fn prop_rotation_swaps_dimensions((width, height) in dimensions_strategy()) {
            let result = rotate_90_clockwise(&gradient(width, height));
            prop_assert_eq!(result.dimensions(), (height, width));
        }

        /// Property: rotation only moves pixels, it never changes them.
        #[test]
        fn prop_rotation_is_a_permutation((width, height) in dimensions_strategy()) {
            let img = gradient(width, height);
            let result = rotate_90_clockwise(&img);

            let mut before: Vec<&[u8]> = img.pixels.chunks(CHANNELS).collect();
            let mut after: Vec<&[u8]> = result.pixels.chunks(CHANNELS).collect();
            before.sort();
            after.sort();
            prop_assert_eq!(before, after);
        }
    }
}
