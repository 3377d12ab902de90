//! Fixtures shared by the unit tests.

use crate::decode::DecodedImage;
use crate::encode::encode_png;
use crate::EncodedImage;

/// An image where every pixel differs from its neighbours and no two
/// positions in a small image share a value.
pub fn gradient(width: u32, height: u32) -> DecodedImage {
    let mut pixels = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        for x in 0..width {
            pixels.push((x * 7 % 256) as u8);
            pixels.push((y * 11 % 256) as u8);
            pixels.push(((y * width + x) % 256) as u8);
            pixels.push(255);
        }
    }
    DecodedImage::new(width, height, pixels)
}

/// A single-color image.
pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> DecodedImage {
    let pixels = rgba
        .iter()
        .copied()
        .cycle()
        .take((width * height * 4) as usize)
        .collect();
    DecodedImage::new(width, height, pixels)
}

/// A PNG-encoded gradient.
pub fn png_image(width: u32, height: u32) -> EncodedImage {
    let bytes = encode_png(&gradient(width, height)).unwrap();
    EncodedImage::from_bytes(bytes).unwrap()
}
