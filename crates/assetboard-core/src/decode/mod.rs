//! Image decoding for Assetboard.
//!
//! This module turns an encoded payload (PNG, JPEG, WebP, GIF or BMP) into an
//! RGBA [`DecodedImage`], the in-memory stand-in for a drawn canvas.
//!
//! # Examples
//!
//! ```ignore
//! use assetboard_core::decode::decode_image;
//!
//! let bytes = std::fs::read("photo.png").unwrap();
//! let image = decode_image(&bytes).unwrap();
//! println!("Decoded {}x{} image", image.width, image.height);
//! ```

mod raster;
mod types;

pub use raster::{decode_image, decode_image_no_orientation, get_orientation, probe_dimensions};
pub use types::{DecodeError, DecodedImage, Orientation, CHANNELS};
