//! Image encoding for Assetboard.
//!
//! Every transform hands its output canvas to [`encode`], which produces the
//! bytes of a new [`EncodedImage`](crate::EncodedImage). PNG is the default,
//! matching a canvas `toDataURL()` without arguments; JPEG is available when
//! smaller gallery entries matter more than exact pixels.

mod jpeg;
mod png;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::{DecodedImage, CHANNELS};

pub use jpeg::encode_jpeg;
pub use png::encode_png;

/// Default JPEG quality, the value browsers use for `toDataURL("image/jpeg")`.
pub const DEFAULT_JPEG_QUALITY: u8 = 92;

/// Errors that can occur while encoding a canvas.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 4), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The codec itself failed
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),
}

/// Encoding used when a transform re-encodes its output canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "format", rename_all = "lowercase")]
pub enum OutputEncoding {
    /// Lossless PNG.
    #[default]
    Png,
    /// Lossy JPEG with the given quality (1-100).
    Jpeg {
        #[serde(default = "default_jpeg_quality")]
        quality: u8,
    },
}

fn default_jpeg_quality() -> u8 {
    DEFAULT_JPEG_QUALITY
}

impl OutputEncoding {
    /// The container format produced by this encoding.
    pub fn format(self) -> image::ImageFormat {
        match self {
            OutputEncoding::Png => image::ImageFormat::Png,
            OutputEncoding::Jpeg { .. } => image::ImageFormat::Jpeg,
        }
    }

    /// Whether decoding the output yields exactly the encoded pixels.
    pub fn is_lossless(self) -> bool {
        matches!(self, OutputEncoding::Png)
    }
}

/// Encode an RGBA image with the requested encoding.
pub fn encode(image: &DecodedImage, encoding: OutputEncoding) -> Result<Vec<u8>, EncodeError> {
    match encoding {
        OutputEncoding::Png => encode_png(image),
        OutputEncoding::Jpeg { quality } => encode_jpeg(image, quality),
    }
}

fn validate(image: &DecodedImage) -> Result<(), EncodeError> {
    if image.width == 0 || image.height == 0 {
        return Err(EncodeError::InvalidDimensions {
            width: image.width,
            height: image.height,
        });
    }

    let expected = image.width as usize * image.height as usize * CHANNELS;
    if image.pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: image.pixels.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::gradient;

    #[test]
    fn test_encode_dispatches_on_format() {
        let img = gradient(4, 4);

        let png = encode(&img, OutputEncoding::Png).unwrap();
        assert_eq!(image::guess_format(&png).unwrap(), image::ImageFormat::Png);

        let jpeg = encode(&img, OutputEncoding::Jpeg { quality: 80 }).unwrap();
        assert_eq!(image::guess_format(&jpeg).unwrap(), image::ImageFormat::Jpeg);
    }

    #[test]
    fn test_output_encoding_serde() {
        let enc: OutputEncoding = serde_json::from_str(r#"{"format":"jpeg"}"#).unwrap();
        assert_eq!(enc, OutputEncoding::Jpeg { quality: 92 });

        let enc: OutputEncoding = serde_json::from_str(r#"{"format":"png"}"#).unwrap();
        assert_eq!(enc, OutputEncoding::Png);
        assert!(enc.is_lossless());
    }
}
