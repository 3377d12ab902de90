//! The immutable encoded-image value that flows between the file input, the
//! edit session, the transform engine and the gallery.
//!
//! An [`EncodedImage`] is self-describing: its container format is sniffed
//! from the magic bytes when it is built, so a payload that no decoder
//! recognizes never makes it into a session. Clones share the same buffer,
//! which is how a gallery entry and the session editing it can refer to the
//! same bytes without copying.

use std::fmt;
use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::ImageFormat;

use crate::decode::{self, DecodeError, DecodedImage};
use crate::encode::{self, EncodeError, OutputEncoding};

const DATA_URL_PREFIX: &str = "data:";
const BASE64_MARKER: &str = ";base64";

/// An opaque, immutable encoded raster image.
#[derive(Clone)]
pub struct EncodedImage {
    bytes: Arc<[u8]>,
    format: ImageFormat,
}

impl EncodedImage {
    /// Wrap encoded bytes, detecting their format.
    ///
    /// # Errors
    ///
    /// `DecodeError::Empty` for zero bytes, `DecodeError::InvalidFormat` if
    /// the magic bytes match no supported format.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Result<Self, DecodeError> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(DecodeError::Empty);
        }

        let format = image::guess_format(&bytes).map_err(|_| DecodeError::InvalidFormat)?;
        Ok(Self {
            bytes: bytes.into(),
            format,
        })
    }

    /// Parse a `data:image/...;base64,...` URL, the representation a
    /// `FileReader.readAsDataURL` call or a canvas export hands back.
    pub fn from_data_url(url: &str) -> Result<Self, DecodeError> {
        let rest = url
            .strip_prefix(DATA_URL_PREFIX)
            .ok_or_else(|| DecodeError::InvalidDataUrl("missing data: scheme".to_string()))?;
        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| DecodeError::InvalidDataUrl("missing payload separator".to_string()))?;
        let mime = header
            .strip_suffix(BASE64_MARKER)
            .ok_or_else(|| DecodeError::InvalidDataUrl("expected base64 payload".to_string()))?;

        if !mime.is_empty() && !is_image_mime(mime) {
            return Err(DecodeError::UnsupportedMime(mime.to_string()));
        }

        let bytes = STANDARD
            .decode(payload.trim())
            .map_err(|e| DecodeError::InvalidDataUrl(e.to_string()))?;
        Self::from_bytes(bytes)
    }

    /// Encode a decoded canvas into a new image.
    pub fn from_decoded(
        image: &DecodedImage,
        encoding: OutputEncoding,
    ) -> Result<Self, EncodeError> {
        let bytes = encode::encode(image, encoding)?;
        Ok(Self {
            bytes: bytes.into(),
            format: encoding.format(),
        })
    }

    /// The encoded bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Detected container format.
    pub fn format(&self) -> ImageFormat {
        self.format
    }

    /// MIME type of the container, e.g. `image/png`.
    pub fn mime_type(&self) -> &'static str {
        self.format.to_mime_type()
    }

    /// Size of the encoded payload in bytes.
    pub fn byte_len(&self) -> usize {
        self.bytes.len()
    }

    /// Displayed dimensions, read from the header only.
    ///
    /// EXIF orientation is taken into account so the result matches what
    /// [`decode`](Self::decode) produces.
    pub fn dimensions(&self) -> Result<(u32, u32), DecodeError> {
        let (width, height) = decode::probe_dimensions(&self.bytes)?;
        if decode::get_orientation(&self.bytes).swaps_dimensions() {
            Ok((height, width))
        } else {
            Ok((width, height))
        }
    }

    /// Decode to RGBA pixels with orientation applied.
    pub fn decode(&self) -> Result<DecodedImage, DecodeError> {
        decode::decode_image(&self.bytes)
    }

    /// Render as a `data:` URL suitable for an `<img src>`.
    pub fn to_data_url(&self) -> String {
        format!(
            "{DATA_URL_PREFIX}{}{BASE64_MARKER},{}",
            self.mime_type(),
            STANDARD.encode(&self.bytes)
        )
    }

    /// Whether two images share the same underlying buffer.
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.bytes, &b.bytes)
    }
}

impl PartialEq for EncodedImage {
    fn eq(&self, other: &Self) -> bool {
        Self::ptr_eq(self, other) || self.bytes == other.bytes
    }
}

impl Eq for EncodedImage {}

impl fmt::Debug for EncodedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncodedImage")
            .field("format", &self.format)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

/// Whether a MIME type belongs to the `image/*` family.
pub fn is_image_mime(mime: &str) -> bool {
    mime.split(';')
        .next()
        .map(str::trim)
        .and_then(|essence| essence.split_once('/'))
        .is_some_and(|(kind, subtype)| kind.eq_ignore_ascii_case("image") && !subtype.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{gradient, png_image};

    #[test]
    fn test_from_bytes_detects_png() {
        let img = png_image(3, 2);
        assert_eq!(img.format(), ImageFormat::Png);
        assert_eq!(img.mime_type(), "image/png");
        assert!(img.byte_len() > 8);
    }

    #[test]
    fn test_from_bytes_rejects_empty_and_garbage() {
        assert!(matches!(
            EncodedImage::from_bytes(Vec::new()),
            Err(DecodeError::Empty)
        ));
        assert!(matches!(
            EncodedImage::from_bytes(vec![1, 2, 3, 4, 5, 6, 7, 8]),
            Err(DecodeError::InvalidFormat)
        ));
    }

    #[test]
    fn test_data_url_round_trip() {
        let img = png_image(4, 4);
        let url = img.to_data_url();
        assert!(url.starts_with("data:image/png;base64,"));

        let parsed = EncodedImage::from_data_url(&url).unwrap();
        assert_eq!(parsed, img);
        assert!(!EncodedImage::ptr_eq(&parsed, &img));
    }

    #[test]
    fn test_data_url_rejects_non_image_mime() {
        let result = EncodedImage::from_data_url("data:text/plain;base64,aGVsbG8=");
        assert!(matches!(result, Err(DecodeError::UnsupportedMime(_))));
    }

    #[test]
    fn test_data_url_requires_base64() {
        let result = EncodedImage::from_data_url("data:image/svg+xml,%3Csvg%3E");
        assert!(matches!(result, Err(DecodeError::InvalidDataUrl(_))));

        let result = EncodedImage::from_data_url("image/png;base64,AAAA");
        assert!(matches!(result, Err(DecodeError::InvalidDataUrl(_))));
    }

    #[test]
    fn test_dimensions_and_decode_agree() {
        let img = png_image(6, 3);
        assert_eq!(img.dimensions().unwrap(), (6, 3));
        assert_eq!(img.decode().unwrap(), gradient(6, 3));
    }

    #[test]
    fn test_clone_shares_buffer() {
        let img = png_image(2, 2);
        let copy = img.clone();
        assert!(EncodedImage::ptr_eq(&img, &copy));
        assert_eq!(img, copy);
    }

    #[test]
    fn test_from_decoded_uses_requested_format() {
        let img = EncodedImage::from_decoded(&gradient(2, 2), OutputEncoding::Jpeg { quality: 90 })
            .unwrap();
        assert_eq!(img.format(), ImageFormat::Jpeg);
        assert_eq!(img.mime_type(), "image/jpeg");
    }

    #[test]
    fn test_is_image_mime() {
        assert!(is_image_mime("image/png"));
        assert!(is_image_mime("IMAGE/JPEG"));
        assert!(is_image_mime("image/webp; charset=binary"));
        assert!(!is_image_mime("image/"));
        assert!(!is_image_mime("video/mp4"));
        assert!(!is_image_mime("png"));
    }
}
