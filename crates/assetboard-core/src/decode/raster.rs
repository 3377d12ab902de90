//! Raster decoding with EXIF orientation handling.
//!
//! Mirrors what a browser does when an `<img>` element finishes loading: the
//! payload format is sniffed from its magic bytes, the pixels are decoded to
//! RGBA, and any EXIF orientation is baked into the result.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageReader};

use super::{DecodeError, DecodedImage, Orientation};

/// Decode an encoded image from bytes, applying EXIF orientation correction.
///
/// # Errors
///
/// Returns `DecodeError::Empty` for a zero-length payload,
/// `DecodeError::InvalidFormat` if the format cannot be recognized and
/// `DecodeError::CorruptedFile` if decoding fails part-way.
pub fn decode_image(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    let orientation = extract_orientation(bytes);
    let img = decode_dynamic(bytes)?;
    let oriented = apply_orientation(img, orientation);
    Ok(DecodedImage::from_rgba_image(oriented.into_rgba8()))
}

/// Decode an encoded image from bytes without applying EXIF orientation.
///
/// This matches a crop widget configured with `check_orientation = false`
/// reading raw pixel data.
pub fn decode_image_no_orientation(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    let img = decode_dynamic(bytes)?;
    Ok(DecodedImage::from_rgba_image(img.into_rgba8()))
}

/// Read only the header of an encoded image and return its dimensions.
///
/// The dimensions are those stored in the file, before orientation.
pub fn probe_dimensions(bytes: &[u8]) -> Result<(u32, u32), DecodeError> {
    reader_for(bytes)?
        .into_dimensions()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))
}

/// Extract EXIF orientation value from encoded bytes (for external use).
pub fn get_orientation(bytes: &[u8]) -> Orientation {
    extract_orientation(bytes)
}

fn reader_for(bytes: &[u8]) -> Result<ImageReader<Cursor<&[u8]>>, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::Empty);
    }

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }
    Ok(reader)
}

fn decode_dynamic(bytes: &[u8]) -> Result<DynamicImage, DecodeError> {
    reader_for(bytes)?
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))
}

/// Returns `Orientation::Normal` if no EXIF data is found or orientation
/// cannot be determined.
fn extract_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);

    match Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .map(Orientation::from)
            .unwrap_or_default(),
        Err(_) => Orientation::Normal,
    }
}

fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::{encode_jpeg, encode_png};
    use crate::test_support::gradient;

    #[test]
    fn test_decode_png_is_lossless() {
        let src = gradient(5, 3);
        let png = encode_png(&src).unwrap();

        let decoded = decode_image(&png).unwrap();
        assert_eq!(decoded, src);
    }

    #[test]
    fn test_decode_jpeg() {
        let src = gradient(8, 4);
        let jpeg = encode_jpeg(&src, 90).unwrap();

        let decoded = decode_image(&jpeg).unwrap();
        assert_eq!(decoded.dimensions(), (8, 4));
        // JPEG carries no alpha, decoded pixels are opaque
        assert!(decoded.pixels.chunks(4).all(|p| p[3] == 255));
    }

    #[test]
    fn test_decode_no_orientation_matches_plain_png() {
        let src = gradient(4, 4);
        let png = encode_png(&src).unwrap();

        let decoded = decode_image_no_orientation(&png).unwrap();
        assert_eq!(decoded, src);
    }

    #[test]
    fn test_decode_empty_bytes() {
        assert!(matches!(decode_image(&[]), Err(DecodeError::Empty)));
    }

    #[test]
    fn test_decode_unrecognized_bytes() {
        let result = decode_image(&[0x00, 0x01, 0x02, 0x03]);
        assert!(matches!(result, Err(DecodeError::InvalidFormat)));
    }

    #[test]
    fn test_decode_truncated_png() {
        let png = encode_png(&gradient(16, 16)).unwrap();
        let result = decode_image(&png[..40]);
        assert!(matches!(result, Err(DecodeError::CorruptedFile(_))));
    }

    #[test]
    fn test_probe_dimensions() {
        let png = encode_png(&gradient(7, 2)).unwrap();
        assert_eq!(probe_dimensions(&png).unwrap(), (7, 2));
    }

    #[test]
    fn test_orientation_extraction_without_exif() {
        let png = encode_png(&gradient(2, 2)).unwrap();
        assert_eq!(get_orientation(&png), Orientation::Normal);
        assert_eq!(get_orientation(&[0x00, 0x01, 0x02]), Orientation::Normal);
    }

    #[test]
    fn test_apply_orientation_rotate180() {
        let pixels = vec![
            255, 0, 0, 255, // Red (left)
            0, 255, 0, 255, // Green (right)
        ];
        let img = DynamicImage::ImageRgba8(image::RgbaImage::from_raw(2, 1, pixels).unwrap());

        let result = apply_orientation(img, Orientation::Rotate180).into_rgba8();

        assert_eq!(result.get_pixel(0, 0).0, [0, 255, 0, 255]);
        assert_eq!(result.get_pixel(1, 0).0, [255, 0, 0, 255]);
    }

    #[test]
    fn test_apply_orientation_rotate90_swaps_dimensions() {
        let img = DynamicImage::ImageRgba8(image::RgbaImage::new(2, 1));
        let result = apply_orientation(img, Orientation::Rotate90CW);
        assert_eq!((result.width(), result.height()), (1, 2));
    }
}
