//! WASM-compatible wrapper types for image data.
//!
//! This module provides JavaScript-friendly types that wrap the core Assetboard
//! types, handling the conversion between Rust and JavaScript representations.

use assetboard_core::{EncodedImage, OutputEncoding};
use std::fmt::Display;
use wasm_bindgen::prelude::*;

/// An encoded image wrapper for JavaScript.
///
/// The bytes stay in WASM memory. `bytes()` copies them out as a
/// `Uint8Array`; `toDataUrl()` gives a string usable as an `<img src>`.
#[wasm_bindgen]
pub struct JsEncodedImage {
    inner: EncodedImage,
}

#[wasm_bindgen]
impl JsEncodedImage {
    /// Wrap encoded bytes (PNG, JPEG, WebP, GIF or BMP).
    #[wasm_bindgen(constructor)]
    pub fn new(bytes: Vec<u8>) -> Result<JsEncodedImage, JsValue> {
        EncodedImage::from_bytes(bytes)
            .map(Self::from_encoded)
            .map_err(to_js_error)
    }

    /// Parse a `data:image/...;base64,...` URL.
    #[wasm_bindgen(js_name = fromDataUrl)]
    pub fn from_data_url(url: &str) -> Result<JsEncodedImage, JsValue> {
        EncodedImage::from_data_url(url)
            .map(Self::from_encoded)
            .map_err(to_js_error)
    }

    /// MIME type, e.g. `image/png`
    #[wasm_bindgen(getter, js_name = mimeType)]
    pub fn mime_type(&self) -> String {
        self.inner.mime_type().to_string()
    }

    /// Size of the encoded payload in bytes
    #[wasm_bindgen(getter, js_name = byteLength)]
    pub fn byte_length(&self) -> usize {
        self.inner.byte_len()
    }

    /// `[width, height]` as displayed (orientation applied).
    pub fn dimensions(&self) -> Result<Vec<u32>, JsValue> {
        let (width, height) = self.inner.dimensions().map_err(to_js_error)?;
        Ok(vec![width, height])
    }

    /// Copy of the encoded bytes.
    pub fn bytes(&self) -> Vec<u8> {
        self.inner.bytes().to_vec()
    }

    #[wasm_bindgen(js_name = toDataUrl)]
    pub fn to_data_url(&self) -> String {
        self.inner.to_data_url()
    }
}

impl JsEncodedImage {
    pub(crate) fn from_encoded(inner: EncodedImage) -> Self {
        Self { inner }
    }

    pub(crate) fn as_encoded(&self) -> &EncodedImage {
        &self.inner
    }
}

/// Output encoding for a binding call: JPEG at `quality` when given,
/// otherwise PNG.
pub(crate) fn encoding_from_quality(jpeg_quality: Option<u8>) -> OutputEncoding {
    match jpeg_quality {
        Some(quality) => OutputEncoding::Jpeg { quality },
        None => OutputEncoding::Png,
    }
}

pub(crate) fn to_js_error(err: impl Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoding_from_quality() {
        assert_eq!(encoding_from_quality(None), OutputEncoding::Png);
        assert_eq!(
            encoding_from_quality(Some(80)),
            OutputEncoding::Jpeg { quality: 80 }
        );
    }
}
