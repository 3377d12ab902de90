//! Assetboard WASM - WebAssembly bindings for Assetboard
//!
//! This crate exposes the assetboard-core uploader to JavaScript.
//!
//! # Module Structure
//!
//! - `editor` - The `JsImageEditor` controller (session + gallery + cropper)
//! - `transform` - Standalone rotate/flip/crop on a single image
//! - `types` - WASM-compatible wrapper types for image data
//! - `logging` - Routes core log records to the browser console
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsImageEditor } from '@assetboard/wasm';
//!
//! await init();
//!
//! const editor = new JsImageEditor({}, () => fileInput.click());
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! editor.openFile(bytes, file.name, file.type);
//! editor.rotate();
//! editor.save();
//! render(editor.galleryDataUrls());
//! ```

use wasm_bindgen::prelude::*;

mod editor;
mod logging;
mod transform;
mod types;

pub use editor::{JsFinishedEdit, JsImageEditor, JsPendingEdit};
pub use transform::{crop_image, flip_image, rotate_image};
pub use types::JsEncodedImage;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    logging::init_logging(log::LevelFilter::Warn);
}

/// Change the console log level (`"error"`, `"warn"`, `"info"`, `"debug"`,
/// `"trace"` or `"off"`). Unknown names select `"warn"`.
#[wasm_bindgen(js_name = setLogLevel)]
pub fn set_log_level(level: &str) {
    logging::init_logging(logging::level_from_str(level));
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
