//! Assetboard Core - image upload, edit and gallery logic
//!
//! This crate provides everything behind the Assetboard uploader widget that
//! is not drawing: the encoded image value type, decode/encode, the
//! transform engine (rotate, flip, crop), the crop adapter, the edit session
//! state machine, the append-only gallery and the [`Editor`] controller that
//! ties them together.
//!
//! # Flow
//!
//! 1. A picked file opens a session: `original = current = file`
//! 2. Crop, rotate and flip replace `current` with a newly encoded image
//! 3. Save appends `current` to the gallery; cancel discards it

pub mod config;
pub mod cropper;
pub mod decode;
pub mod editor;
pub mod encode;
pub mod encoded;
pub mod error;
pub mod gallery;
pub mod session;
pub mod transform;

#[cfg(test)]
mod test_support;

pub use config::EditorConfig;
pub use cropper::{extract_crop, CropError, CropSurface, Cropper, CropperOptions, ViewMode};
pub use editor::{EditOutcome, Editor, FileSelection, FilePicker, Notice};
pub use encode::OutputEncoding;
pub use encoded::EncodedImage;
pub use error::EditorError;
pub use gallery::Gallery;
pub use session::{
    CommitOutcome, EditOp, EditSession, FinishedEdit, Generation, PendingEdit, SaveOutcome,
    SessionState,
};
pub use transform::{CropRect, FlipAxis};
