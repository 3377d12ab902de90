//! WASM bindings for the uploader controller.
//!
//! `JsImageEditor` wraps the core `Editor`. The page forwards UI events to
//! it (file picked, thumbnail clicked, crop/rotate/flip, save, cancel) and
//! re-renders from its accessors. The Replace button's file input is passed
//! in as a callback at construction, so nothing is looked up by element id.
//!
//! Rotate and flip also come in two halves for hosts that defer the work:
//! `beginRotate`/`beginFlip` hand out a `JsPendingEdit`, its `run()` does
//! the transform, and `commitEdit` applies the result unless the session
//! has moved on, in which case it reports `"stale"`.

use assetboard_core::transform::TransformError;
use assetboard_core::{
    CropRect, EditOp, EditOutcome, Editor, EditorConfig, EditorError, FilePicker,
    FileSelection, FinishedEdit, OutputEncoding, PendingEdit, SaveOutcome,
};
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::transform::axis_from_bool;
use crate::types::{to_js_error, JsEncodedImage};

/// Summary of editor state for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
struct EditorSnapshot {
    open: bool,
    generation: u64,
    gallery_len: usize,
    gallery_revision: u64,
    selection: Option<CropRect>,
}

/// Calls the JavaScript replace callback, keeping any exception it throws.
struct CallbackPicker<'a> {
    callback: &'a js_sys::Function,
    error: Option<JsValue>,
}

impl FilePicker for CallbackPicker<'_> {
    fn request_file(&mut self) {
        if let Err(err) = self.callback.call0(&JsValue::NULL) {
            self.error = Some(err);
        }
    }
}

/// A rotate or flip started on the current image but not yet applied.
#[wasm_bindgen]
pub struct JsPendingEdit {
    inner: PendingEdit,
    encoding: OutputEncoding,
}

#[wasm_bindgen]
impl JsPendingEdit {
    /// Session generation the edit was started in.
    #[wasm_bindgen(getter)]
    pub fn generation(&self) -> u64 {
        self.inner.generation().get()
    }

    /// Run the transform. Consumes the edit.
    pub fn run(self) -> Result<JsFinishedEdit, JsValue> {
        self.run_inner().map_err(to_js_error)
    }
}

impl JsPendingEdit {
    fn run_inner(self) -> Result<JsFinishedEdit, TransformError> {
        let inner = self.inner.run(self.encoding)?;
        Ok(JsFinishedEdit { inner })
    }
}

/// Output of `JsPendingEdit.run`, ready for `commitEdit`.
#[wasm_bindgen]
pub struct JsFinishedEdit {
    inner: FinishedEdit,
}

#[wasm_bindgen]
impl JsFinishedEdit {
    #[wasm_bindgen(getter)]
    pub fn generation(&self) -> u64 {
        self.inner.generation().get()
    }
}

#[wasm_bindgen]
pub struct JsImageEditor {
    inner: Editor,
    on_replace: Option<js_sys::Function>,
}

#[wasm_bindgen]
impl JsImageEditor {
    /// Create an editor.
    ///
    /// `config` is an optional object such as
    /// `{ cropper: { aspectRatio: 1.5 }, output: { format: "jpeg", quality: 90 } }`.
    /// `on_replace` is invoked when the user asks to replace the image; it
    /// should open the file picker and later call `openFile`.
    #[wasm_bindgen(constructor)]
    pub fn new(
        config: JsValue,
        on_replace: Option<js_sys::Function>,
    ) -> Result<JsImageEditor, JsValue> {
        let config = if config.is_undefined() || config.is_null() {
            EditorConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)?
        };
        Ok(Self::with_config(config, on_replace))
    }

    /// Open a session on a picked file. Returns the session generation.
    ///
    /// On failure the previous session stays open and a notice is queued.
    #[wasm_bindgen(js_name = openFile)]
    pub fn open_file(
        &mut self,
        bytes: Vec<u8>,
        name: Option<String>,
        mime: Option<String>,
    ) -> Result<u64, JsValue> {
        self.open_file_inner(bytes, name, mime).map_err(to_js_error)
    }

    /// Open a session over gallery entry `index`.
    #[wasm_bindgen(js_name = selectThumbnail)]
    pub fn select_thumbnail(&mut self, index: usize) -> Result<u64, JsValue> {
        self.inner
            .select_thumbnail(index)
            .map(|generation| generation.get())
            .map_err(to_js_error)
    }

    /// Replace the current image with the crop selection.
    pub fn crop(&mut self) -> String {
        outcome_name(self.inner.crop()).to_string()
    }

    /// Rotate the current image 90 degrees clockwise.
    pub fn rotate(&mut self) -> String {
        outcome_name(self.inner.rotate()).to_string()
    }

    pub fn flip(&mut self, horizontal: bool) -> String {
        outcome_name(self.inner.flip(axis_from_bool(horizontal))).to_string()
    }

    /// Start a rotation to run later. `undefined` when no session is open.
    #[wasm_bindgen(js_name = beginRotate)]
    pub fn begin_rotate(&self) -> Option<JsPendingEdit> {
        self.begin_inner(EditOp::Rotate)
    }

    #[wasm_bindgen(js_name = beginFlip)]
    pub fn begin_flip(&self, horizontal: bool) -> Option<JsPendingEdit> {
        self.begin_inner(EditOp::Flip {
            axis: axis_from_bool(horizontal),
        })
    }

    /// Apply a finished edit: `"applied"`, or `"stale"` if the session
    /// was saved, cancelled or replaced in the meantime.
    #[wasm_bindgen(js_name = commitEdit)]
    pub fn commit_edit(&mut self, finished: JsFinishedEdit) -> String {
        outcome_name(self.inner.commit_edit(finished.inner)).to_string()
    }

    /// Move the crop box; returns the applied rectangle or `undefined`.
    #[wasm_bindgen(js_name = setCropSelection)]
    pub fn set_crop_selection(
        &mut self,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    ) -> Result<JsValue, JsValue> {
        let applied = self
            .inner
            .set_crop_selection(CropRect::new(x, y, width, height));
        Ok(serde_wasm_bindgen::to_value(&applied)?)
    }

    /// Ask the registered callback for a replacement file.
    pub fn replace(&mut self) -> Result<bool, JsValue> {
        let Some(callback) = self.on_replace.as_ref() else {
            log::warn!("Replace requested but no file picker callback is registered");
            return Ok(false);
        };

        let mut picker = CallbackPicker {
            callback,
            error: None,
        };
        let requested = self.inner.replace(&mut picker);
        match picker.error {
            Some(err) => Err(err),
            None => Ok(requested),
        }
    }

    /// Save the current image to the gallery. Returns its index, or
    /// `undefined` when there was nothing to save.
    pub fn save(&mut self) -> Option<usize> {
        self.save_inner()
    }

    /// Discard edits. Returns whether a session was open.
    pub fn cancel(&mut self) -> bool {
        self.inner.cancel()
    }

    #[wasm_bindgen(getter, js_name = isOpen)]
    pub fn is_open(&self) -> bool {
        self.inner.is_open()
    }

    /// The image being edited, as a data URL.
    #[wasm_bindgen(js_name = currentDataUrl)]
    pub fn current_data_url(&self) -> Option<String> {
        self.inner.current().map(|img| img.to_data_url())
    }

    #[wasm_bindgen(js_name = currentImage)]
    pub fn current_image(&self) -> Option<JsEncodedImage> {
        self.inner.current().cloned().map(JsEncodedImage::from_encoded)
    }

    #[wasm_bindgen(getter, js_name = galleryLength)]
    pub fn gallery_length(&self) -> usize {
        self.inner.gallery().len()
    }

    #[wasm_bindgen(getter, js_name = galleryRevision)]
    pub fn gallery_revision(&self) -> u64 {
        self.inner.gallery().revision()
    }

    #[wasm_bindgen(js_name = galleryItem)]
    pub fn gallery_item(&self, index: usize) -> Option<JsEncodedImage> {
        self.inner
            .gallery()
            .get(index)
            .cloned()
            .map(JsEncodedImage::from_encoded)
    }

    /// Every gallery entry as a data URL, in display order.
    #[wasm_bindgen(js_name = galleryDataUrls)]
    pub fn gallery_data_urls(&self) -> Vec<String> {
        self.inner
            .gallery()
            .iter()
            .map(|img| img.to_data_url())
            .collect()
    }

    /// Drain pending user-facing messages.
    #[wasm_bindgen(js_name = takeNotices)]
    pub fn take_notices(&mut self) -> Vec<String> {
        self.inner
            .take_notices()
            .into_iter()
            .map(|notice| notice.message)
            .collect()
    }

    /// `{ open, generation, galleryLen, galleryRevision, selection }`
    pub fn snapshot(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(&self.snapshot_inner())?)
    }
}

impl JsImageEditor {
    pub(crate) fn with_config(config: EditorConfig, on_replace: Option<js_sys::Function>) -> Self {
        Self {
            inner: Editor::new(config),
            on_replace,
        }
    }

    fn open_file_inner(
        &mut self,
        bytes: Vec<u8>,
        name: Option<String>,
        mime: Option<String>,
    ) -> Result<u64, EditorError> {
        let file = FileSelection {
            name,
            mime,
            bytes,
        };
        self.inner.open_file(file).map(|generation| generation.get())
    }

    fn begin_inner(&self, op: EditOp) -> Option<JsPendingEdit> {
        let encoding = self.inner.config().output;
        self.inner
            .begin_edit(op)
            .map(|inner| JsPendingEdit { inner, encoding })
    }

    fn save_inner(&mut self) -> Option<usize> {
        match self.inner.save() {
            SaveOutcome::Saved { index } => Some(index),
            SaveOutcome::Refused => None,
        }
    }

    fn snapshot_inner(&self) -> EditorSnapshot {
        EditorSnapshot {
            open: self.inner.is_open(),
            generation: self.inner.session().generation().get(),
            gallery_len: self.inner.gallery().len(),
            gallery_revision: self.inner.gallery().revision(),
            selection: self.inner.cropper().map(|c| c.selection()),
        }
    }
}

fn outcome_name(outcome: EditOutcome) -> &'static str {
    match outcome {
        EditOutcome::Applied => "applied",
        EditOutcome::NoSession => "noSession",
        EditOutcome::Unavailable => "unavailable",
        EditOutcome::Stale => "stale",
        EditOutcome::Failed => "failed",
    }
}
