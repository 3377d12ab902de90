//! The uploader controller.
//!
//! [`Editor`] owns the edit session, the gallery and the crop widget bound
//! to the current image. UI events come in through its methods and state
//! goes out through its accessors; nothing else holds mutable state.
//!
//! Failures never escape as panics. Decoding a picked file can fail, which
//! aborts the open and queues a [`Notice`] for the UI. Edits that fail are
//! logged, queued as notices and reported as [`EditOutcome::Failed`].

use serde::{Deserialize, Serialize};

use crate::config::EditorConfig;
use crate::cropper::{extract_crop, CropError, CropSurface, Cropper};
use crate::decode::DecodeError;
use crate::encoded::is_image_mime;
use crate::error::EditorError;
use crate::gallery::Gallery;
use crate::session::{
    CommitOutcome, EditOp, EditSession, FinishedEdit, Generation, PendingEdit, SaveOutcome,
};
use crate::transform::{CropRect, FlipAxis};
use crate::EncodedImage;

/// A file handed over by the file input.
#[derive(Debug, Clone, Default)]
pub struct FileSelection {
    pub name: Option<String>,
    /// Declared MIME type, if the picker reported one.
    pub mime: Option<String>,
    pub bytes: Vec<u8>,
}

impl FileSelection {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_mime(mut self, mime: impl Into<String>) -> Self {
        self.mime = Some(mime.into());
        self
    }
}

/// Whoever owns file selection. `Editor::replace` asks it to start a new
/// pick; the chosen file comes back through `Editor::open_file`.
pub trait FilePicker {
    fn request_file(&mut self);
}

impl<F: FnMut()> FilePicker for F {
    fn request_file(&mut self) {
        self()
    }
}

/// A transient message for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub message: String,
}

/// Result of a crop, rotate or flip request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    Applied,
    /// No session is open.
    NoSession,
    /// No crop widget is bound.
    Unavailable,
    /// The session moved on before the edit finished.
    Stale,
    /// The transform failed; a notice was queued.
    Failed,
}

#[derive(Debug, Default)]
pub struct Editor {
    config: EditorConfig,
    session: EditSession,
    gallery: Gallery,
    cropper: Option<Cropper>,
    notices: Vec<Notice>,
}

impl Editor {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Open a session on a freshly picked file. Also serves Replace.
    ///
    /// On failure the current session, if any, is left as it was.
    pub fn open_file(&mut self, file: FileSelection) -> Result<Generation, EditorError> {
        let FileSelection { name, mime, bytes } = file;
        let result = Self::load(mime.as_deref(), bytes).and_then(|image| self.open_image(image));
        if let Err(err) = &result {
            let name = name.as_deref().unwrap_or("selected file");
            log::warn!("Failed to open {name}: {err}");
            self.notify(format!("Could not open {name}: {err}"));
        }
        result
    }

    /// Open a session over a gallery entry. Saving appends a new entry.
    pub fn select_thumbnail(&mut self, index: usize) -> Result<Generation, EditorError> {
        let image = self
            .gallery
            .get(index)
            .cloned()
            .ok_or(EditorError::NoSuchEntry {
                index,
                len: self.gallery.len(),
            })?;
        self.open_image(image)
    }

    fn load(mime: Option<&str>, bytes: Vec<u8>) -> Result<EncodedImage, EditorError> {
        if let Some(mime) = mime.filter(|m| !m.is_empty()) {
            if !is_image_mime(mime) {
                return Err(DecodeError::UnsupportedMime(mime.to_string()).into());
            }
        }

        let image = EncodedImage::from_bytes(bytes)?;
        // Full decode so a truncated file fails here, not on the first edit.
        image.decode()?;
        Ok(image)
    }

    fn open_image(&mut self, image: EncodedImage) -> Result<Generation, EditorError> {
        let cropper = Cropper::mount(image.clone(), self.config.cropper.clone())?;
        let generation = self.session.open(image);
        self.cropper = Some(cropper);
        Ok(generation)
    }

    pub fn rotate(&mut self) -> EditOutcome {
        self.run_edit(EditOp::Rotate)
    }

    pub fn flip(&mut self, axis: FlipAxis) -> EditOutcome {
        self.run_edit(EditOp::Flip { axis })
    }

    /// Replace the current image with the bound cropper's selection.
    pub fn crop(&mut self) -> EditOutcome {
        let generation = self.session.generation();
        let surface = self.cropper.as_ref().map(|c| c as &dyn CropSurface);

        match extract_crop(surface, self.config.output) {
            Ok(image) => self.commit(FinishedEdit::new(generation, image)),
            Err(CropError::Unavailable) => {
                log::warn!("Crop requested but the cropper instance is not available");
                EditOutcome::Unavailable
            }
            Err(err) => self.edit_failed(err.into()),
        }
    }

    fn run_edit(&mut self, op: EditOp) -> EditOutcome {
        let Some(pending) = self.begin_edit(op) else {
            return EditOutcome::NoSession;
        };

        match pending.run(self.config.output) {
            Ok(finished) => self.commit_edit(finished),
            Err(err) => self.edit_failed(err.into()),
        }
    }

    /// Start an edit that the host runs elsewhere, e.g. on a worker.
    ///
    /// Run the returned edit with `config().output` and hand the result to
    /// [`Editor::commit_edit`]. `None` when no session is open.
    pub fn begin_edit(&self, op: EditOp) -> Option<PendingEdit> {
        self.session.begin(op)
    }

    /// Apply an edit started with [`Editor::begin_edit`]. Results from a
    /// session that has since been saved, cancelled or replaced come back
    /// as [`EditOutcome::Stale`] and change nothing.
    pub fn commit_edit(&mut self, finished: FinishedEdit) -> EditOutcome {
        let outcome = self.commit(finished);
        if outcome == EditOutcome::Stale {
            log::debug!("Dropped edit result from a previous session");
        }
        outcome
    }

    fn commit(&mut self, finished: FinishedEdit) -> EditOutcome {
        match self.session.commit(finished) {
            CommitOutcome::Applied => {
                self.rebind_cropper();
                EditOutcome::Applied
            }
            CommitOutcome::Stale => EditOutcome::Stale,
        }
    }

    /// The widget always shows `current`, so it remounts after each edit.
    fn rebind_cropper(&mut self) {
        self.cropper = match self.session.current() {
            Some(image) => match Cropper::mount(image.clone(), self.config.cropper.clone()) {
                Ok(cropper) => Some(cropper),
                Err(err) => {
                    log::warn!("Could not mount cropper on edited image: {err}");
                    None
                }
            },
            None => None,
        };
    }

    fn edit_failed(&mut self, err: EditorError) -> EditOutcome {
        log::warn!("{err}");
        self.notify(err.to_string());
        EditOutcome::Failed
    }

    /// Move the crop box. `None` when no cropper is bound.
    pub fn set_crop_selection(&mut self, rect: CropRect) -> Option<CropRect> {
        self.cropper.as_mut().map(|c| c.set_selection(rect))
    }

    /// Ask `picker` for a replacement file. Does nothing when closed.
    pub fn replace(&mut self, picker: &mut dyn FilePicker) -> bool {
        if !self.session.is_open() {
            return false;
        }
        picker.request_file();
        true
    }

    pub fn save(&mut self) -> SaveOutcome {
        let outcome = self.session.save(&mut self.gallery);
        if let SaveOutcome::Saved { index } = outcome {
            log::info!("Saved image to gallery slot {index}");
            self.cropper = None;
        }
        outcome
    }

    pub fn cancel(&mut self) -> bool {
        self.cropper = None;
        self.session.cancel()
    }

    pub fn is_open(&self) -> bool {
        self.session.is_open()
    }

    pub fn session(&self) -> &EditSession {
        &self.session
    }

    pub fn original(&self) -> Option<&EncodedImage> {
        self.session.original()
    }

    pub fn current(&self) -> Option<&EncodedImage> {
        self.session.current()
    }

    pub fn gallery(&self) -> &Gallery {
        &self.gallery
    }

    pub fn cropper(&self) -> Option<&Cropper> {
        self.cropper.as_ref()
    }

    /// Drain queued notices.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    fn notify(&mut self, message: String) {
        self.notices.push(Notice { message });
    }
}
