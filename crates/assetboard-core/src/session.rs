//! The edit session state machine.
//!
//! A session holds two buffers: the image that was opened (`original`) and
//! the image being edited (`current`). Transforms only ever replace
//! `current`. Save appends `current` to the gallery, cancel throws it away;
//! both close the session.
//!
//! Transforms decode and re-encode, so hosts may run them off the UI event
//! loop. Every edit is split into [`EditSession::begin`], which snapshots the
//! current image together with the session [`Generation`], and
//! [`EditSession::commit`], which drops the result if the session has been
//! closed or reopened in the meantime.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::encode::OutputEncoding;
use crate::gallery::Gallery;
use crate::transform::{self, CropRect, FlipAxis, TransformError};
use crate::EncodedImage;

/// Monotonic session counter. Every open and close moves it forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Generation(u64);

impl Generation {
    fn next(self) -> Self {
        Generation(self.0.wrapping_add(1))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    Closed,
    Open,
}

/// An edit applied to the current image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum EditOp {
    Rotate,
    Flip { axis: FlipAxis },
    Crop { rect: CropRect },
}

/// An edit that has been started but not yet drawn.
#[derive(Debug, Clone)]
pub struct PendingEdit {
    generation: Generation,
    source: EncodedImage,
    op: EditOp,
}

impl PendingEdit {
    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn source(&self) -> &EncodedImage {
        &self.source
    }

    pub fn op(&self) -> EditOp {
        self.op
    }

    /// Decode the source, draw it through the transform and re-encode.
    pub fn run(self, encoding: OutputEncoding) -> Result<FinishedEdit, TransformError> {
        let image = match self.op {
            EditOp::Rotate => transform::rotate_encoded(&self.source, encoding)?,
            EditOp::Flip { axis } => transform::flip_encoded(&self.source, axis, encoding)?,
            EditOp::Crop { rect } => transform::crop_encoded(&self.source, &rect, encoding)?,
        };
        Ok(FinishedEdit::new(self.generation, image))
    }
}

/// A transform result waiting to be committed.
#[derive(Debug, Clone)]
pub struct FinishedEdit {
    generation: Generation,
    image: EncodedImage,
}

impl FinishedEdit {
    /// Tag an image produced elsewhere (e.g. by a crop widget) with the
    /// generation it was started under.
    pub fn new(generation: Generation, image: EncodedImage) -> Self {
        Self { generation, image }
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn image(&self) -> &EncodedImage {
        &self.image
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// `current` now holds the result.
    Applied,
    /// The session changed since the edit began; the result was dropped.
    Stale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// `current` was appended at `index` and the session closed.
    Saved { index: usize },
    /// Nothing to save; nothing changed.
    Refused,
}

/// Original/current buffers of an in-progress edit.
#[derive(Debug, Default)]
pub struct EditSession {
    original: Option<EncodedImage>,
    current: Option<EncodedImage>,
    generation: Generation,
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start editing `image`, replacing any open session.
    pub fn open(&mut self, image: EncodedImage) -> Generation {
        self.generation = self.generation.next();
        self.original = Some(image.clone());
        self.current = Some(image);
        log::debug!("Edit session {} opened", self.generation);
        self.generation
    }

    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }

    pub fn state(&self) -> SessionState {
        if self.is_open() {
            SessionState::Open
        } else {
            SessionState::Closed
        }
    }

    pub fn original(&self) -> Option<&EncodedImage> {
        self.original.as_ref()
    }

    pub fn current(&self) -> Option<&EncodedImage> {
        self.current.as_ref()
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Snapshot the current image for `op`. `None` when closed.
    pub fn begin(&self, op: EditOp) -> Option<PendingEdit> {
        self.current.as_ref().map(|source| PendingEdit {
            generation: self.generation,
            source: source.clone(),
            op,
        })
    }

    /// Install a finished edit as the new current image, unless it belongs
    /// to an earlier session.
    pub fn commit(&mut self, finished: FinishedEdit) -> CommitOutcome {
        if finished.generation != self.generation || !self.is_open() {
            log::debug!(
                "Dropping edit from session {} (now {})",
                finished.generation,
                self.generation
            );
            return CommitOutcome::Stale;
        }

        self.current = Some(finished.image);
        CommitOutcome::Applied
    }

    /// Begin, run and commit `op` in one step. `Ok(None)` when closed.
    pub fn apply(
        &mut self,
        op: EditOp,
        encoding: OutputEncoding,
    ) -> Result<Option<CommitOutcome>, TransformError> {
        let Some(pending) = self.begin(op) else {
            return Ok(None);
        };
        let finished = pending.run(encoding)?;
        Ok(Some(self.commit(finished)))
    }

    /// Append `current` to `gallery` and close.
    pub fn save(&mut self, gallery: &mut Gallery) -> SaveOutcome {
        let (Some(_), Some(current)) = (&self.original, &self.current) else {
            return SaveOutcome::Refused;
        };

        let index = gallery.append(current.clone());
        log::debug!("Edit session {} saved as entry {index}", self.generation);
        self.close();
        SaveOutcome::Saved { index }
    }

    /// Discard edits and close. Returns whether a session was open.
    pub fn cancel(&mut self) -> bool {
        let was_open = self.is_open();
        self.current = self.original.clone();
        self.close();
        if was_open {
            log::debug!("Edit session cancelled");
        }
        was_open
    }

    fn close(&mut self) {
        self.original = None;
        self.current = None;
        self.generation = self.generation.next();
    }
}
