use thiserror::Error;

use crate::cropper::CropError;
use crate::decode::DecodeError;
use crate::transform::TransformError;

/// Errors surfaced by the [`Editor`](crate::Editor).
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("could not open image: {0}")]
    Decode(#[from] DecodeError),

    #[error("no gallery entry at index {index} (gallery has {len})")]
    NoSuchEntry { index: usize, len: usize },

    #[error("edit failed: {0}")]
    Transform(#[from] TransformError),

    #[error("crop failed: {0}")]
    Crop(#[from] CropError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = EditorError::NoSuchEntry { index: 4, len: 2 };
        assert_eq!(err.to_string(), "no gallery entry at index 4 (gallery has 2)");

        let err = EditorError::from(DecodeError::Empty);
        assert_eq!(err.to_string(), "could not open image: Image payload is empty");
    }
}
