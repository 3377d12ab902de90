//! Editor configuration.

use serde::{Deserialize, Serialize};

use crate::cropper::CropperOptions;
use crate::encode::OutputEncoding;

/// Settings for an [`Editor`](crate::Editor).
///
/// Every field has a default, so an empty object is a valid configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// Options for the crop widget bound to each session.
    pub cropper: CropperOptions,
    /// Encoding for every transform output.
    pub output: OutputEncoding,
}
