//! Crop widget configuration.
//!
//! Field names and defaults follow the options the uploader hands its
//! interactive cropper, so a JavaScript options object deserializes as-is.
//! `guides`, `responsive`, `background` and `check_orientation` only affect
//! how the widget draws itself and are passed through untouched.

use serde::{Deserialize, Serialize};

/// How the crop box relates to the image canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ViewMode {
    /// No restrictions; the crop box may extend past the image.
    Free = 0,
    /// The crop box is restricted to the image.
    #[default]
    Restrict = 1,
    /// Like `Restrict`, and the image fits inside its container (contain).
    Fit = 2,
    /// Like `Restrict`, and the image fills its container (cover).
    Fill = 3,
}

impl ViewMode {
    /// Whether the crop box must stay inside the image.
    pub fn restricts_crop_box(self) -> bool {
        !matches!(self, ViewMode::Free)
    }
}

impl TryFrom<u8> for ViewMode {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ViewMode::Free),
            1 => Ok(ViewMode::Restrict),
            2 => Ok(ViewMode::Fit),
            3 => Ok(ViewMode::Fill),
            other => Err(format!("view mode must be 0-3, got {other}")),
        }
    }
}

impl From<ViewMode> for u8 {
    fn from(mode: ViewMode) -> Self {
        mode as u8
    }
}

/// Options for a mounted cropper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CropperOptions {
    /// Draw dashed guide lines over the crop box.
    pub guides: bool,
    /// Re-layout when the container resizes.
    pub responsive: bool,
    /// Fraction (0.0, 1.0] of the image the initial crop box covers.
    pub auto_crop_area: f64,
    /// Aspect ratio of the initial crop box; `None` uses the image's own.
    pub initial_aspect_ratio: Option<f64>,
    /// Locked aspect ratio; `None` leaves the box free.
    pub aspect_ratio: Option<f64>,
    pub view_mode: ViewMode,
    /// Minimum crop box width in pixels.
    pub min_crop_box_width: u32,
    /// Minimum crop box height in pixels.
    pub min_crop_box_height: u32,
    /// Draw the checkered background behind the image.
    pub background: bool,
    /// Read EXIF orientation in the widget itself.
    pub check_orientation: bool,
}

impl Default for CropperOptions {
    fn default() -> Self {
        Self {
            guides: true,
            responsive: true,
            auto_crop_area: 1.0,
            initial_aspect_ratio: Some(1.0),
            aspect_ratio: None,
            view_mode: ViewMode::Restrict,
            min_crop_box_width: 10,
            min_crop_box_height: 10,
            background: false,
            check_orientation: false,
        }
    }
}

impl CropperOptions {
    /// The locked aspect ratio, ignoring non-finite or non-positive values.
    pub fn locked_ratio(&self) -> Option<f64> {
        self.aspect_ratio.filter(|r| valid_ratio(*r))
    }

    /// Aspect ratio for the initial crop box. A lock takes precedence.
    pub fn initial_ratio(&self) -> Option<f64> {
        self.locked_ratio()
            .or(self.initial_aspect_ratio.filter(|r| valid_ratio(*r)))
    }

    /// `auto_crop_area` clamped to (0.0, 1.0].
    pub fn crop_area(&self) -> f64 {
        if self.auto_crop_area.is_finite() && self.auto_crop_area > 0.0 {
            self.auto_crop_area.min(1.0)
        } else {
            1.0
        }
    }
}

fn valid_ratio(ratio: f64) -> bool {
    ratio.is_finite() && ratio > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opts = CropperOptions::default();
        assert!(opts.guides);
        assert_eq!(opts.view_mode, ViewMode::Restrict);
        assert_eq!(opts.initial_ratio(), Some(1.0));
        assert_eq!(opts.locked_ratio(), None);
        assert_eq!((opts.min_crop_box_width, opts.min_crop_box_height), (10, 10));
    }

    #[test]
    fn test_deserialize_camel_case_with_defaults() {
        let opts: CropperOptions =
            serde_json::from_str(r#"{"aspectRatio": 1.5, "viewMode": 0, "minCropBoxWidth": 4}"#)
                .unwrap();

        assert_eq!(opts.locked_ratio(), Some(1.5));
        assert_eq!(opts.initial_ratio(), Some(1.5));
        assert_eq!(opts.view_mode, ViewMode::Free);
        assert_eq!(opts.min_crop_box_width, 4);
        assert_eq!(opts.min_crop_box_height, 10);
        assert!(opts.responsive);
    }

    #[test]
    fn test_invalid_view_mode_rejected() {
        let result: Result<CropperOptions, _> = serde_json::from_str(r#"{"viewMode": 7}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_degenerate_values_fall_back() {
        let opts = CropperOptions {
            auto_crop_area: 0.0,
            aspect_ratio: Some(-2.0),
            initial_aspect_ratio: Some(f64::NAN),
            ..Default::default()
        };
        assert_eq!(opts.crop_area(), 1.0);
        assert_eq!(opts.locked_ratio(), None);
        assert_eq!(opts.initial_ratio(), None);
    }

    #[test]
    fn test_view_mode_restriction() {
        assert!(!ViewMode::Free.restricts_crop_box());
        assert!(ViewMode::Restrict.restricts_crop_box());
        assert!(ViewMode::Fill.restricts_crop_box());
        assert_eq!(u8::from(ViewMode::Fit), 2);
    }
}
