//! A headless crop box bound to one image.
//!
//! This is the state an interactive cropper keeps: the image it is mounted
//! on, its options and the current selection. Dragging and resizing happen
//! in the rendering surface, which reports the new rectangle through
//! [`Cropper::set_selection`]; the constraints below are applied to every
//! update so the selection is always one the widget could display.

use super::{CropError, CropSurface, CropperOptions};
use crate::decode::DecodeError;
use crate::encode::OutputEncoding;
use crate::transform::{crop_encoded, CropRect};
use crate::EncodedImage;

/// Crop box state for a mounted image.
#[derive(Debug, Clone)]
pub struct Cropper {
    image: EncodedImage,
    width: u32,
    height: u32,
    options: CropperOptions,
    selection: CropRect,
}

impl Cropper {
    /// Mount on `image`, reading its dimensions and placing the initial box.
    pub fn mount(image: EncodedImage, options: CropperOptions) -> Result<Self, DecodeError> {
        let (width, height) = image.dimensions()?;
        let mut cropper = Self {
            image,
            width,
            height,
            options,
            selection: CropRect::default(),
        };
        cropper.reset();
        Ok(cropper)
    }

    /// The image this cropper is bound to.
    pub fn image(&self) -> &EncodedImage {
        &self.image
    }

    pub fn image_dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn options(&self) -> &CropperOptions {
        &self.options
    }

    /// The current crop box in image pixels.
    pub fn selection(&self) -> CropRect {
        self.selection
    }

    /// Move or resize the crop box. Returns the rectangle actually applied
    /// after aspect lock, minimum size and containment.
    pub fn set_selection(&mut self, rect: CropRect) -> CropRect {
        self.selection = self.constrain(rect);
        self.selection
    }

    /// Put the crop box back where mounting placed it.
    pub fn reset(&mut self) {
        self.selection = self.initial_selection();
    }

    /// Largest box of the initial ratio that fits, scaled by the auto-crop
    /// area and centered.
    fn initial_selection(&self) -> CropRect {
        let (img_w, img_h) = (self.width as f64, self.height as f64);

        let (mut w, mut h) = match self.options.initial_ratio() {
            Some(ratio) if img_w / img_h > ratio => (img_h * ratio, img_h),
            Some(ratio) => (img_w, img_w / ratio),
            None => (img_w, img_h),
        };

        let area = self.options.crop_area();
        w *= area;
        h *= area;

        let x = ((img_w - w) / 2.0).max(0.0);
        let y = ((img_h - h) / 2.0).max(0.0);
        self.constrain(CropRect::new(
            x.round() as u32,
            y.round() as u32,
            w.round() as u32,
            h.round() as u32,
        ))
    }

    fn constrain(&self, rect: CropRect) -> CropRect {
        let opts = &self.options;
        let ratio = opts.locked_ratio();
        let restricted = opts.view_mode.restricts_crop_box();
        let min_w = opts.min_crop_box_width.max(1) as f64;
        let min_h = opts.min_crop_box_height.max(1) as f64;

        let mut w = (rect.width as f64).max(min_w);
        let mut h = (rect.height as f64).max(min_h);

        if let Some(ratio) = ratio {
            // Width drives the locked height; grow both if that undercuts
            // the minimum height.
            h = w / ratio;
            if h < min_h {
                w = min_h * ratio;
            }
        }

        let (img_w, img_h) = (self.width, self.height);
        let limit = |value: f64, max: u32| -> u32 {
            let value = value.round().max(1.0) as u32;
            if restricted {
                value.min(max.max(1))
            } else {
                value
            }
        };

        // Round the driving side first so the locked side follows the
        // integer size, then clamp the origin against integer extents.
        let (width, height) = match ratio {
            Some(ratio) => {
                if restricted {
                    w = w.min(img_w as f64).min(img_h as f64 * ratio);
                }
                let width = limit(w, img_w);
                (width, limit(width as f64 / ratio, img_h))
            }
            None => (limit(w, img_w), limit(h, img_h)),
        };

        if !restricted {
            return CropRect::new(rect.x, rect.y, width, height);
        }

        CropRect::new(
            rect.x.min(img_w.saturating_sub(width)),
            rect.y.min(img_h.saturating_sub(height)),
            width,
            height,
        )
    }
}

impl CropSurface for Cropper {
    fn cropped_image(&self, encoding: OutputEncoding) -> Result<EncodedImage, CropError> {
        Ok(crop_encoded(&self.image, &self.selection, encoding)?)
    }
}
