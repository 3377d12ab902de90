//! Append-only gallery of finished images.

use std::slice;

use crate::EncodedImage;

/// Ordered collection of saved images. Insertion order is display order.
///
/// There is no way to remove, replace or reorder an entry. Renderers watch
/// [`revision`](Gallery::revision) and rebuild from [`iter`](Gallery::iter)
/// whenever it changes.
#[derive(Debug, Clone, Default)]
pub struct Gallery {
    entries: Vec<EncodedImage>,
    revision: u64,
}

impl Gallery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an image and return its index.
    pub fn append(&mut self, image: EncodedImage) -> usize {
        self.entries.push(image);
        self.revision += 1;
        self.entries.len() - 1
    }

    pub fn get(&self, index: usize) -> Option<&EncodedImage> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, EncodedImage> {
        self.entries.iter()
    }

    pub fn entries(&self) -> &[EncodedImage] {
        &self.entries
    }

    /// Bumped on every change.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

impl<'a> IntoIterator for &'a Gallery {
    type Item = &'a EncodedImage;
    type IntoIter = slice::Iter<'a, EncodedImage>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::png_image;

    #[test]
    fn test_append_preserves_order() {
        let mut gallery = Gallery::new();
        let a = png_image(1, 1);
        let b = png_image(2, 1);

        assert_eq!(gallery.append(a.clone()), 0);
        assert_eq!(gallery.append(b.clone()), 1);

        assert_eq!(gallery.len(), 2);
        assert_eq!(gallery.get(0), Some(&a));
        assert_eq!(gallery.get(1), Some(&b));
        assert_eq!(gallery.get(2), None);
        assert_eq!(gallery.iter().collect::<Vec<_>>(), vec![&a, &b]);
    }

    #[test]
    fn test_revision_tracks_changes() {
        let mut gallery = Gallery::new();
        assert!(gallery.is_empty());
        assert_eq!(gallery.revision(), 0);

        gallery.append(png_image(1, 1));
        gallery.append(png_image(1, 1));
        assert_eq!(gallery.revision(), 2);
    }
}
