//! Owned 8-bit grayscale buffer used for pyramid levels.
use super::{ImageU8, ImageView, ImageViewMut};

/// Owned 8-bit grayscale buffer with stride and borrowed view conversion.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GrayImageU8 {
    width: usize,
    height: usize,
    stride: usize,
    data: Vec<u8>,
}

impl GrayImageU8 {
    /// Zero-filled, tightly packed buffer.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            stride: width,
            data: vec![0; width * height],
        }
    }

    /// Copy the visible pixels of `view`, dropping any row padding.
    pub fn from_view(view: ImageU8<'_>) -> Self {
        let mut out = Self::new(view.w, view.h);
        for (y, src) in view.rows().enumerate() {
            out.row_mut(y).copy_from_slice(src);
        }
        out
    }

    /// Wrap packed row-major bytes. Returns `None` if the length does not match.
    pub fn from_raw(width: usize, height: usize, data: Vec<u8>) -> Option<Self> {
        (data.len() == width * height).then_some(Self {
            width,
            height,
            stride: width,
            data,
        })
    }

    /// Borrow as a read-only `ImageU8` view
    pub fn as_view(&self) -> ImageU8<'_> {
        ImageU8 {
            w: self.width,
            h: self.height,
            stride: self.stride,
            data: &self.data,
        }
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Mean sample value, `0.0` for an empty image.
    pub fn mean_intensity(&self) -> f32 {
        if self.data.is_empty() {
            return 0.0;
        }
        let sum: u64 = self.data.iter().map(|&v| v as u64).sum();
        sum as f32 / self.data.len() as f32
    }
}

impl ImageView for GrayImageU8 {
    type Pixel = u8;

    #[inline]
    fn width(&self) -> usize {
        self.width
    }
    #[inline]
    fn height(&self) -> usize {
        self.height
    }
    #[inline]
    fn stride(&self) -> usize {
        self.stride
    }
    #[inline]
    fn row(&self, y: usize) -> &[u8] {
        let start = y * self.stride;
        &self.data[start..start + self.width]
    }
    #[inline]
    fn as_slice(&self) -> Option<&[u8]> {
        Some(&self.data)
    }
}

impl ImageViewMut for GrayImageU8 {
    #[inline]
    fn row_mut(&mut self, y: usize) -> &mut [u8] {
        let start = y * self.stride;
        let end = start + self.width;
        &mut self.data[start..end]
    }
}

impl From<&image::GrayImage> for GrayImageU8 {
    fn from(img: &image::GrayImage) -> Self {
        Self {
            width: img.width() as usize,
            height: img.height() as usize,
            stride: img.width() as usize,
            data: img.as_raw().clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_view_drops_padding() {
        let data = [10u8, 20, 0, 30, 40];
        let view = ImageU8::new(2, 2, 3, &data).unwrap();
        let owned = GrayImageU8::from_view(view);
        assert_eq!(owned.stride(), 2);
        assert_eq!(owned.into_raw(), vec![10, 20, 30, 40]);
    }

    #[test]
    fn mean_of_empty_image_is_zero() {
        assert_eq!(GrayImageU8::new(0, 4).mean_intensity(), 0.0);
        let img = GrayImageU8::from_raw(2, 1, vec![10, 30]).unwrap();
        assert_eq!(img.mean_intensity(), 20.0);
    }
}
