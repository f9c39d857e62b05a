use crate::error::ImageError;

/// Borrowed 8-bit grayscale view with an explicit row stride.
///
/// Construct through [`ImageU8::new`] to get the layout validated; the public
/// fields stay available for zero-cost views over trusted buffers.
#[derive(Clone, Copy, Debug)]
pub struct ImageU8<'a> {
    pub w: usize,
    pub h: usize,
    pub stride: usize, // samples between rows
    pub data: &'a [u8],
}

impl<'a> ImageU8<'a> {
    /// Validate the layout and wrap `data`.
    ///
    /// Zero-sized views are accepted here; the pipeline rejects them as input.
    pub fn new(w: usize, h: usize, stride: usize, data: &'a [u8]) -> Result<Self, ImageError> {
        if stride < w {
            return Err(ImageError::StrideTooSmall { stride, row_len: w });
        }
        let required = required_len(w, h, stride);
        if data.len() < required {
            return Err(ImageError::BufferTooShort {
                required,
                actual: data.len(),
            });
        }
        Ok(Self { w, h, stride, data })
    }

    /// Tightly packed view (`stride == w`).
    pub fn packed(w: usize, h: usize, data: &'a [u8]) -> Result<Self, ImageError> {
        Self::new(w, h, w, data)
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.stride + x]
    }

    /// Bounds-checked pixel access.
    pub fn try_get(&self, x: usize, y: usize) -> Option<u8> {
        (x < self.w && y < self.h).then(|| self.get(x, y))
    }
}

/// Number of samples a `w × h` image with `stride` occupies (the last row
/// needs no padding).
pub(crate) fn required_len(w: usize, h: usize, stride: usize) -> usize {
    if h == 0 || w == 0 {
        0
    } else {
        (h - 1) * stride + w
    }
}

impl<'a> crate::image::traits::ImageView for ImageU8<'a> {
    type Pixel = u8;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn stride(&self) -> usize {
        self.stride
    }
    #[inline]
    fn row(&self, y: usize) -> &[u8] {
        let start = y * self.stride;
        &self.data[start..start + self.w]
    }
    #[inline]
    fn as_slice(&self) -> Option<&[u8]> {
        (self.stride == self.w).then_some(&self.data[..self.w * self.h])
    }
}
