//! Caller-owned source frames and their grayscale conversion.
//!
//! Sources may be single-channel or interleaved 3/4-channel 8-bit buffers with
//! an arbitrary row stride (in bytes). Conversion to gray uses the integer
//! luma approximation `Y = (77 R + 150 G + 29 B + 128) >> 8`; a fourth channel
//! is treated as alpha and ignored.
use super::u8::required_len;
use super::{GrayImageU8, ImageU8, ImageViewMut};
use crate::error::ImageError;
use serde::{Deserialize, Serialize};

/// Order of the colour channels in an interleaved source buffer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelOrder {
    #[default]
    Rgb,
    Bgr,
}

/// Borrowed source frame. Never mutated by the pipeline.
#[derive(Clone, Copy, Debug)]
pub struct SourceImage<'a> {
    width: usize,
    height: usize,
    channels: usize,
    stride: usize,
    order: ChannelOrder,
    data: &'a [u8],
}

impl<'a> SourceImage<'a> {
    /// Validate and wrap an interleaved buffer. `stride` is in bytes.
    pub fn new(
        width: usize,
        height: usize,
        channels: usize,
        stride: usize,
        data: &'a [u8],
    ) -> Result<Self, ImageError> {
        if !matches!(channels, 1 | 3 | 4) {
            return Err(ImageError::UnsupportedChannels(channels));
        }
        let row_len = width * channels;
        if stride < row_len {
            return Err(ImageError::StrideTooSmall { stride, row_len });
        }
        let required = required_len(row_len, height, stride);
        if data.len() < required {
            return Err(ImageError::BufferTooShort {
                required,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            channels,
            stride,
            order: ChannelOrder::Rgb,
            data,
        })
    }

    /// Single-channel source from an existing gray view.
    pub fn gray(view: ImageU8<'a>) -> Self {
        Self {
            width: view.w,
            height: view.h,
            channels: 1,
            stride: view.stride,
            order: ChannelOrder::Rgb,
            data: view.data,
        }
    }

    pub fn with_channel_order(mut self, order: ChannelOrder) -> Self {
        self.order = order;
        self
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Convert to an owned gray buffer.
    ///
    /// Fails with [`ImageError::ZeroArea`] when either dimension is zero.
    pub fn to_gray(&self) -> Result<GrayImageU8, ImageError> {
        if self.width == 0 || self.height == 0 {
            return Err(ImageError::ZeroArea {
                width: self.width,
                height: self.height,
            });
        }
        if self.channels == 1 {
            return Ok(GrayImageU8::from_view(ImageU8 {
                w: self.width,
                h: self.height,
                stride: self.stride,
                data: self.data,
            }));
        }

        let (ri, bi) = match self.order {
            ChannelOrder::Rgb => (0, 2),
            ChannelOrder::Bgr => (2, 0),
        };
        let row_len = self.width * self.channels;
        let mut out = GrayImageU8::new(self.width, self.height);
        for y in 0..self.height {
            let start = y * self.stride;
            let src = &self.data[start..start + row_len];
            let dst = out.row_mut(y);
            for (px, dst_px) in src.chunks_exact(self.channels).zip(dst.iter_mut()) {
                *dst_px = luma(px[ri], px[1], px[bi]);
            }
        }
        Ok(out)
    }
}

#[inline]
fn luma(r: u8, g: u8, b: u8) -> u8 {
    ((77 * r as u32 + 150 * g as u32 + 29 * b as u32 + 128) >> 8) as u8
}

/// Grayscale conversion for frames decoded by the `image` crate.
///
/// Colour frames are expanded to packed RGB and converted with the same luma
/// weights as [`SourceImage::to_gray`]. Gray frames are copied as-is.
pub fn gray_from_dynamic(img: &image::DynamicImage) -> Result<GrayImageU8, ImageError> {
    let (width, height) = (img.width() as usize, img.height() as usize);
    if width == 0 || height == 0 {
        return Err(ImageError::ZeroArea { width, height });
    }
    if let image::DynamicImage::ImageLuma8(gray) = img {
        return Ok(GrayImageU8::from(gray));
    }
    let rgb = img.to_rgb8();
    SourceImage::new(width, height, 3, 3 * width, rgb.as_raw())?.to_gray()
}
