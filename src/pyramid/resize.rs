//! Bilinear resampling for 8-bit gray images.
//!
//! Sampling follows the half-pixel-centre convention
//! `src = (dst + 0.5) * scale - 0.5` with clamp-to-edge borders, so an exact
//! 2× reduction averages each 2×2 block. Column taps are computed once per
//! call and reused for every output row.
use crate::image::{GrayImageU8, ImageView, ImageViewMut};

#[derive(Clone, Copy, Debug, PartialEq)]
struct Tap {
    i0: usize,
    i1: usize,
    w1: f32,
}

fn compute_taps(src_len: usize, dst_len: usize) -> Vec<Tap> {
    let scale = src_len as f32 / dst_len as f32;
    let last = src_len - 1;
    (0..dst_len)
        .map(|d| {
            let f = (d as f32 + 0.5) * scale - 0.5;
            if f <= 0.0 {
                return Tap { i0: 0, i1: 0, w1: 0.0 };
            }
            let base = f.floor();
            let i0 = base as usize;
            if i0 >= last {
                return Tap {
                    i0: last,
                    i1: last,
                    w1: 0.0,
                };
            }
            Tap {
                i0,
                i1: i0 + 1,
                w1: f - base,
            }
        })
        .collect()
}

/// Resize `src` into `dst` (whose size selects the output resolution).
pub fn resize_bilinear<I>(src: &I, dst: &mut GrayImageU8)
where
    I: ImageView<Pixel = u8>,
{
    if dst.is_empty() || src.is_empty() {
        return;
    }
    let xs = compute_taps(src.width(), dst.width());
    let ys = compute_taps(src.height(), dst.height());
    for (y, ty) in ys.iter().enumerate() {
        let r0 = src.row(ty.i0);
        let r1 = src.row(ty.i1);
        let wy1 = ty.w1;
        let wy0 = 1.0 - wy1;
        let dst_row = dst.row_mut(y);
        for (dst_px, tx) in dst_row.iter_mut().zip(&xs) {
            let wx0 = 1.0 - tx.w1;
            let top = r0[tx.i0] as f32 * wx0 + r0[tx.i1] as f32 * tx.w1;
            let bottom = r1[tx.i0] as f32 * wx0 + r1[tx.i1] as f32 * tx.w1;
            let v = top * wy0 + bottom * wy1;
            *dst_px = (v + 0.5).min(255.0) as u8;
        }
    }
}

/// Halve both dimensions (floor) with bilinear interpolation.
pub fn downsample_half<I>(src: &I) -> GrayImageU8
where
    I: ImageView<Pixel = u8>,
{
    let mut out = GrayImageU8::new(src.width() / 2, src.height() / 2);
    resize_bilinear(src, &mut out);
    out
}
