//! Grayscale image pyramid with 2× bilinear decimation.
//!
//! Level 0 is the grayscale conversion of the caller's frame. Each further
//! level halves both dimensions of the previous one (`floor(w / 2)`,
//! `floor(h / 2)`) with bilinear interpolation. The depth is fixed by
//! [`PyramidOptions`]; a disabled pyramid holds level 0 only.
//!
//! Very small frames can produce zero-area deep levels. They are kept so the
//! level count stays fixed; the scan stage never sends them to the detector.
//!
//! Memory is O(sum of levels), about 4/3 of the base image. Every level owns
//! its buffer and the whole pyramid is dropped when a run completes.

pub mod options;
pub mod resize;
pub mod scaling;

pub use options::{PyramidOptions, DEFAULT_PYRAMID_LEVELS};
pub use resize::{downsample_half, resize_bilinear};
pub use scaling::{level_scale, LevelScaling};

use crate::error::ImageError;
use crate::image::{GrayImageU8, ImageView, SourceImage};
use serde::Serialize;
use std::time::Instant;

#[derive(Clone, Debug, Default)]
pub struct Pyramid {
    pub levels: Vec<GrayImageU8>,
}

impl Pyramid {
    /// Build from an already gray level 0.
    pub fn build(level0: GrayImageU8, options: PyramidOptions) -> Result<Self, ImageError> {
        if level0.is_empty() {
            return Err(ImageError::ZeroArea {
                width: level0.width(),
                height: level0.height(),
            });
        }
        let depth = options.effective_levels();
        let mut levels = Vec::with_capacity(depth);
        levels.push(level0);
        for i in 1..depth {
            let down = downsample_half(&levels[i - 1]);
            levels.push(down);
        }
        Ok(Self { levels })
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn level(&self, index: usize) -> Option<&GrayImageU8> {
        self.levels.get(index)
    }

    /// Scaling of `index` relative to level 0.
    pub fn scaling(&self, index: usize) -> Option<LevelScaling> {
        let base = self.levels.first()?;
        let lvl = self.levels.get(index)?;
        Some(LevelScaling::from_dimensions(
            index,
            lvl.width(),
            lvl.height(),
            base.width(),
            base.height(),
        ))
    }
}

#[derive(Clone, Debug, Serialize, Default)]
pub struct PyramidResult {
    #[serde(skip)]
    pub pyramid: Pyramid,
    pub elapsed_ms: f64,
    pub elapsed_convert_l0_ms: f64,
}

/// Convert `source` to gray and build the pyramid, timing both steps.
pub fn build_pyramid(
    source: &SourceImage<'_>,
    options: PyramidOptions,
) -> Result<PyramidResult, ImageError> {
    let l0_start = Instant::now();
    let l0_image = source.to_gray()?;
    let elapsed_convert_l0_ms = l0_start.elapsed().as_secs_f64() * 1000.0;

    let pyr_start = Instant::now();
    let pyramid = Pyramid::build(l0_image, options)?;
    let elapsed_ms = pyr_start.elapsed().as_secs_f64() * 1000.0;

    Ok(PyramidResult {
        pyramid,
        elapsed_ms,
        elapsed_convert_l0_ms,
    })
}
