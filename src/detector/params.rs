//! Parameter types configuring the detector stages.
//!
//! Defaults reproduce the original command-line detector: objects between
//! 25 and 30 pixels, upright scanning, a 1.3 scale step, a stride of 10% of
//! the window size, a permissive threshold, pyramid off and clustering on.

use crate::error::PipelineError;
use crate::pyramid::{PyramidOptions, DEFAULT_PYRAMID_LEVELS};
use serde::{Deserialize, Serialize};

/// Capacity of the detection budget used by the original detector.
pub const DEFAULT_MAX_DETECTIONS: usize = 5;

/// Deepest supported pyramid. Size bounds are shifted by the level index, so
/// anything deeper than the bit width of the sizes is meaningless.
pub const MAX_PYRAMID_LEVELS: usize = 16;

/// Constants of the per-level size-bound policy.
///
/// Level 0 scans `[max(min, base_min), min(max, base_max)]`; level `i > 0`
/// scans `[max(coarse_min_floor, min >> i), min(coarse_max, max >> i)]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelSizePolicy {
    pub base_min: u32,
    pub base_max: u32,
    pub coarse_min_floor: u32,
    pub coarse_max: u32,
}

impl Default for LevelSizePolicy {
    fn default() -> Self {
        Self {
            base_min: 16,
            base_max: 128,
            coarse_min_floor: 64,
            coarse_max: 128,
        }
    }
}

/// Detector-wide parameters, immutable for the lifetime of a
/// [`MultiScaleDetector`](crate::MultiScaleDetector).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionParams {
    /// Smallest object size (pixels, full resolution).
    pub min_size: u32,
    /// Largest object size (pixels, full resolution).
    pub max_size: u32,
    /// In-plane rotation handed to the detector, in turns (0.0 = upright).
    pub angle: f32,
    /// Multiplicative step between scanned window sizes (> 1).
    pub scale_factor: f32,
    /// Scan step as a fraction of the current window size (> 0).
    pub stride_factor: f32,
    /// Minimum score for a detection to be reported.
    pub qthreshold: f32,
    /// Scan a 2× pyramid instead of a single full-resolution pass.
    pub use_pyramid: bool,
    /// Skip the clustering stage.
    pub no_clustering: bool,
    /// Global detection budget per image.
    pub max_detections: usize,
    /// Pyramid depth when `use_pyramid` is set.
    pub pyramid_levels: usize,
    pub level_bounds: LevelSizePolicy,
}

impl Default for DetectionParams {
    fn default() -> Self {
        Self {
            min_size: 25,
            max_size: 30,
            angle: 0.0,
            scale_factor: 1.3,
            stride_factor: 0.1,
            qthreshold: -99.0,
            use_pyramid: false,
            no_clustering: false,
            max_detections: DEFAULT_MAX_DETECTIONS,
            pyramid_levels: DEFAULT_PYRAMID_LEVELS,
            level_bounds: LevelSizePolicy::default(),
        }
    }
}

impl DetectionParams {
    /// Reject parameter sets the pipeline cannot run with.
    pub fn validate(&self) -> Result<(), PipelineError> {
        let invalid = |msg: String| Err(PipelineError::InvalidConfig(msg));
        if self.min_size == 0 {
            return invalid("min_size must be positive".into());
        }
        // single-pass mode bounds sizes by the frame, not by max_size
        if self.use_pyramid && self.min_size > self.max_size {
            return invalid(format!(
                "min_size ({}) exceeds max_size ({})",
                self.min_size, self.max_size
            ));
        }
        if !self.scale_factor.is_finite() || self.scale_factor <= 1.0 {
            return invalid(format!(
                "scale_factor must be finite and > 1, got {}",
                self.scale_factor
            ));
        }
        if !self.stride_factor.is_finite() || self.stride_factor <= 0.0 {
            return invalid(format!(
                "stride_factor must be finite and > 0, got {}",
                self.stride_factor
            ));
        }
        if !self.angle.is_finite() {
            return invalid(format!("angle must be finite, got {}", self.angle));
        }
        if self.qthreshold.is_nan() {
            return invalid("qthreshold must not be NaN".into());
        }
        if self.max_detections == 0 {
            return invalid("max_detections must be positive".into());
        }
        if self.pyramid_levels == 0 || self.pyramid_levels > MAX_PYRAMID_LEVELS {
            return invalid(format!(
                "pyramid_levels must be in 1..={MAX_PYRAMID_LEVELS}, got {}",
                self.pyramid_levels
            ));
        }
        Ok(())
    }

    pub fn pyramid_options(&self) -> PyramidOptions {
        if self.use_pyramid {
            PyramidOptions::new(self.pyramid_levels)
        } else {
            PyramidOptions::disabled()
        }
    }

    pub fn clustering_enabled(&self) -> bool {
        !self.no_clustering
    }
}
