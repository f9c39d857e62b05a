//! Per-level object size bounds.
//!
//! Coarse levels clamp their lower bound to `coarse_min_floor` while the upper
//! bound keeps shrinking with the level, so small configured sizes produce an
//! inverted range (`min > max`) above level 0. Such a range is reported as
//! empty and the level is skipped without calling the detector.

use super::params::DetectionParams;
use serde::Serialize;

/// Inclusive size range handed to one detector call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SizeBounds {
    pub min: u32,
    pub max: u32,
}

impl SizeBounds {
    pub fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    /// True when no size satisfies `min <= size <= max`.
    pub fn is_empty(&self) -> bool {
        self.min > self.max
    }
}

/// Size bounds for `level` of a pyramid whose level 0 is `rows × cols`.
///
/// Without a pyramid the single level-0 pass scans
/// `[min_size, min(rows, cols)]`; the policy constants and `max_size` are
/// ignored in that mode.
pub fn level_bounds(params: &DetectionParams, level: usize, rows: usize, cols: usize) -> SizeBounds {
    if !params.use_pyramid {
        let side = rows.min(cols).min(u32::MAX as usize) as u32;
        return SizeBounds::new(params.min_size, side);
    }
    let policy = &params.level_bounds;
    if level == 0 {
        return SizeBounds::new(
            params.min_size.max(policy.base_min),
            params.max_size.min(policy.base_max),
        );
    }
    let shift = level as u32;
    let min_shifted = params.min_size.checked_shr(shift).unwrap_or(0);
    let max_shifted = params.max_size.checked_shr(shift).unwrap_or(0);
    SizeBounds::new(
        min_shifted.max(policy.coarse_min_floor),
        max_shifted.min(policy.coarse_max),
    )
}
