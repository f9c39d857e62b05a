//! Scale-level adapter: one detector invocation per pyramid level.
//!
//! The adapter owns the decision of whether a level is worth scanning. An
//! exhausted budget, a zero-area level or an inverted size range all yield an
//! empty batch without touching the detector. A detector that answers with
//! more detections than requested is truncated to the request.

use super::bounds::SizeBounds;
use super::external::{CascadeModel, ObjectDetector, ScanRequest};
use super::params::DetectionParams;
use crate::error::PipelineError;
use crate::image::ImageU8;
use crate::types::DetectionBatch;
use log::{debug, warn};
use serde::Serialize;

/// Why a level produced the detections it did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum LevelOutcome {
    /// The detector ran on this level.
    Scanned,
    /// `min_size > max_size`; the detector was not called.
    EmptySizeRange,
    /// The level has zero width or height; the detector was not called.
    EmptyLevel,
    /// The global budget was already spent; the level was skipped.
    BudgetExhausted,
}

/// Result of one level in level-local coordinates.
#[derive(Clone, Debug)]
pub struct LevelScan {
    pub level: usize,
    pub bounds: SizeBounds,
    /// Slots offered to the detector.
    pub requested: usize,
    pub outcome: LevelOutcome,
    /// Detections dropped because the detector exceeded `requested`.
    pub truncated: usize,
    pub detections: DetectionBatch,
}

impl LevelScan {
    fn skipped(level: usize, bounds: SizeBounds, requested: usize, outcome: LevelOutcome) -> Self {
        Self {
            level,
            bounds,
            requested,
            outcome,
            truncated: 0,
            detections: DetectionBatch::with_capacity(requested),
        }
    }
}

/// Run the detector on `image` (pyramid level `level`) with at most
/// `available` result slots.
pub fn scan_level<D>(
    detector: &D,
    model: &CascadeModel,
    params: &DetectionParams,
    image: ImageU8<'_>,
    level: usize,
    bounds: SizeBounds,
    available: usize,
) -> Result<LevelScan, PipelineError>
where
    D: ObjectDetector + ?Sized,
{
    if available == 0 {
        debug!("scan level {level}: budget exhausted, skipping");
        return Ok(LevelScan::skipped(
            level,
            bounds,
            0,
            LevelOutcome::BudgetExhausted,
        ));
    }
    if image.w == 0 || image.h == 0 {
        debug!("scan level {level}: empty level {}x{}", image.w, image.h);
        return Ok(LevelScan::skipped(
            level,
            bounds,
            available,
            LevelOutcome::EmptyLevel,
        ));
    }
    if bounds.is_empty() {
        debug!(
            "scan level {level}: inverted size range [{}, {}], skipping",
            bounds.min, bounds.max
        );
        return Ok(LevelScan::skipped(
            level,
            bounds,
            available,
            LevelOutcome::EmptySizeRange,
        ));
    }

    let request = ScanRequest {
        image,
        angle: params.angle,
        scale_factor: params.scale_factor,
        stride_factor: params.stride_factor,
        min_size: bounds.min,
        max_size: bounds.max,
        max_results: available,
    };
    let raw = detector
        .find_objects(model, &request)
        .map_err(|source| PipelineError::DetectorFailure { level, source })?;

    let yielded = raw.len();
    let truncated = yielded.saturating_sub(available);
    if truncated > 0 {
        warn!(
            "scan level {level}: detector returned {yielded} detections for {available} slots, truncating"
        );
    }
    let detections = DetectionBatch::from_vec(available, raw.into_vec());
    debug!(
        "scan level {level}: {}x{} bounds [{}, {}] -> {} detections",
        image.w,
        image.h,
        bounds.min,
        bounds.max,
        detections.len()
    );

    Ok(LevelScan {
        level,
        bounds,
        requested: available,
        outcome: LevelOutcome::Scanned,
        truncated,
        detections,
    })
}
