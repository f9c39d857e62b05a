#![doc = include_str!("../README.md")]

// Public modules
pub mod config;
pub mod detector;
pub mod diagnostics;
pub mod error;
pub mod image;
pub mod pyramid;
pub mod types;

// --- High-level re-exports -------------------------------------------------

// Main entry points: driver, parameters and results.
pub use crate::detector::{CascadeModel, DetectionParams, MultiScaleDetector};
pub use crate::types::{Detection, DetectionBatch};

// Errors surfaced by the public API.
pub use crate::error::{ConfigError, DetectorError, ImageError, PipelineError, RunError};

// High-level diagnostics returned by the driver.
pub use crate::diagnostics::{DetectionReport, PipelineTrace};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use cascade_pyramid::prelude::*;
///
/// struct Nothing;
///
/// impl ObjectDetector for Nothing {
///     fn find_objects(
///         &self,
///         _model: &CascadeModel,
///         request: &ScanRequest<'_>,
///     ) -> Result<DetectionBatch, DetectorError> {
///         Ok(DetectionBatch::with_capacity(request.max_results))
///     }
/// }
///
/// # fn main() {
/// let (w, h) = (640usize, 480usize);
/// let gray = vec![0u8; w * h];
/// let img = ImageU8 { w, h, stride: w, data: &gray };
///
/// let model = CascadeModel::from_bytes(Vec::<u8>::new());
/// let det = MultiScaleDetector::with_default_clustering(
///     DetectionParams { use_pyramid: true, ..Default::default() },
///     model,
///     Nothing,
/// )
/// .unwrap();
///
/// let report = det.process_gray(img).unwrap();
/// println!("found={} latency_ms={:.3}", report.detections.len(), report.elapsed_ms);
/// # }
/// ```
pub mod prelude {
    pub use crate::detector::{Clusterer, ObjectDetector, OverlapClusterer, ScanRequest};
    pub use crate::image::{ImageU8, SourceImage};
    pub use crate::{
        CascadeModel, Detection, DetectionBatch, DetectionParams, DetectorError,
        MultiScaleDetector,
    };
}

// --- Stage-level API (for tools & advanced users) --------------------------

pub mod stages {
    // Stage runners.
    pub use crate::detector::{
        cluster_stage, filter_by_score, level_bounds, scan_level, Aggregator, LevelOutcome,
        LevelScan, PipelineStage, SizeBounds,
    };
    pub use crate::pyramid::{build_pyramid, Pyramid, PyramidOptions, PyramidResult};

    // Structured diagnostics types.
    pub use crate::diagnostics::{
        DetectionCounts, InputDescriptor, PyramidLevelReport, PyramidStage, ScanLevelReport,
        StageTiming, TimingBreakdown,
    };
}
