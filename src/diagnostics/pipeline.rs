use crate::detector::PipelineStage;
use crate::diagnostics::{DetectionCounts, PyramidStage, ScanLevelReport, TimingBreakdown};
use crate::types::Detection;
use serde::Serialize;

/// Result produced by [`MultiScaleDetector::process`](crate::MultiScaleDetector).
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionReport {
    /// Final detections in level-0 coordinates, in clustering order.
    pub detections: Vec<Detection>,
    /// Wall-clock time of the scan, aggregate and cluster span.
    pub elapsed_ms: f64,
    pub trace: PipelineTrace,
}

impl DetectionReport {
    /// One `row col size score` line per detection.
    pub fn to_lines(&self) -> String {
        self.detections
            .iter()
            .map(|d| format!("{d}\n"))
            .collect()
    }
}

/// End-to-end trace describing the internal execution of the driver.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineTrace {
    pub input: InputDescriptor,
    /// States visited, `Init` through `Done`.
    pub stages: Vec<PipelineStage>,
    pub timings: TimingBreakdown,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pyramid: Option<PyramidStage>,
    pub levels: Vec<ScanLevelReport>,
    pub counts: DetectionCounts,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub width: usize,
    pub height: usize,
    pub channels: usize,
    pub pyramid_levels: usize,
}
