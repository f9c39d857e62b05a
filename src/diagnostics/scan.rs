use crate::detector::{LevelOutcome, LevelScan, SizeBounds};
use serde::Serialize;

/// Per-level record of the scan loop.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanLevelReport {
    pub level: usize,
    pub bounds: SizeBounds,
    /// Slots offered to the detector (remaining global budget).
    pub requested: usize,
    /// Detections returned by the detector after truncation.
    pub yielded: usize,
    /// Detections kept by the aggregator.
    pub accepted: usize,
    pub truncated: usize,
    pub outcome: LevelOutcome,
    pub elapsed_ms: f64,
}

impl ScanLevelReport {
    pub fn from_scan(scan: &LevelScan, accepted: usize, elapsed_ms: f64) -> Self {
        Self {
            level: scan.level,
            bounds: scan.bounds,
            requested: scan.requested,
            yielded: scan.detections.len(),
            accepted,
            truncated: scan.truncated,
            outcome: scan.outcome,
            elapsed_ms,
        }
    }
}

/// Counts through the aggregate, cluster and filter stages.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionCounts {
    pub aggregated: usize,
    pub clustered: usize,
    pub kept: usize,
    /// True when the budget ran out before the last level was scanned.
    pub budget_exhausted: bool,
}
