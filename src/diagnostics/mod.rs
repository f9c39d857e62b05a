//! Diagnostics data model exposed by the driver.
//!
//! `DetectionReport` is the main entry point: the final detections, the
//! elapsed time of the detection span, and a `PipelineTrace` describing
//! every stage the run went through.

pub mod pipeline;
pub mod pyramid;
pub mod scan;
pub mod timing;

pub use pipeline::{DetectionReport, InputDescriptor, PipelineTrace};
pub use pyramid::{PyramidLevelReport, PyramidStage};
pub use scan::{DetectionCounts, ScanLevelReport};
pub use timing::{StageTiming, TimingBreakdown};
