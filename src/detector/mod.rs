//! Multi-scale detection driver around an external cascade classifier.
//!
//! Overview
//! - Converts the frame to gray and builds a 2× pyramid (or keeps level 0
//!   only when the pyramid is disabled).
//! - Scans each level with the external detector, bounding object sizes per
//!   level and capping every call at the remaining detection budget.
//! - Lifts level-local detections to level-0 coordinates (`× 2^level`) and
//!   concatenates them in level order.
//! - Hands the aggregate to the external clusterer, then keeps detections
//!   scoring at least `qthreshold`.
//!
//! Modules
//! - [`params`] – configuration consumed by every stage.
//! - [`external`] – contracts for the scan-and-score and clustering routines.
//! - [`bounds`] – per-level size-bound policy.
//! - `adapter` – one detector invocation per level.
//! - `aggregate` – rescaling and budget enforcement across levels.
//! - [`cluster`] – clustering hand-off, score filter and the default clusterer.
//! - `stage` – the per-image state machine.
//! - `pipeline` – the [`MultiScaleDetector`] driver.
//!
//! Key Ideas
//! - Level 0 is scanned first, so fine-scale detections win the budget.
//! - Coarse levels use a floor on the minimum size that can exceed the
//!   shifted maximum; such levels are skipped rather than scanned.

mod adapter;
mod aggregate;
pub mod bounds;
pub mod cluster;
pub mod external;
pub mod params;
mod pipeline;
mod stage;

pub use adapter::{scan_level, LevelOutcome, LevelScan};
pub use aggregate::Aggregator;
pub use bounds::{level_bounds, SizeBounds};
pub use cluster::{cluster_stage, filter_by_score, overlap, OverlapClusterer};
pub use external::{CascadeModel, Clusterer, ObjectDetector, ScanRequest};
pub use params::{DetectionParams, LevelSizePolicy, DEFAULT_MAX_DETECTIONS};
pub use pipeline::MultiScaleDetector;
pub use stage::PipelineStage;
