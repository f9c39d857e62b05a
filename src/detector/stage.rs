//! Per-image state machine of the driver.
//!
//! ```text
//! Init -> GrayscaleConvert -> PyramidBuild -> Scan(0) -> ... -> Scan(n-1)
//!      -> Aggregate -> Cluster -> Filter -> Done
//! ```
//!
//! Every transition is unconditional; a failure terminates the run in the
//! stage it occurred in (see [`PipelineError::stage`](crate::PipelineError::stage)).

use log::debug;
use serde::Serialize;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "stage", rename_all = "camelCase")]
pub enum PipelineStage {
    Init,
    GrayscaleConvert,
    PyramidBuild,
    Scan { level: usize },
    Aggregate,
    Cluster,
    Filter,
    Done,
}

impl PipelineStage {
    /// Whether `next` is a legal successor of `self`.
    pub fn can_advance_to(self, next: PipelineStage) -> bool {
        use PipelineStage::*;
        matches!(
            (self, next),
            (Init, GrayscaleConvert)
                | (GrayscaleConvert, PyramidBuild)
                | (PyramidBuild, Scan { level: 0 })
                | (Scan { .. }, Aggregate)
                | (Aggregate, Cluster)
                | (Cluster, Filter)
                | (Filter, Done)
        ) || matches!((self, next), (Scan { level: a }, Scan { level: b }) if b == a + 1)
    }

    pub fn is_terminal(self) -> bool {
        self == PipelineStage::Done
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineStage::Init => f.write_str("init"),
            PipelineStage::GrayscaleConvert => f.write_str("grayscale"),
            PipelineStage::PyramidBuild => f.write_str("pyramid"),
            PipelineStage::Scan { level } => write!(f, "scan[{level}]"),
            PipelineStage::Aggregate => f.write_str("aggregate"),
            PipelineStage::Cluster => f.write_str("cluster"),
            PipelineStage::Filter => f.write_str("filter"),
            PipelineStage::Done => f.write_str("done"),
        }
    }
}

/// Records the states a run passes through.
#[derive(Clone, Debug)]
pub(crate) struct StageTracker {
    current: PipelineStage,
    visited: Vec<PipelineStage>,
}

impl StageTracker {
    pub(crate) fn new() -> Self {
        Self {
            current: PipelineStage::Init,
            visited: vec![PipelineStage::Init],
        }
    }

    pub(crate) fn advance(&mut self, next: PipelineStage) {
        debug_assert!(
            self.current.can_advance_to(next),
            "illegal transition {} -> {}",
            self.current,
            next
        );
        debug!("pipeline: {} -> {}", self.current, next);
        self.current = next;
        self.visited.push(next);
    }

    pub(crate) fn current(&self) -> PipelineStage {
        self.current
    }

    pub(crate) fn visited(&self) -> &[PipelineStage] {
        &self.visited
    }
}
