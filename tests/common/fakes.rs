use cascade_pyramid::prelude::*;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

/// What the detector saw on one call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RecordedCall {
    pub rows: usize,
    pub cols: usize,
    pub min_size: u32,
    pub max_size: u32,
    pub max_results: usize,
}

/// Detector answering from a script keyed by level width.
///
/// Levels without a script entry yield nothing. The fake honours
/// `max_results` unless `ignore_limit` is set.
#[derive(Default)]
pub struct ScriptedDetector {
    script: HashMap<usize, Vec<Detection>>,
    fail_on_cols: Option<usize>,
    ignore_limit: bool,
    calls: RefCell<Vec<RecordedCall>>,
}

impl ScriptedDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_level_width(mut self, cols: usize, detections: Vec<Detection>) -> Self {
        self.script.insert(cols, detections);
        self
    }

    pub fn failing_on_width(mut self, cols: usize) -> Self {
        self.fail_on_cols = Some(cols);
        self
    }

    pub fn ignoring_limit(mut self) -> Self {
        self.ignore_limit = true;
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.borrow().clone()
    }

    pub fn reset(&self) {
        self.calls.borrow_mut().clear();
    }
}

impl ObjectDetector for ScriptedDetector {
    fn find_objects(
        &self,
        _model: &CascadeModel,
        request: &ScanRequest<'_>,
    ) -> Result<DetectionBatch, DetectorError> {
        self.calls.borrow_mut().push(RecordedCall {
            rows: request.rows(),
            cols: request.cols(),
            min_size: request.min_size,
            max_size: request.max_size,
            max_results: request.max_results,
        });
        if self.fail_on_cols == Some(request.cols()) {
            return Err(DetectorError::new(format!(
                "scripted failure on a {}-wide level",
                request.cols()
            )));
        }
        let mut items = self.script.get(&request.cols()).cloned().unwrap_or_default();
        let capacity = if self.ignore_limit {
            items.len()
        } else {
            items.truncate(request.max_results);
            request.max_results
        };
        Ok(DetectionBatch::from_vec(capacity, items))
    }
}

/// Clusterer that passes detections through and counts invocations.
#[derive(Default)]
pub struct CountingClusterer {
    pub calls: Cell<usize>,
}

impl Clusterer for CountingClusterer {
    fn cluster(&self, detections: DetectionBatch) -> DetectionBatch {
        self.calls.set(self.calls.get() + 1);
        detections
    }
}

pub fn det(row: f32, col: f32, size: f32, score: f32) -> Detection {
    Detection::new(row, col, size, score)
}

pub fn model() -> CascadeModel {
    CascadeModel::from_bytes(vec![0xCAu8, 0xFE])
}
