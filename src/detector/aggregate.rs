//! Cross-level aggregation under a global detection budget.
//!
//! Level-local detections are lifted to level-0 coordinates by multiplying
//! row, column and size by `2^level` and appended in level order. The
//! aggregate is a bounded batch, so the total never exceeds the budget even
//! if a caller ignores [`Aggregator::remaining`].

use super::adapter::LevelScan;
use crate::pyramid::level_scale;
use crate::types::DetectionBatch;

#[derive(Clone, Debug)]
pub struct Aggregator {
    detections: DetectionBatch,
}

impl Aggregator {
    pub fn new(global_max: usize) -> Self {
        Self {
            detections: DetectionBatch::with_capacity(global_max),
        }
    }

    /// Slots still available for deeper levels.
    pub fn remaining(&self) -> usize {
        self.detections.remaining()
    }

    pub fn is_exhausted(&self) -> bool {
        self.detections.is_full()
    }

    pub fn len(&self) -> usize {
        self.detections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.detections.is_empty()
    }

    /// Rescale the detections of `level` and append them; returns how many
    /// were accepted.
    pub fn absorb(&mut self, level: usize, local: DetectionBatch) -> usize {
        if level == 0 {
            return self.detections.extend_bounded(local);
        }
        let factor = level_scale(level);
        self.detections
            .extend_bounded(local.into_iter().map(|d| d.scaled(factor)))
    }

    pub fn absorb_scan(&mut self, scan: LevelScan) -> usize {
        self.absorb(scan.level, scan.detections)
    }

    pub fn finish(self) -> DetectionBatch {
        self.detections
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Detection;

    fn batch(items: &[(f32, f32, f32, f32)]) -> DetectionBatch {
        DetectionBatch::from_vec(
            items.len(),
            items
                .iter()
                .map(|&(r, c, s, q)| Detection::new(r, c, s, q))
                .collect(),
        )
    }

    #[test]
    fn level_zero_is_untouched_and_deeper_levels_scale() {
        let mut agg = Aggregator::new(5);
        agg.absorb(0, batch(&[(10.5, 20.25, 24.0, 3.0)]));
        agg.absorb(3, batch(&[(1.5, 2.0, 9.0, -1.0)]));
        let out = agg.finish();
        assert_eq!(out.as_slice()[0], Detection::new(10.5, 20.25, 24.0, 3.0));
        assert_eq!(out.as_slice()[1], Detection::new(12.0, 16.0, 72.0, -1.0));
    }

    #[test]
    fn budget_caps_the_total() {
        let mut agg = Aggregator::new(3);
        assert_eq!(agg.absorb(0, batch(&[(0.0, 0.0, 1.0, 0.0); 2])), 2);
        assert_eq!(agg.remaining(), 1);
        assert_eq!(agg.absorb(1, batch(&[(1.0, 1.0, 1.0, 0.0); 4])), 1);
        assert!(agg.is_exhausted());
        assert_eq!(agg.absorb(2, batch(&[(2.0, 2.0, 1.0, 0.0)])), 0);
        assert_eq!(agg.finish().len(), 3);
    }

    #[test]
    fn order_is_level_ascending_then_detector_order() {
        let mut agg = Aggregator::new(10);
        agg.absorb(0, batch(&[(3.0, 0.0, 1.0, 0.0), (1.0, 0.0, 1.0, 0.0)]));
        agg.absorb(1, batch(&[(2.0, 0.0, 1.0, 0.0), (0.5, 0.0, 1.0, 0.0)]));
        let rows: Vec<f32> = agg.finish().iter().map(|d| d.row).collect();
        assert_eq!(rows, vec![3.0, 1.0, 4.0, 1.0]);
    }
}
