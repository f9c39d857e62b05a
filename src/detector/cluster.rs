//! Cluster and score-filter stage.
//!
//! Clustering is delegated to a [`Clusterer`]; the stage only forwards the
//! aggregated batch and accepts the reduced batch it gets back. Filtering
//! keeps a detection iff `score >= qthreshold` and never reorders.
//!
//! [`OverlapClusterer`] is the default routine: greedy grouping by square
//! overlap, anchored on the first unassigned detection.

use super::external::Clusterer;
use crate::types::{Detection, DetectionBatch};
use log::warn;
use serde::{Deserialize, Serialize};

/// Run `clusterer` (if any) over `detections`.
///
/// A result longer than the input breaks the contract and is truncated.
pub fn cluster_stage<C>(clusterer: Option<&C>, detections: DetectionBatch) -> DetectionBatch
where
    C: Clusterer + ?Sized,
{
    let Some(clusterer) = clusterer else {
        return detections;
    };
    let input_len = detections.len();
    let capacity = detections.capacity();
    let mut clustered = clusterer.cluster(detections);
    if clustered.len() > input_len {
        warn!(
            "clusterer returned {} detections for {} inputs, truncating",
            clustered.len(),
            input_len
        );
        clustered.truncate(input_len);
    }
    DetectionBatch::from_vec(capacity.max(clustered.len()), clustered.into_vec())
}

/// Keep detections with `score >= qthreshold`, preserving order.
pub fn filter_by_score(mut detections: DetectionBatch, qthreshold: f32) -> DetectionBatch {
    detections.retain(|d| d.score >= qthreshold);
    detections
}

/// Ratio of intersection to union of two square detections.
pub fn overlap(a: &Detection, b: &Detection) -> f32 {
    let (at, al, ab, ar) = a.bounds();
    let (bt, bl, bb, br) = b.bounds();
    let inter_h = (ab.min(bb) - at.max(bt)).max(0.0);
    let inter_w = (ar.min(br) - al.max(bl)).max(0.0);
    let inter = inter_h * inter_w;
    let union = a.size * a.size + b.size * b.size - inter;
    if union > 0.0 {
        inter / union
    } else {
        0.0
    }
}

/// Greedy overlap clustering.
///
/// Each unassigned detection opens a group and absorbs every later
/// unassigned detection whose overlap with it exceeds `min_overlap`. A group
/// becomes one detection with the mean row, column and size and the summed
/// score. Groups are emitted in the order of their first member.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlapClusterer {
    pub min_overlap: f32,
}

impl Default for OverlapClusterer {
    fn default() -> Self {
        Self { min_overlap: 0.3 }
    }
}

impl Clusterer for OverlapClusterer {
    fn cluster(&self, detections: DetectionBatch) -> DetectionBatch {
        let capacity = detections.capacity();
        let items = detections.as_slice();
        let mut assigned = vec![false; items.len()];
        let mut out = Vec::new();

        for i in 0..items.len() {
            if assigned[i] {
                continue;
            }
            assigned[i] = true;
            let anchor = items[i];
            let (mut r, mut c, mut s, mut q) = (anchor.row, anchor.col, anchor.size, anchor.score);
            let mut members = 1usize;
            for j in (i + 1)..items.len() {
                if assigned[j] || overlap(&anchor, &items[j]) <= self.min_overlap {
                    continue;
                }
                assigned[j] = true;
                let d = items[j];
                r += d.row;
                c += d.col;
                s += d.size;
                q += d.score;
                members += 1;
            }
            let n = members as f32;
            out.push(Detection::new(r / n, c / n, s / n, q));
        }

        DetectionBatch::from_vec(capacity, out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch(items: Vec<Detection>) -> DetectionBatch {
        DetectionBatch::from_vec(items.len(), items)
    }

    #[test]
    fn overlap_of_identical_and_disjoint_squares() {
        let a = Detection::new(10.0, 10.0, 4.0, 0.0);
        assert_eq!(overlap(&a, &a), 1.0);
        let far = Detection::new(50.0, 50.0, 4.0, 0.0);
        assert_eq!(overlap(&a, &far), 0.0);
        // half shifted: intersection 8, union 24
        let half = Detection::new(10.0, 12.0, 4.0, 0.0);
        assert!((overlap(&a, &half) - 1.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn overlapping_detections_merge_into_one() {
        let input = batch(vec![
            Detection::new(10.0, 10.0, 20.0, 2.0),
            Detection::new(80.0, 80.0, 20.0, 1.0),
            Detection::new(12.0, 10.0, 20.0, 3.0),
        ]);
        let out = OverlapClusterer::default().cluster(input);
        assert_eq!(out.len(), 2);
        assert_eq!(out.as_slice()[0], Detection::new(11.0, 10.0, 20.0, 5.0));
        assert_eq!(out.as_slice()[1], Detection::new(80.0, 80.0, 20.0, 1.0));
    }

    #[test]
    fn disabled_clustering_passes_through() {
        let input = batch(vec![
            Detection::new(1.0, 1.0, 2.0, 0.0),
            Detection::new(1.0, 1.0, 2.0, 0.0),
        ]);
        let out = cluster_stage::<OverlapClusterer>(None, input.clone());
        assert_eq!(out, input);
    }

    #[test]
    fn growing_clusterer_is_truncated() {
        let grow = |b: DetectionBatch| {
            let mut items = b.into_vec();
            items.extend(items.clone());
            DetectionBatch::from_vec(items.len(), items)
        };
        let input = batch(vec![Detection::new(1.0, 1.0, 2.0, 0.0)]);
        let out = cluster_stage(Some(&grow), input);
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn filter_keeps_scores_at_or_above_threshold() {
        let input = batch(vec![
            Detection::new(0.0, 0.0, 1.0, 1.0),
            Detection::new(0.0, 0.0, 1.0, 0.5),
            Detection::new(0.0, 0.0, 1.0, 2.0),
        ]);
        let kept: Vec<f32> = filter_by_score(input.clone(), 1.0)
            .iter()
            .map(|d| d.score)
            .collect();
        assert_eq!(kept, vec![1.0, 2.0]);
        assert!(filter_by_score(input.clone(), f32::INFINITY).is_empty());
        assert_eq!(filter_by_score(input.clone(), f32::NEG_INFINITY), input);
    }
}
