//! Driver sequencing the per-image stages.
//!
//! The [`MultiScaleDetector`] exposes a simple API: feed a frame and get the
//! thresholded detections with a detailed trace.
//!
//! ```no_run
//! use cascade_pyramid::prelude::*;
//!
//! # fn example(detector: impl ObjectDetector, blob: Vec<u8>, gray: ImageU8) {
//! let params = DetectionParams {
//!     use_pyramid: true,
//!     ..Default::default()
//! };
//! let model = CascadeModel::from_bytes(blob);
//! let pipeline = MultiScaleDetector::with_default_clustering(params, model, detector).unwrap();
//! let report = pipeline.process_gray(gray).unwrap();
//! print!("{}", report.to_lines());
//! # }
//! ```

use super::adapter::{scan_level, LevelOutcome};
use super::aggregate::Aggregator;
use super::bounds::level_bounds;
use super::cluster::{cluster_stage, filter_by_score, OverlapClusterer};
use super::external::{CascadeModel, Clusterer, ObjectDetector};
use super::params::DetectionParams;
use super::stage::{PipelineStage, StageTracker};
use crate::config::{OutputConfig, RunConfig};
use crate::diagnostics::{
    DetectionCounts, DetectionReport, InputDescriptor, PipelineTrace, PyramidStage,
    ScanLevelReport, TimingBreakdown,
};
use crate::error::{PipelineError, RunError};
use crate::image::{gray_from_dynamic, ImageU8, ImageView, SourceImage};
use crate::pyramid::{build_pyramid, Pyramid};
use log::{debug, warn};
use std::time::Instant;

/// Multi-scale detection driver.
///
/// Holds the immutable parameters, the shared model handle and the two
/// external routines. Runs are independent: nothing carries over from one
/// image to the next.
pub struct MultiScaleDetector<D, C = OverlapClusterer> {
    params: DetectionParams,
    model: CascadeModel,
    detector: D,
    clusterer: C,
}

impl<D: ObjectDetector> MultiScaleDetector<D, OverlapClusterer> {
    /// Driver using [`OverlapClusterer`] with its default overlap threshold.
    pub fn with_default_clustering(
        params: DetectionParams,
        model: CascadeModel,
        detector: D,
    ) -> Result<Self, PipelineError> {
        Self::new(params, model, detector, OverlapClusterer::default())
    }

    /// Driver configured by the `params` and `clustering` sections of a
    /// [`RunConfig`].
    pub fn from_run_config(
        config: &RunConfig,
        model: CascadeModel,
        detector: D,
    ) -> Result<Self, PipelineError> {
        Self::new(config.params.clone(), model, detector, config.clustering)
    }
}

impl<D: ObjectDetector, C: Clusterer> MultiScaleDetector<D, C> {
    /// Validate `params` and assemble the driver.
    pub fn new(
        params: DetectionParams,
        model: CascadeModel,
        detector: D,
        clusterer: C,
    ) -> Result<Self, PipelineError> {
        params.validate()?;
        debug!(
            "MultiScaleDetector: sizes [{}, {}], pyramid={} ({} levels), budget={}, clustering={}",
            params.min_size,
            params.max_size,
            params.use_pyramid,
            params.pyramid_options().effective_levels(),
            params.max_detections,
            params.clustering_enabled()
        );
        Ok(Self {
            params,
            model,
            detector,
            clusterer,
        })
    }

    pub fn params(&self) -> &DetectionParams {
        &self.params
    }

    pub fn model(&self) -> &CascadeModel {
        &self.model
    }

    pub fn detector(&self) -> &D {
        &self.detector
    }

    pub fn clusterer(&self) -> &C {
        &self.clusterer
    }

    /// Run the full pipeline on one frame.
    pub fn process(&self, source: &SourceImage<'_>) -> Result<DetectionReport, PipelineError> {
        self.process_with_levels(source).map(|(report, _)| report)
    }

    /// Like [`process`](Self::process), also handing back the pyramid that
    /// was scanned.
    pub fn process_with_levels(
        &self,
        source: &SourceImage<'_>,
    ) -> Result<(DetectionReport, Pyramid), PipelineError> {
        let mut tracker = StageTracker::new();
        let result = self.run(source, &mut tracker);
        if let Err(err) = &result {
            debug!("MultiScaleDetector::process aborted in {}: {err}", tracker.current());
        }
        result
    }

    /// Process one frame and write whatever `output` asks for: the JSON
    /// report to `json_out` and the pyramid levels as PNG under `debug_dir`.
    pub fn process_to(
        &self,
        source: &SourceImage<'_>,
        output: &OutputConfig,
    ) -> Result<DetectionReport, RunError> {
        let (report, pyramid) = self.process_with_levels(source)?;
        output.write(&report, &pyramid)?;
        Ok(report)
    }

    /// Run the pipeline on an already gray frame.
    pub fn process_gray(&self, gray: ImageU8<'_>) -> Result<DetectionReport, PipelineError> {
        self.process(&SourceImage::gray(gray))
    }

    /// Run the pipeline on a frame decoded by the `image` crate.
    pub fn process_dynamic(
        &self,
        image: &image::DynamicImage,
    ) -> Result<DetectionReport, PipelineError> {
        let gray = gray_from_dynamic(image)?;
        self.process_gray(gray.as_view())
    }

    /// Process `frames` in order, one result per frame.
    ///
    /// A failed frame is logged and reported; it never stops later frames.
    pub fn process_frames<'a, I>(&self, frames: I) -> Vec<Result<DetectionReport, PipelineError>>
    where
        I: IntoIterator<Item = SourceImage<'a>>,
    {
        frames
            .into_iter()
            .enumerate()
            .map(|(index, frame)| {
                let result = self.process(&frame);
                if let Err(err) = &result {
                    warn!("frame {index}: failed in {}: {err}", err.stage());
                }
                result
            })
            .collect()
    }

    fn run(
        &self,
        source: &SourceImage<'_>,
        tracker: &mut StageTracker,
    ) -> Result<(DetectionReport, Pyramid), PipelineError> {
        let total_start = Instant::now();
        let mut timings = TimingBreakdown::default();

        tracker.advance(PipelineStage::GrayscaleConvert);
        let built = build_pyramid(source, self.params.pyramid_options())?;
        timings.push("grayscale", built.elapsed_convert_l0_ms);
        tracker.advance(PipelineStage::PyramidBuild);
        timings.push("pyramid", built.elapsed_ms);
        let pyramid = built.pyramid;
        let pyramid_stage = PyramidStage::from_pyramid(&pyramid, built.elapsed_ms);

        let (rows, cols) = (pyramid.levels[0].height(), pyramid.levels[0].width());
        let detect_start = Instant::now();
        let mut aggregator = Aggregator::new(self.params.max_detections);
        let mut levels = Vec::with_capacity(pyramid.len());
        for (level, image) in pyramid.levels.iter().enumerate() {
            tracker.advance(PipelineStage::Scan { level });
            let level_start = Instant::now();
            let bounds = level_bounds(&self.params, level, rows, cols);
            let scan = scan_level(
                &self.detector,
                &self.model,
                &self.params,
                image.as_view(),
                level,
                bounds,
                aggregator.remaining(),
            )?;
            let elapsed_ms = level_start.elapsed().as_secs_f64() * 1000.0;
            let mut report = ScanLevelReport::from_scan(&scan, 0, elapsed_ms);
            report.accepted = aggregator.absorb_scan(scan);
            levels.push(report);
        }
        timings.record_since("scan", detect_start);

        tracker.advance(PipelineStage::Aggregate);
        let budget_exhausted = levels
            .iter()
            .any(|l| l.outcome == LevelOutcome::BudgetExhausted);
        if budget_exhausted {
            debug!(
                "MultiScaleDetector: budget of {} reached before the last level",
                self.params.max_detections
            );
        }
        let aggregated = aggregator.finish();
        let aggregated_len = aggregated.len();

        tracker.advance(PipelineStage::Cluster);
        let cluster_start = Instant::now();
        let clusterer = self.params.clustering_enabled().then_some(&self.clusterer);
        let clustered = cluster_stage(clusterer, aggregated);
        let clustered_len = clustered.len();
        timings.record_since("cluster", cluster_start);
        let elapsed_ms = detect_start.elapsed().as_secs_f64() * 1000.0;

        tracker.advance(PipelineStage::Filter);
        let filter_start = Instant::now();
        let kept = filter_by_score(clustered, self.params.qthreshold);
        timings.record_since("filter", filter_start);

        tracker.advance(PipelineStage::Done);
        timings.total_ms = total_start.elapsed().as_secs_f64() * 1000.0;
        debug!(
            "MultiScaleDetector: aggregated={aggregated_len} clustered={clustered_len} kept={} in {elapsed_ms:.3} ms",
            kept.len()
        );

        let trace = PipelineTrace {
            input: InputDescriptor {
                width: source.width(),
                height: source.height(),
                channels: source.channels(),
                pyramid_levels: pyramid.len(),
            },
            stages: tracker.visited().to_vec(),
            timings,
            pyramid: Some(pyramid_stage),
            levels,
            counts: DetectionCounts {
                aggregated: aggregated_len,
                clustered: clustered_len,
                kept: kept.len(),
                budget_exhausted,
            },
        };

        let report = DetectionReport {
            detections: kept.into_vec(),
            elapsed_ms,
            trace,
        };
        Ok((report, pyramid))
    }
}
