//! Contracts for the external cascade routines.
//!
//! The pipeline never scores windows or merges boxes itself. It drives an
//! [`ObjectDetector`] (scan-and-score over one image) and a [`Clusterer`]
//! (merge detections of the same object) through the traits below.
//! Both take `&self`: implementations are expected to be pure functions of
//! their inputs.

use crate::error::DetectorError;
use crate::image::ImageU8;
use crate::types::DetectionBatch;
use std::fmt;
use std::sync::Arc;

/// Opaque, read-only handle to a pre-trained cascade.
///
/// The bytes are never inspected by the pipeline; cloning shares the buffer.
#[derive(Clone)]
pub struct CascadeModel {
    blob: Arc<[u8]>,
}

impl CascadeModel {
    pub fn from_bytes(bytes: impl Into<Arc<[u8]>>) -> Self {
        Self { blob: bytes.into() }
    }

    /// Raw model bytes for detector implementations.
    pub fn as_bytes(&self) -> &[u8] {
        &self.blob
    }

    pub fn len(&self) -> usize {
        self.blob.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blob.is_empty()
    }
}

impl fmt::Debug for CascadeModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CascadeModel")
            .field("bytes", &self.blob.len())
            .finish()
    }
}

/// Arguments of one detector invocation on a single pyramid level.
#[derive(Clone, Copy, Debug)]
pub struct ScanRequest<'a> {
    /// Level image; coordinates of the returned detections refer to it.
    pub image: ImageU8<'a>,
    /// In-plane rotation of the scanning window.
    pub angle: f32,
    /// Multiplicative step between window sizes.
    pub scale_factor: f32,
    /// Scan step as a fraction of the current window size.
    pub stride_factor: f32,
    pub min_size: u32,
    pub max_size: u32,
    /// Upper bound on the number of detections the call may return.
    pub max_results: usize,
}

impl ScanRequest<'_> {
    pub fn rows(&self) -> usize {
        self.image.h
    }

    pub fn cols(&self) -> usize {
        self.image.w
    }

    pub fn row_stride(&self) -> usize {
        self.image.stride
    }

    pub fn pixels(&self) -> &[u8] {
        self.image.data
    }
}

/// Scan-and-score routine over one gray image.
///
/// Must return at most `request.max_results` detections with sizes in
/// `[request.min_size, request.max_size]`, in level-local coordinates. Higher
/// scores mean more confident; no ordering by score is required.
pub trait ObjectDetector {
    fn find_objects(
        &self,
        model: &CascadeModel,
        request: &ScanRequest<'_>,
    ) -> Result<DetectionBatch, DetectorError>;
}

impl<F> ObjectDetector for F
where
    F: Fn(&CascadeModel, &ScanRequest<'_>) -> Result<DetectionBatch, DetectorError>,
{
    fn find_objects(
        &self,
        model: &CascadeModel,
        request: &ScanRequest<'_>,
    ) -> Result<DetectionBatch, DetectorError> {
        self(model, request)
    }
}

/// Merges detections that represent the same physical object.
///
/// The returned batch must not be longer than the input.
pub trait Clusterer {
    fn cluster(&self, detections: DetectionBatch) -> DetectionBatch;
}

impl<F> Clusterer for F
where
    F: Fn(DetectionBatch) -> DetectionBatch,
{
    fn cluster(&self, detections: DetectionBatch) -> DetectionBatch {
        self(detections)
    }
}
