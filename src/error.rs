//! Error types shared by the pipeline stages.
//!
//! Every fatal error aborts only the image currently being processed. The
//! driver never retries: the external routines are deterministic, so an
//! identical call would fail the same way.

use crate::detector::PipelineStage;
use std::path::PathBuf;

/// Errors raised while constructing or validating image views.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ImageError {
    /// Width or height is zero.
    #[error("image has zero area ({width}x{height})")]
    ZeroArea { width: usize, height: usize },

    /// Row stride is smaller than the row length in samples.
    #[error("row stride ({stride}) is smaller than the row length ({row_len})")]
    StrideTooSmall { stride: usize, row_len: usize },

    /// Backing buffer does not cover the last row.
    #[error("buffer holds {actual} samples but the layout needs {required}")]
    BufferTooShort { required: usize, actual: usize },

    /// Channel count other than 1, 3 or 4.
    #[error("unsupported channel count {0}")]
    UnsupportedChannels(usize),
}

/// Error reported by an external detector invocation.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("detector failure: {message}")]
pub struct DetectorError {
    pub message: String,
}

impl DetectorError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Fatal per-image pipeline errors.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum PipelineError {
    /// Zero-area or malformed source image.
    #[error("invalid input image: {0}")]
    InvalidInput(#[from] ImageError),

    /// The external detector failed on a pyramid level.
    #[error("scan failed on pyramid level {level}: {source}")]
    DetectorFailure {
        level: usize,
        #[source]
        source: DetectorError,
    },

    /// Detection parameters rejected at construction time.
    #[error("invalid detection parameters: {0}")]
    InvalidConfig(String),
}

impl PipelineError {
    /// Stage of the per-image state machine at which the run terminated.
    pub fn stage(&self) -> PipelineStage {
        match self {
            PipelineError::InvalidInput(_) => PipelineStage::GrayscaleConvert,
            PipelineError::DetectorFailure { level, .. } => PipelineStage::Scan { level: *level },
            PipelineError::InvalidConfig(_) => PipelineStage::Init,
        }
    }
}

/// Errors raised while loading detection parameters from disk.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write {path}: {message}")]
    Write { path: PathBuf, message: String },

    #[error(transparent)]
    Invalid(#[from] PipelineError),
}

/// Failure of a run that also writes its outputs.
#[derive(thiserror::Error, Debug)]
pub enum RunError {
    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error(transparent)]
    Output(#[from] ConfigError),
}
