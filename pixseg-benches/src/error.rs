//! Benchmark setup error type.
//!
//! Aggregates the errors that may arise while preparing benchmark inputs so
//! that setup functions can propagate failures with `?`.

use crate::source::SyntheticError;
use pixseg_core::{GridError, SegmenterError};

/// Errors that may occur during benchmark setup.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Synthetic image generation failed.
    #[error("synthetic image generation failed: {0}")]
    Synthetic(#[from] SyntheticError),
    /// Segmenter configuration or graph construction failed.
    #[error("segmentation failed: {0}")]
    Segmenter(#[from] SegmenterError),
    /// A grid could not be assembled.
    #[error("grid construction failed: {0}")]
    Grid(#[from] GridError),
}
