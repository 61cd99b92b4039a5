//! Benchmark parameter types.
//!
//! Groups related parameters so they can be rendered as Criterion benchmark
//! identifiers.

use std::fmt;

/// Dimensions of a benchmarked image.
#[derive(Clone, Copy, Debug)]
pub struct ImageBenchParams {
    /// Number of columns.
    pub width: usize,
    /// Number of rows.
    pub height: usize,
}

impl ImageBenchParams {
    /// Builds a square image of `side` pixels a side.
    #[must_use]
    pub const fn square(side: usize) -> Self {
        Self {
            width: side,
            height: side,
        }
    }
}

impl fmt::Display for ImageBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Parameters for a full segmentation run.
#[derive(Clone, Copy, Debug)]
pub struct SegmentBenchParams {
    /// Image dimensions.
    pub image: ImageBenchParams,
    /// Granularity handed to the segmenter.
    pub granularity: f64,
    /// Minimum segment size handed to the segmenter.
    pub min_segment_size: usize,
}

impl fmt::Display for SegmentBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},k={},min={}",
            self.image, self.granularity, self.min_segment_size,
        )
    }
}
