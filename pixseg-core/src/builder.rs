//! Builder utilities for configuring segmentation.
//!
//! Exposes parameter selection and validation used before constructing
//! [`Segmenter`] instances.

use std::num::NonZeroUsize;

use crate::{Result, distance::ColorMetric, error::SegmenterError, segmenter::Segmenter};

/// Default granularity; suits 8-bit RGB images of a few hundred pixels a side.
pub const DEFAULT_GRANULARITY: f64 = 300.0;

/// Configures and constructs [`Segmenter`] instances.
///
/// # Examples
/// ```
/// use pixseg_core::{ColorMetric, SegmenterBuilder};
///
/// let segmenter = SegmenterBuilder::new()
///     .with_granularity(150.0)
///     .with_min_segment_size(20)
///     .with_metric(ColorMetric::Manhattan)
///     .build()
///     .expect("builder configuration is valid");
/// assert_eq!(segmenter.granularity(), 150.0);
/// assert_eq!(segmenter.min_segment_size().get(), 20);
/// assert_eq!(segmenter.metric(), ColorMetric::Manhattan);
/// ```
#[derive(Debug, Clone)]
pub struct SegmenterBuilder {
    granularity: f64,
    min_segment_size: usize,
    metric: ColorMetric,
}

impl Default for SegmenterBuilder {
    fn default() -> Self {
        Self {
            granularity: DEFAULT_GRANULARITY,
            min_segment_size: 1,
            metric: ColorMetric::Euclidean,
        }
    }
}

impl SegmenterBuilder {
    /// Creates a builder populated with default parameters.
    ///
    /// # Examples
    /// ```
    /// use pixseg_core::{ColorMetric, SegmenterBuilder};
    ///
    /// let builder = SegmenterBuilder::new();
    /// assert_eq!(builder.granularity(), 300.0);
    /// assert_eq!(builder.min_segment_size(), 1);
    /// assert_eq!(builder.metric(), ColorMetric::Euclidean);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the granularity. Larger values favour larger segments.
    #[must_use]
    pub fn with_granularity(mut self, granularity: f64) -> Self {
        self.granularity = granularity;
        self
    }

    /// Returns the configured granularity.
    #[must_use]
    pub fn granularity(&self) -> f64 {
        self.granularity
    }

    /// Sets the size below which segments are folded into a neighbour after
    /// the main pass. `1` disables the clean-up.
    #[must_use]
    pub fn with_min_segment_size(mut self, size: usize) -> Self {
        self.min_segment_size = size;
        self
    }

    /// Returns the configured minimum segment size.
    #[must_use]
    pub fn min_segment_size(&self) -> usize {
        self.min_segment_size
    }

    /// Selects the color metric used to weigh edges.
    #[must_use]
    pub fn with_metric(mut self, metric: ColorMetric) -> Self {
        self.metric = metric;
        self
    }

    /// Returns the configured color metric.
    #[must_use]
    pub fn metric(&self) -> ColorMetric {
        self.metric
    }

    /// Validates the configuration and constructs a [`Segmenter`].
    ///
    /// # Errors
    /// Returns [`SegmenterError::InvalidGranularity`] for negative or
    /// non-finite granularity and [`SegmenterError::InvalidMinSegmentSize`]
    /// for a zero minimum segment size.
    ///
    /// # Examples
    /// ```
    /// use pixseg_core::{SegmenterBuilder, SegmenterError};
    ///
    /// let err = SegmenterBuilder::new()
    ///     .with_granularity(-1.0)
    ///     .build()
    ///     .expect_err("negative granularity is rejected");
    /// assert!(matches!(err, SegmenterError::InvalidGranularity { .. }));
    /// ```
    pub fn build(self) -> Result<Segmenter> {
        if !self.granularity.is_finite() || self.granularity < 0.0 {
            return Err(SegmenterError::InvalidGranularity {
                got: self.granularity,
            });
        }
        let min_segment_size = NonZeroUsize::new(self.min_segment_size).ok_or(
            SegmenterError::InvalidMinSegmentSize {
                got: self.min_segment_size,
            },
        )?;

        Ok(Segmenter::new(self.granularity, min_segment_size, self.metric))
    }
}
