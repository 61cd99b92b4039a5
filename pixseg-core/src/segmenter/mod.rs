//! Segmentation driver.
//!
//! Visits the sorted edges of a [`PixelGraph`] once, merging the two
//! segments an edge connects when its weight is below both segments'
//! size-adaptive thresholds. An optional second pass folds segments smaller
//! than the configured minimum into a neighbour.

use std::num::NonZeroUsize;

use tracing::{info, instrument, warn};

use crate::{
    Result,
    distance::{ColorDistance, ColorMetric},
    forest::DisjointSetForest,
    graph::{Edge, PixelGraph},
    grid::PixelGrid,
    palette::ColorAllocator,
    result::Segmentation,
};

/// Metric label attached to spans when the caller supplies the distance.
const CUSTOM_METRIC: &str = "custom";

/// Runs graph-based segmentation over [`PixelGrid`]s.
///
/// # Examples
/// ```
/// use pixseg_core::{PixelGrid, SegmenterBuilder};
///
/// let grid = PixelGrid::try_from_rows(vec![
///     vec![[10, 10, 10], [10, 10, 10], [200, 30, 30]],
///     vec![[10, 10, 10], [10, 10, 10], [200, 30, 30]],
/// ])?;
/// let segmenter = SegmenterBuilder::new().with_granularity(50.0).build()?;
/// let segmentation = segmenter.segment(&grid)?;
/// assert_eq!(segmentation.segment_count(), 2);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct Segmenter {
    granularity: f64,
    min_segment_size: NonZeroUsize,
    metric: ColorMetric,
}

impl Segmenter {
    pub(crate) const fn new(
        granularity: f64,
        min_segment_size: NonZeroUsize,
        metric: ColorMetric,
    ) -> Self {
        Self {
            granularity,
            min_segment_size,
            metric,
        }
    }

    /// Returns the granularity configured for this instance.
    #[rustfmt::skip]
    #[must_use]
    pub const fn granularity(&self) -> f64 { self.granularity }

    /// Returns the minimum segment size enforced after the main pass.
    #[rustfmt::skip]
    #[must_use]
    pub const fn min_segment_size(&self) -> NonZeroUsize { self.min_segment_size }

    /// Returns the color metric used by [`Segmenter::segment`].
    #[rustfmt::skip]
    #[must_use]
    pub const fn metric(&self) -> ColorMetric { self.metric }

    /// Segments `grid` using the configured color metric.
    ///
    /// # Errors
    /// Propagates [`crate::SegmenterError::InvalidWeight`] from graph
    /// construction. The built-in metrics never produce one.
    pub fn segment(&self, grid: &PixelGrid) -> Result<Segmentation> {
        self.run(grid, &self.metric, self.metric.as_str())
    }

    /// Segments `grid`, weighing edges with a caller-supplied distance.
    ///
    /// The configured [`ColorMetric`] is ignored.
    ///
    /// # Errors
    /// Returns [`crate::SegmenterError::InvalidWeight`] when `distance`
    /// yields a negative or non-finite weight.
    ///
    /// # Examples
    /// ```
    /// use pixseg_core::{ColorDistance, PixelGrid, Rgb, SegmenterBuilder};
    ///
    /// struct RedOnly;
    ///
    /// impl ColorDistance for RedOnly {
    ///     fn distance(&self, left: Rgb, right: Rgb) -> f64 {
    ///         f64::from(left.r.abs_diff(right.r))
    ///     }
    /// }
    ///
    /// let grid = PixelGrid::try_from_rows(vec![vec![[5, 0, 0], [5, 255, 255]]])?;
    /// let segmenter = SegmenterBuilder::new().with_granularity(0.0).build()?;
    /// assert_eq!(segmenter.segment_with(&grid, &RedOnly)?.segment_count(), 1);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn segment_with<D>(&self, grid: &PixelGrid, distance: &D) -> Result<Segmentation>
    where
        D: ColorDistance + Sync + ?Sized,
    {
        self.run(grid, distance, CUSTOM_METRIC)
    }

    /// Segments `grid` and paints every segment with one color drawn from
    /// `allocator`.
    ///
    /// # Errors
    /// Same as [`Segmenter::segment`].
    ///
    /// # Examples
    /// ```
    /// use pixseg_core::{PixelGrid, RandomPalette, SegmenterBuilder};
    ///
    /// let grid = PixelGrid::try_from_rows(vec![vec![[0, 0, 0], [0, 0, 0]]])?;
    /// let segmenter = SegmenterBuilder::new().build()?;
    /// let painted = segmenter.segment_colors(&grid, &mut RandomPalette::seeded(3))?;
    /// assert_eq!(painted.get(0, 0), painted.get(0, 1));
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn segment_colors<A>(&self, grid: &PixelGrid, allocator: &mut A) -> Result<PixelGrid>
    where
        A: ColorAllocator + ?Sized,
    {
        Ok(self.segment(grid)?.paint(allocator))
    }

    #[instrument(
        name = "core.segment",
        err,
        skip_all,
        fields(
            width = grid.width(),
            height = grid.height(),
            granularity = self.granularity,
            min_segment_size = %self.min_segment_size,
            metric = metric,
        ),
    )]
    fn run<D>(&self, grid: &PixelGrid, distance: &D, metric: &'static str) -> Result<Segmentation>
    where
        D: ColorDistance + Sync + ?Sized,
    {
        if self.granularity == 0.0 && grid.len() > 1 {
            warn!("granularity is zero; only identical colors will merge");
        }

        let graph = PixelGraph::build(grid, distance)?;
        let mut forest = DisjointSetForest::for_grid(grid);
        let mut merges = merge_edges(&mut forest, graph.edges(), self.granularity);
        if self.min_segment_size.get() > 1 {
            merges += merge_small_segments(&mut forest, graph.edges(), self.min_segment_size);
        }

        let segmentation = Segmentation::from_forest(grid, &mut forest);
        record_segment_count(segmentation.segment_count());
        info!(
            segments = segmentation.segment_count(),
            merges, "segmentation completed"
        );
        Ok(segmentation)
    }
}

/// Returns `true` when an edge of `weight` joining `left` and `right` (both
/// representatives) should merge their segments.
///
/// Zero-weight edges always merge so that identical colors collapse even at
/// granularity zero.
fn should_merge(
    forest: &DisjointSetForest,
    left: usize,
    right: usize,
    weight: f64,
    granularity: f64,
) -> bool {
    if weight == 0.0 {
        return true;
    }
    let threshold =
        |root: usize| forest.internal_difference(root) + granularity / forest.size(root) as f64;
    weight < threshold(left).min(threshold(right))
}

/// Replays `edges` in iteration order, merging segments per the pairwise
/// comparison predicate. Returns the number of merges performed.
///
/// The result depends on the order; [`Segmenter`] always passes the
/// ascending order produced by [`PixelGraph::build`].
pub(crate) fn merge_edges<'a, I>(
    forest: &mut DisjointSetForest,
    edges: I,
    granularity: f64,
) -> usize
where
    I: IntoIterator<Item = &'a Edge>,
{
    let mut visited = 0_usize;
    let mut merges = 0_usize;
    for edge in edges {
        visited += 1;
        let left = forest.find(edge.source());
        let right = forest.find(edge.target());
        if left == right {
            continue;
        }
        if should_merge(forest, left, right, edge.weight(), granularity) {
            forest.union(edge.source(), edge.target(), edge.weight());
            merges += 1;
        }
    }
    record_edges(visited, merges);
    merges
}

/// Joins every segment smaller than `min_segment_size` to the neighbour
/// across its lightest remaining edge.
///
/// A merged segment keeps the largest of the joining edge weight and both
/// internal differences, so internal differences never decrease.
///
/// The pixel graph is connected, so afterwards every segment holds at least
/// `min_segment_size` pixels unless the grid itself is smaller.
#[instrument(
    name = "core.merge_small_segments",
    skip(forest, edges),
    fields(min_segment_size = %min_segment_size),
)]
pub(crate) fn merge_small_segments(
    forest: &mut DisjointSetForest,
    edges: &[Edge],
    min_segment_size: NonZeroUsize,
) -> usize {
    let minimum = min_segment_size.get();
    let mut merges = 0_usize;
    for edge in edges {
        let left = forest.find(edge.source());
        let right = forest.find(edge.target());
        if left == right {
            continue;
        }
        if forest.size(left) < minimum || forest.size(right) < minimum {
            let weight = edge
                .weight()
                .max(forest.internal_difference(left))
                .max(forest.internal_difference(right));
            forest.union(left, right, weight);
            merges += 1;
        }
    }
    record_edges(0, merges);
    merges
}

#[cfg(feature = "metrics")]
fn record_edges(visited: usize, merges: usize) {
    metrics::counter!("segmentation_edges_visited").increment(visited as u64);
    metrics::counter!("segmentation_merges").increment(merges as u64);
}

#[cfg(not(feature = "metrics"))]
fn record_edges(_visited: usize, _merges: usize) {}

#[cfg(feature = "metrics")]
fn record_segment_count(segments: usize) {
    metrics::histogram!("segmentation_segment_count").record(segments as f64);
}

#[cfg(not(feature = "metrics"))]
fn record_segment_count(_segments: usize) {}
