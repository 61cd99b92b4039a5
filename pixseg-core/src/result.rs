//! Result types for segmentation runs.
//!
//! A [`Segmentation`] stores one [`SegmentId`] per pixel. Identifiers are
//! contiguous from zero and allocated in row-major order of first
//! appearance, so two runs over the same input produce identical labels.

use std::collections::HashMap;

use crate::{
    forest::DisjointSetForest,
    grid::{PixelGrid, Rgb},
    palette::ColorAllocator,
};

/// Identifier assigned to a segment.
///
/// Backed by `usize` so every segment of any grid that fits in memory gets
/// its own identifier.
///
/// # Examples
/// ```
/// use pixseg_core::SegmentId;
///
/// let id = SegmentId::new(4);
/// assert_eq!(id.get(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SegmentId(usize);

impl SegmentId {
    /// Creates a new segment identifier.
    #[rustfmt::skip]
    #[must_use]
    pub const fn new(id: usize) -> Self { Self(id) }

    /// Returns the underlying numeric identifier.
    #[rustfmt::skip]
    #[must_use]
    pub const fn get(self) -> usize { self.0 }
}

/// Represents the output of a [`crate::Segmenter`] run.
///
/// # Examples
/// ```
/// use pixseg_core::{PixelGrid, SegmenterBuilder};
///
/// let grid = PixelGrid::try_from_rows(vec![
///     vec![[0, 0, 0], [0, 0, 0], [250, 250, 250]],
///     vec![[0, 0, 0], [0, 0, 0], [250, 250, 250]],
/// ])?;
/// let segmenter = SegmenterBuilder::new().with_granularity(10.0).build()?;
/// let segmentation = segmenter.segment(&grid)?;
/// assert_eq!(segmentation.segment_count(), 2);
/// assert_eq!(segmentation.label(0, 0), segmentation.label(1, 1));
/// assert_ne!(segmentation.label(0, 0), segmentation.label(0, 2));
/// assert_eq!(segmentation.sizes(), &[4, 2]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segmentation {
    width: usize,
    height: usize,
    labels: Vec<SegmentId>,
    sizes: Vec<usize>,
}

impl Segmentation {
    /// Reads the final partition out of `forest`, one label per pixel.
    pub(crate) fn from_forest(grid: &PixelGrid, forest: &mut DisjointSetForest) -> Self {
        let mut by_root: HashMap<usize, SegmentId> = HashMap::new();
        let mut sizes = Vec::new();
        let mut labels = Vec::with_capacity(grid.len());

        for node in 0..grid.len() {
            let root = forest.find(node);
            let id = *by_root.entry(root).or_insert_with(|| {
                let id = SegmentId(sizes.len());
                sizes.push(forest.size(root));
                id
            });
            labels.push(id);
        }

        Self {
            width: grid.width(),
            height: grid.height(),
            labels,
            sizes,
        }
    }

    /// Returns the number of columns.
    #[rustfmt::skip]
    #[must_use]
    pub fn width(&self) -> usize { self.width }

    /// Returns the number of rows.
    #[rustfmt::skip]
    #[must_use]
    pub fn height(&self) -> usize { self.height }

    /// Returns the row-major labels.
    #[rustfmt::skip]
    #[must_use]
    pub fn labels(&self) -> &[SegmentId] { &self.labels }

    /// Returns the label of `(row, col)` when in bounds.
    #[must_use]
    pub fn label(&self, row: usize, col: usize) -> Option<SegmentId> {
        if row >= self.height || col >= self.width {
            return None;
        }
        self.labels.get(row * self.width + col).copied()
    }

    /// Iterates over label rows.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[SegmentId]> + '_ {
        self.labels.chunks_exact(self.width)
    }

    /// Returns the pixel count of every segment, indexed by [`SegmentId`].
    #[rustfmt::skip]
    #[must_use]
    pub fn sizes(&self) -> &[usize] { &self.sizes }

    /// Returns the pixel count of `id`.
    #[must_use]
    pub fn size_of(&self, id: SegmentId) -> Option<usize> {
        self.sizes.get(id.get()).copied()
    }

    /// Counts how many distinct segments exist.
    #[rustfmt::skip]
    #[must_use]
    pub fn segment_count(&self) -> usize { self.sizes.len() }

    /// Assigns every segment a display color drawn from `allocator`.
    ///
    /// Colors are requested lazily, in label order, the first time a segment
    /// is met, so every pixel of a segment shares one color.
    ///
    /// # Examples
    /// ```
    /// use pixseg_core::{PixelGrid, SegmenterBuilder, SequentialPalette};
    ///
    /// let grid = PixelGrid::try_from_rows(vec![vec![[0, 0, 0], [255, 255, 255]]])?;
    /// let segmentation = SegmenterBuilder::new()
    ///     .with_granularity(0.0)
    ///     .build()?
    ///     .segment(&grid)?;
    /// let painted = segmentation.paint(&mut SequentialPalette::new());
    /// assert_ne!(painted.get(0, 0), painted.get(0, 1));
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[must_use]
    pub fn paint<A: ColorAllocator + ?Sized>(&self, allocator: &mut A) -> PixelGrid {
        let mut palette: Vec<Option<Rgb>> = vec![None; self.sizes.len()];
        let colors = self
            .labels
            .iter()
            .map(|id| match palette.get_mut(id.get()) {
                Some(Some(color)) => *color,
                Some(slot) => *slot.insert(allocator.next_color()),
                None => allocator.next_color(),
            })
            .collect();
        PixelGrid::from_parts(self.width, self.height, colors)
    }
}
