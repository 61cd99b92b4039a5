//! Pixel adjacency graph construction.
//!
//! Every pixel is linked to its 8-connected neighbours. To visit each
//! undirected pair once, only four "forward" offsets are generated from each
//! pixel: down, up-right, right and down-right. The edge list is returned
//! sorted by weight with a positional tie-break so segmentation is
//! reproducible.

use std::cmp::Ordering;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{Span, debug, field, instrument};

use crate::{
    Result,
    distance::ColorDistance,
    error::SegmenterError,
    grid::PixelGrid,
};

/// Forward neighbour offsets as `(row delta, column delta)`.
pub const NEIGHBOUR_OFFSETS: [(isize, isize); 4] = [(1, 0), (-1, 1), (0, 1), (1, 1)];

/// An undirected weighted edge between two adjacent pixels.
///
/// Endpoints are row-major linear pixel indices stored in canonical form
/// (`source < target`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
    source: usize,
    target: usize,
    weight: f64,
}

impl Edge {
    /// Creates an edge, canonicalising the endpoint order.
    #[must_use]
    pub fn new(left: usize, right: usize, weight: f64) -> Self {
        let (source, target) = if left <= right {
            (left, right)
        } else {
            (right, left)
        };
        Self {
            source,
            target,
            weight,
        }
    }

    /// Returns the smaller endpoint index.
    #[must_use]
    #[rustfmt::skip]
    pub fn source(&self) -> usize { self.source }

    /// Returns the larger endpoint index.
    #[must_use]
    #[rustfmt::skip]
    pub fn target(&self) -> usize { self.target }

    /// Returns the color distance between the endpoints.
    #[must_use]
    #[rustfmt::skip]
    pub fn weight(&self) -> f64 { self.weight }
}

impl Eq for Edge {}

impl Ord for Edge {
    fn cmp(&self, other: &Self) -> Ordering {
        self.weight
            .total_cmp(&other.weight)
            .then_with(|| self.source.cmp(&other.source))
            .then_with(|| self.target.cmp(&other.target))
    }
}

impl PartialOrd for Edge {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// The weighted adjacency graph of a [`PixelGrid`], edges sorted ascending.
///
/// # Examples
/// ```
/// use pixseg_core::{ColorMetric, PixelGraph, PixelGrid};
///
/// let grid = PixelGrid::try_from_rows(vec![
///     vec![[0, 0, 0], [0, 0, 0]],
///     vec![[0, 0, 0], [30, 40, 0]],
/// ])?;
/// let graph = PixelGraph::build(&grid, &ColorMetric::Euclidean)?;
/// assert_eq!(graph.len(), 6);
/// assert_eq!(graph.edges().last().map(|edge| edge.weight()), Some(50.0));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct PixelGraph {
    node_count: usize,
    edges: Vec<Edge>,
}

impl PixelGraph {
    /// Builds the sorted edge list for `grid`, weighing edges with `distance`.
    ///
    /// # Errors
    /// Returns [`SegmenterError::InvalidWeight`] when `distance` yields a
    /// negative or non-finite weight.
    #[instrument(
        name = "core.build_graph",
        err,
        skip_all,
        fields(width = grid.width(), height = grid.height(), edges = field::Empty),
    )]
    pub fn build<D>(grid: &PixelGrid, distance: &D) -> Result<Self>
    where
        D: ColorDistance + Sync + ?Sized,
    {
        let mut edges = collect_edges(grid, distance)?;
        sort_edges(&mut edges);

        Span::current().record("edges", edges.len());
        debug!(edges = edges.len(), "pixel graph built");
        Ok(Self {
            node_count: grid.len(),
            edges,
        })
    }

    /// Returns the number of pixels (graph nodes).
    #[must_use]
    #[rustfmt::skip]
    pub fn node_count(&self) -> usize { self.node_count }

    /// Returns the edges in ascending order.
    #[must_use]
    #[rustfmt::skip]
    pub fn edges(&self) -> &[Edge] { &self.edges }

    /// Returns the number of edges.
    #[must_use]
    #[rustfmt::skip]
    pub fn len(&self) -> usize { self.edges.len() }

    /// Returns `true` for single-pixel grids.
    #[must_use]
    #[rustfmt::skip]
    pub fn is_empty(&self) -> bool { self.edges.is_empty() }
}

/// Number of edges [`PixelGraph::build`] produces for a `width` x `height` grid.
#[must_use]
pub fn expected_edge_count(width: usize, height: usize) -> usize {
    let horizontal = height * width.saturating_sub(1);
    let vertical = width * height.saturating_sub(1);
    let diagonal = 2 * width.saturating_sub(1) * height.saturating_sub(1);
    horizontal + vertical + diagonal
}

fn row_edges<D>(grid: &PixelGrid, distance: &D, row: usize) -> Result<Vec<Edge>>
where
    D: ColorDistance + ?Sized,
{
    let mut edges = Vec::with_capacity(NEIGHBOUR_OFFSETS.len() * grid.width());
    for col in 0..grid.width() {
        let (Some(index), Some(color)) = (grid.index(row, col), grid.get(row, col)) else {
            continue;
        };
        for (row_delta, col_delta) in NEIGHBOUR_OFFSETS {
            let Some(neighbour_row) = row.checked_add_signed(row_delta) else {
                continue;
            };
            let Some(neighbour_col) = col.checked_add_signed(col_delta) else {
                continue;
            };
            let (Some(neighbour), Some(neighbour_color)) = (
                grid.index(neighbour_row, neighbour_col),
                grid.get(neighbour_row, neighbour_col),
            ) else {
                continue;
            };
            let weight = distance.distance(color, neighbour_color);
            let edge = Edge::new(index, neighbour, weight);
            if !weight.is_finite() || weight < 0.0 {
                return Err(SegmenterError::InvalidWeight {
                    source_index: edge.source(),
                    target_index: edge.target(),
                    weight,
                });
            }
            edges.push(edge);
        }
    }
    Ok(edges)
}

#[cfg(feature = "parallel")]
fn collect_edges<D>(grid: &PixelGrid, distance: &D) -> Result<Vec<Edge>>
where
    D: ColorDistance + Sync + ?Sized,
{
    let rows = (0..grid.height())
        .into_par_iter()
        .map(|row| row_edges(grid, distance, row))
        .collect::<Result<Vec<_>>>()?;
    Ok(rows.into_iter().flatten().collect())
}

#[cfg(not(feature = "parallel"))]
fn collect_edges<D>(grid: &PixelGrid, distance: &D) -> Result<Vec<Edge>>
where
    D: ColorDistance + Sync + ?Sized,
{
    let mut edges = Vec::with_capacity(expected_edge_count(grid.width(), grid.height()));
    for row in 0..grid.height() {
        edges.extend(row_edges(grid, distance, row)?);
    }
    Ok(edges)
}

#[cfg(feature = "parallel")]
fn sort_edges(edges: &mut [Edge]) {
    edges.par_sort_unstable();
}

#[cfg(not(feature = "parallel"))]
fn sort_edges(edges: &mut [Edge]) {
    edges.sort_unstable();
}
