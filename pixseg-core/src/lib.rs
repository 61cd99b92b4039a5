//! Graph-based image segmentation.
//!
//! Pixels become graph nodes linked to their 8-connected neighbours by edges
//! weighted with a color distance. Edges are visited once in ascending
//! order and two segments merge when the connecting edge is lighter than
//! both segments' internal difference plus `granularity / size`.
//!
//! ```
//! use pixseg_core::{PixelGrid, SegmenterBuilder, SequentialPalette};
//!
//! let grid = PixelGrid::try_from_rows(vec![
//!     vec![[0, 0, 0], [0, 0, 0], [255, 255, 255]],
//!     vec![[0, 0, 0], [0, 0, 0], [255, 255, 255]],
//! ])?;
//! let segmenter = SegmenterBuilder::new().with_granularity(100.0).build()?;
//! let segmentation = segmenter.segment(&grid)?;
//! assert_eq!(segmentation.segment_count(), 2);
//!
//! let painted = segmentation.paint(&mut SequentialPalette::new());
//! assert_eq!(painted.width(), 3);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

mod builder;
mod distance;
mod error;
mod forest;
mod graph;
mod grid;
mod palette;
mod result;
mod segmenter;
#[cfg(test)]
mod test_utils;

pub use crate::{
    builder::{DEFAULT_GRANULARITY, SegmenterBuilder},
    distance::{ColorDistance, ColorMetric, euclidean_distance, manhattan_distance},
    error::{GridError, GridErrorCode, Result, SegmenterError, SegmenterErrorCode},
    forest::{DisjointSetForest, SegmentStats},
    graph::{Edge, NEIGHBOUR_OFFSETS, PixelGraph, expected_edge_count},
    grid::{ParseRgbError, Pixel, PixelGrid, Rgb},
    palette::{ColorAllocator, RandomPalette, SequentialPalette},
    result::{SegmentId, Segmentation},
    segmenter::Segmenter,
};
