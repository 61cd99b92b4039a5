//! Disjoint-set forest with per-segment statistics.
//!
//! Each pixel owns one arena slot addressed by its row-major index. A slot
//! records its parent, rank, and the segment's size and internal difference.
//! The last two are only meaningful while the slot is a root, so readers go
//! through [`DisjointSetForest::find`] first.

use crate::grid::PixelGrid;

#[derive(Clone, Copy, Debug, PartialEq)]
struct SegmentNode {
    parent: usize,
    rank: u8,
    size: usize,
    internal_difference: f64,
}

impl SegmentNode {
    const fn singleton(index: usize) -> Self {
        Self {
            parent: index,
            rank: 0,
            size: 1,
            internal_difference: 0.0,
        }
    }
}

/// Statistics read from a segment's representative.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SegmentStats {
    /// Index of the root node.
    pub representative: usize,
    /// Number of pixels in the segment.
    pub size: usize,
    /// Largest edge weight absorbed by a merge into this segment.
    pub internal_difference: f64,
}

/// Union-find over pixel indices augmented with segment size and internal
/// difference.
///
/// # Panics
/// Every method taking a node index panics when the index is not below
/// [`DisjointSetForest::len`]. Indices produced by the grid the forest was
/// built for are always in range.
///
/// # Examples
/// ```
/// use pixseg_core::DisjointSetForest;
///
/// let mut forest = DisjointSetForest::new(4);
/// let root = forest.union(0, 1, 2.5);
/// assert_eq!(forest.find(1), root);
/// assert_eq!(forest.size(root), 2);
/// assert_eq!(forest.internal_difference(root), 2.5);
/// assert_eq!(forest.segment_count(), 3);
/// ```
#[derive(Clone, Debug)]
pub struct DisjointSetForest {
    nodes: Vec<SegmentNode>,
    segments: usize,
}

impl DisjointSetForest {
    /// Creates `node_count` singleton segments.
    #[must_use]
    pub fn new(node_count: usize) -> Self {
        Self {
            nodes: (0..node_count).map(SegmentNode::singleton).collect(),
            segments: node_count,
        }
    }

    /// Creates one singleton segment per pixel of `grid`.
    #[must_use]
    pub fn for_grid(grid: &PixelGrid) -> Self {
        Self::new(grid.len())
    }

    /// Returns the number of nodes.
    #[rustfmt::skip]
    #[must_use]
    pub fn len(&self) -> usize { self.nodes.len() }

    /// Returns `true` when the forest has no nodes.
    #[rustfmt::skip]
    #[must_use]
    pub fn is_empty(&self) -> bool { self.nodes.is_empty() }

    /// Returns the current number of disjoint segments.
    #[rustfmt::skip]
    #[must_use]
    pub fn segment_count(&self) -> usize { self.segments }

    /// Returns the representative of the segment containing `node`.
    ///
    /// Every node on the path, `node` included, is re-pointed at the root.
    pub fn find(&mut self, node: usize) -> usize {
        let mut root = node;
        while self.nodes[root].parent != root {
            root = self.nodes[root].parent;
        }

        let mut current = node;
        while self.nodes[current].parent != current {
            let next = self.nodes[current].parent;
            self.nodes[current].parent = root;
            current = next;
        }

        root
    }

    /// Merges the segments containing `left` and `right` after absorbing an
    /// edge of `weight`, returning the surviving representative.
    ///
    /// When both nodes already share a representative nothing changes. On a
    /// rank tie the representative of `left` survives.
    pub fn union(&mut self, left: usize, right: usize, weight: f64) -> usize {
        let left_root = self.find(left);
        let right_root = self.find(right);
        if left_root == right_root {
            return left_root;
        }

        let left_rank = self.nodes[left_root].rank;
        let right_rank = self.nodes[right_root].rank;
        let (parent, child) = if left_rank < right_rank {
            (right_root, left_root)
        } else {
            (left_root, right_root)
        };

        let size = self.nodes[parent].size + self.nodes[child].size;
        self.nodes[child].parent = parent;
        if left_rank == right_rank {
            self.nodes[parent].rank = left_rank.saturating_add(1);
        }
        self.nodes[parent].size = size;
        self.nodes[parent].internal_difference = weight;
        self.segments -= 1;

        parent
    }

    /// Returns the size recorded at `root`.
    ///
    /// Only meaningful when `root` is a representative.
    #[must_use]
    pub fn size(&self, root: usize) -> usize {
        self.nodes[root].size
    }

    /// Returns the internal difference recorded at `root`.
    ///
    /// Only meaningful when `root` is a representative.
    #[must_use]
    pub fn internal_difference(&self, root: usize) -> f64 {
        self.nodes[root].internal_difference
    }

    /// Returns the rank recorded at `root`.
    #[must_use]
    pub fn rank(&self, root: usize) -> u8 {
        self.nodes[root].rank
    }

    /// Resolves `node` and returns its segment's statistics.
    pub fn stats(&mut self, node: usize) -> SegmentStats {
        let representative = self.find(node);
        SegmentStats {
            representative,
            size: self.size(representative),
            internal_difference: self.internal_difference(representative),
        }
    }

    #[cfg(test)]
    pub(crate) fn parent(&self, node: usize) -> usize {
        self.nodes[node].parent
    }
}
