use std::sync::atomic::{AtomicUsize, Ordering};

use pixseg_core::{ColorDistance, ColorMetric, PixelGrid, Rgb};

/// Color distance that counts how often it is consulted.
#[derive(Default)]
pub struct CountingDistance {
    calls: AtomicUsize,
}

impl CountingDistance {
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

impl ColorDistance for CountingDistance {
    fn distance(&self, left: Rgb, right: Rgb) -> f64 {
        self.calls.fetch_add(1, Ordering::Relaxed);
        ColorMetric::Euclidean.distance(left, right)
    }
}

#[must_use]
pub fn grid(rows: Vec<Vec<[u8; 3]>>) -> PixelGrid {
    PixelGrid::try_from_rows(rows).expect("fixture grid must be rectangular")
}
