//! Display color allocation for finished segmentations.

use rand::{Rng, SeedableRng, rngs::SmallRng};

use crate::grid::Rgb;

/// Produces display colors on demand, one per segment.
pub trait ColorAllocator {
    /// Returns the next display color.
    fn next_color(&mut self) -> Rgb;
}

impl<A: ColorAllocator + ?Sized> ColorAllocator for &mut A {
    fn next_color(&mut self) -> Rgb {
        (**self).next_color()
    }
}

/// Odd multiplier; multiplication by an odd constant permutes `0..2^24`.
const SEQUENTIAL_STRIDE: u32 = 0x9E_37_79;
const COLOR_MASK: u32 = 0x00FF_FFFF;

/// Deterministic allocator whose first 2^24 colors are pairwise distinct.
///
/// Consecutive counters are scattered over the RGB cube so neighbouring
/// segments get visibly different colors.
///
/// # Examples
/// ```
/// use std::collections::HashSet;
///
/// use pixseg_core::{ColorAllocator, SequentialPalette};
///
/// let mut palette = SequentialPalette::new();
/// let colors: HashSet<_> = (0..1_000).map(|_| palette.next_color()).collect();
/// assert_eq!(colors.len(), 1_000);
/// ```
#[derive(Clone, Debug, Default)]
pub struct SequentialPalette {
    counter: u32,
}

impl SequentialPalette {
    /// Creates a palette starting at the first color.
    #[must_use]
    pub const fn new() -> Self {
        Self { counter: 0 }
    }
}

impl ColorAllocator for SequentialPalette {
    fn next_color(&mut self) -> Rgb {
        let scattered = self.counter.wrapping_mul(SEQUENTIAL_STRIDE) & COLOR_MASK;
        self.counter = self.counter.wrapping_add(1) & COLOR_MASK;
        Rgb::from_packed(scattered)
    }
}

/// Allocator drawing uniformly random colors from a seeded generator.
///
/// Colors are distinct only with high probability.
///
/// # Examples
/// ```
/// use pixseg_core::{ColorAllocator, RandomPalette};
///
/// let mut first = RandomPalette::seeded(7);
/// let mut second = RandomPalette::seeded(7);
/// assert_eq!(first.next_color(), second.next_color());
/// ```
#[derive(Clone, Debug)]
pub struct RandomPalette {
    rng: SmallRng,
}

impl RandomPalette {
    /// Creates a palette whose sequence is fixed by `seed`.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Creates a palette seeded from operating-system entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: SmallRng::from_entropy(),
        }
    }
}

impl ColorAllocator for RandomPalette {
    fn next_color(&mut self) -> Rgb {
        Rgb::from(self.rng.r#gen::<[u8; 3]>())
    }
}
