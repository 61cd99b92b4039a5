//! Synthetic color grids shared by unit tests, integration tests and
//! benchmarks.
//!
//! Fixtures are plain `[u8; 3]` rows so any crate can feed them into its own
//! grid constructor.

use rand::{Rng, SeedableRng, rngs::SmallRng};

/// Row-major rows of RGB triplets.
pub type Rows = Vec<Vec<[u8; 3]>>;

/// Every pixel set to `color`.
///
/// # Examples
/// ```
/// use pixseg_test_support::grids;
///
/// let rows = grids::uniform(3, 2, [1, 2, 3]);
/// assert_eq!(rows.len(), 2);
/// assert!(rows.iter().all(|row| row == &vec![[1, 2, 3]; 3]));
/// ```
#[must_use]
pub fn uniform(width: usize, height: usize, color: [u8; 3]) -> Rows {
    vec![vec![color; width]; height]
}

/// Left half `left`, right half `right`; the split falls at `width / 2`.
///
/// # Examples
/// ```
/// use pixseg_test_support::grids;
///
/// let rows = grids::two_tone(4, 1, [0, 0, 0], [9, 9, 9]);
/// assert_eq!(rows[0], vec![[0, 0, 0], [0, 0, 0], [9, 9, 9], [9, 9, 9]]);
/// ```
#[must_use]
pub fn two_tone(width: usize, height: usize, left: [u8; 3], right: [u8; 3]) -> Rows {
    let split = width / 2;
    let row: Vec<[u8; 3]> = (0..width)
        .map(|col| if col < split { left } else { right })
        .collect();
    vec![row; height]
}

/// A single row whose pixels have the given red channel values.
#[must_use]
pub fn red_ramp(reds: &[u8]) -> Rows {
    vec![reds.iter().map(|&red| [red, 0, 0]).collect()]
}

/// Vertical bands `band` pixels wide cycling through `colors`.
///
/// # Panics
/// Panics when `colors` is empty or `band` is zero.
#[must_use]
pub fn stripes(width: usize, height: usize, band: usize, colors: &[[u8; 3]]) -> Rows {
    assert!(!colors.is_empty(), "stripes need at least one color");
    assert!(band > 0, "stripe bands must be at least one pixel wide");
    let row: Vec<[u8; 3]> = (0..width)
        .map(|col| colors[(col / band) % colors.len()])
        .collect();
    vec![row; height]
}

/// Uniformly random colors drawn from a generator seeded with `seed`.
///
/// # Examples
/// ```
/// use pixseg_test_support::grids;
///
/// assert_eq!(grids::noisy(5, 4, 9), grids::noisy(5, 4, 9));
/// ```
#[must_use]
pub fn noisy(width: usize, height: usize, seed: u64) -> Rows {
    let mut rng = SmallRng::seed_from_u64(seed);
    (0..height)
        .map(|_| (0..width).map(|_| rng.r#gen::<[u8; 3]>()).collect())
        .collect()
}

/// Smooth horizontal gradient with per-pixel jitter of at most `jitter` on
/// every channel; resembles a photograph of a lit wall.
#[must_use]
pub fn gradient(width: usize, height: usize, jitter: u8, seed: u64) -> Rows {
    let mut rng = SmallRng::seed_from_u64(seed);
    let span = width.max(2) - 1;
    (0..height)
        .map(|_| {
            (0..width)
                .map(|col| {
                    let base = u8::try_from(col * 255 / span).unwrap_or(u8::MAX);
                    let mut channel = || base.saturating_add(rng.gen_range(0..=jitter));
                    [channel(), channel(), channel()]
                })
                .collect()
        })
        .collect()
}
