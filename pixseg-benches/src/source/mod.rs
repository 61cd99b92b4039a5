//! Synthetic benchmark images.
//!
//! Generates seeded [`PixelGrid`]s with controllable structure so that
//! benchmark runs are reproducible across machines.

mod errors;

pub use errors::SyntheticError;

use pixseg_core::{PixelGrid, Rgb};
use rand::{Rng, SeedableRng, rngs::SmallRng};

/// Layout of the generated colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImagePattern {
    /// Every pixel drawn independently. Worst case for merging.
    Noise,
    /// Flat regions around `count` random seeds, each pixel taking the
    /// color of its nearest seed.
    Blobs {
        /// Number of regions.
        count: usize,
    },
    /// Horizontal red ramp with per-pixel jitter of up to `jitter` levels.
    Gradient {
        /// Maximum absolute per-channel perturbation.
        jitter: u8,
    },
}

/// Configuration for [`SyntheticImageConfig::generate`].
#[derive(Clone, Copy, Debug)]
pub struct SyntheticImageConfig {
    /// Number of columns.
    pub width: usize,
    /// Number of rows.
    pub height: usize,
    /// Color layout.
    pub pattern: ImagePattern,
    /// Seed for the deterministic generator.
    pub seed: u64,
}

#[derive(Clone, Copy)]
struct BlobSeed {
    row: usize,
    col: usize,
    color: Rgb,
}

impl SyntheticImageConfig {
    /// Generates the configured image.
    ///
    /// # Errors
    /// Returns [`SyntheticError`] for zero dimensions, an overflowing pixel
    /// count, or a blob count of zero or above the pixel count.
    pub fn generate(&self) -> Result<PixelGrid, SyntheticError> {
        if self.width == 0 {
            return Err(SyntheticError::ZeroWidth);
        }
        if self.height == 0 {
            return Err(SyntheticError::ZeroHeight);
        }
        let pixel_count = self
            .width
            .checked_mul(self.height)
            .ok_or(SyntheticError::Overflow)?;

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let colors = match self.pattern {
            ImagePattern::Noise => (0..pixel_count).map(|_| random_color(&mut rng)).collect(),
            ImagePattern::Blobs { count } => {
                if count == 0 {
                    return Err(SyntheticError::ZeroBlobs);
                }
                if count > pixel_count {
                    return Err(SyntheticError::BlobCountExceedsPixelCount {
                        blob_count: count,
                        pixel_count,
                    });
                }
                self.blobs(&mut rng, count)
            }
            ImagePattern::Gradient { jitter } => self.gradient(&mut rng, jitter),
        };
        Ok(PixelGrid::from_raw(self.width, self.height, colors)?)
    }

    fn blobs(&self, rng: &mut SmallRng, count: usize) -> Vec<Rgb> {
        let seeds: Vec<BlobSeed> = (0..count)
            .map(|_| BlobSeed {
                row: rng.gen_range(0..self.height),
                col: rng.gen_range(0..self.width),
                color: random_color(rng),
            })
            .collect();

        self.coordinates()
            .map(|(row, col)| {
                seeds
                    .iter()
                    .min_by_key(|seed| seed.row.abs_diff(row) + seed.col.abs_diff(col))
                    .map_or_else(Rgb::default, |seed| seed.color)
            })
            .collect()
    }

    fn gradient(&self, rng: &mut SmallRng, jitter: u8) -> Vec<Rgb> {
        let spread = i16::from(jitter);
        self.coordinates()
            .map(|(_, col)| {
                let base = (col * 255)
                    .checked_div(self.width)
                    .and_then(|level| u8::try_from(level).ok())
                    .unwrap_or(u8::MAX);
                let mut channel = |value: u8| {
                    let offset = if spread == 0 {
                        0
                    } else {
                        rng.gen_range(-spread..=spread)
                    };
                    clamp_channel(i16::from(value) + offset)
                };
                Rgb::new(channel(base), channel(64), channel(128))
            })
            .collect()
    }

    fn coordinates(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.height).flat_map(move |row| (0..self.width).map(move |col| (row, col)))
    }
}

fn random_color(rng: &mut SmallRng) -> Rgb {
    let [r, g, b]: [u8; 3] = rng.r#gen();
    Rgb::new(r, g, b)
}

fn clamp_channel(value: i16) -> u8 {
    u8::try_from(value.clamp(0, 255)).unwrap_or(u8::MAX)
}
