//! Rectangular pixel grids.
//!
//! A [`PixelGrid`] is the only input the segmenter accepts. Construction
//! validates that the grid is non-empty and rectangular so the rest of the
//! pipeline can index it without further checks.

use std::{fmt, str::FromStr};

use crate::error::GridError;

/// A 24-bit RGB color.
///
/// # Examples
/// ```
/// use pixseg_core::Rgb;
///
/// let teal: Rgb = "#008080".parse()?;
/// assert_eq!(teal, Rgb::new(0, 128, 128));
/// assert_eq!(teal.to_string(), "#008080");
/// assert_eq!(Rgb::from_packed(teal.packed()), teal);
/// # Ok::<(), pixseg_core::ParseRgbError>(())
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Creates a color from its three channels.
    #[rustfmt::skip]
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self { Self { r, g, b } }

    /// Builds a color from the low 24 bits of `packed` (`0xRRGGBB`).
    #[must_use]
    pub const fn from_packed(packed: u32) -> Self {
        Self {
            r: ((packed >> 16) & 0xFF) as u8,
            g: ((packed >> 8) & 0xFF) as u8,
            b: (packed & 0xFF) as u8,
        }
    }

    /// Returns the color packed as `0xRRGGBB`.
    #[must_use]
    pub const fn packed(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// Returns the channels as an array.
    #[rustfmt::skip]
    #[must_use]
    pub const fn channels(self) -> [u8; 3] { [self.r, self.g, self.b] }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(color: Rgb) -> Self {
        color.channels()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Error returned when text cannot be parsed as an [`Rgb`] hex triplet.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("`{input}` is not a #rrggbb color")]
pub struct ParseRgbError {
    input: String,
}

impl ParseRgbError {
    /// Returns the rejected text.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl FromStr for Rgb {
    type Err = ParseRgbError;

    /// Parses `#rrggbb` or `rrggbb` (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        let invalid = || ParseRgbError {
            input: s.to_owned(),
        };
        if digits.len() != 6 || !digits.bytes().all(|byte| byte.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        u32::from_str_radix(digits, 16)
            .map(Self::from_packed)
            .map_err(|_| invalid())
    }
}

/// A single grid cell: position plus color.
///
/// Two pixels with the same `(row, col)` denote the same graph node
/// regardless of color.
#[derive(Clone, Copy, Debug)]
pub struct Pixel {
    row: usize,
    col: usize,
    color: Rgb,
}

impl Pixel {
    /// Returns the zero-based row.
    #[rustfmt::skip]
    #[must_use]
    pub const fn row(&self) -> usize { self.row }

    /// Returns the zero-based column.
    #[rustfmt::skip]
    #[must_use]
    pub const fn col(&self) -> usize { self.col }

    /// Returns the pixel color.
    #[rustfmt::skip]
    #[must_use]
    pub const fn color(&self) -> Rgb { self.color }
}

impl PartialEq for Pixel {
    fn eq(&self, other: &Self) -> bool {
        self.row == other.row && self.col == other.col
    }
}

impl Eq for Pixel {}

impl std::hash::Hash for Pixel {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        (self.row, self.col).hash(state);
    }
}

/// A non-empty, rectangular, row-major grid of colors.
///
/// # Examples
/// ```
/// use pixseg_core::{PixelGrid, Rgb};
///
/// let grid = PixelGrid::try_from_rows(vec![
///     vec![[0, 0, 0], [255, 255, 255]],
///     vec![[10, 20, 30], [40, 50, 60]],
/// ])?;
/// assert_eq!((grid.width(), grid.height()), (2, 2));
/// assert_eq!(grid.get(1, 0), Some(Rgb::new(10, 20, 30)));
/// assert_eq!(grid.index(1, 1), Some(3));
/// # Ok::<(), pixseg_core::GridError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelGrid {
    width: usize,
    height: usize,
    colors: Vec<Rgb>,
}

impl PixelGrid {
    /// Builds a grid from rows of colors.
    ///
    /// # Errors
    /// Returns [`GridError::EmptyGrid`] when there are no rows,
    /// [`GridError::EmptyRow`] when the first row is empty, and
    /// [`GridError::RaggedRow`] when any row differs in length from the first.
    pub fn try_from_rows<R, C>(rows: impl IntoIterator<Item = R>) -> Result<Self, GridError>
    where
        R: IntoIterator<Item = C>,
        C: Into<Rgb>,
    {
        let mut colors = Vec::new();
        let mut width = None;
        let mut height = 0_usize;

        for (row, cells) in rows.into_iter().enumerate() {
            let before = colors.len();
            colors.extend(cells.into_iter().map(Into::into));
            let found = colors.len() - before;
            match width {
                None if found == 0 => return Err(GridError::EmptyRow),
                None => width = Some(found),
                Some(expected) if expected != found => {
                    return Err(GridError::RaggedRow {
                        row,
                        expected,
                        found,
                    });
                }
                Some(_) => {}
            }
            height += 1;
        }

        let width = width.ok_or(GridError::EmptyGrid)?;
        Ok(Self {
            width,
            height,
            colors,
        })
    }

    /// Builds a grid from a flat row-major buffer.
    ///
    /// # Errors
    /// Returns [`GridError::EmptyGrid`] or [`GridError::EmptyRow`] for zero
    /// dimensions, [`GridError::TooLarge`] when `width * height` overflows and
    /// [`GridError::LengthMismatch`] when the buffer length is wrong.
    pub fn from_raw(width: usize, height: usize, colors: Vec<Rgb>) -> Result<Self, GridError> {
        if height == 0 {
            return Err(GridError::EmptyGrid);
        }
        if width == 0 {
            return Err(GridError::EmptyRow);
        }
        let expected = width
            .checked_mul(height)
            .ok_or(GridError::TooLarge { width, height })?;
        if colors.len() != expected {
            return Err(GridError::LengthMismatch {
                width,
                height,
                len: colors.len(),
            });
        }
        Ok(Self {
            width,
            height,
            colors,
        })
    }

    /// Wraps a buffer whose dimensions were already validated by another grid.
    pub(crate) fn from_parts(width: usize, height: usize, colors: Vec<Rgb>) -> Self {
        debug_assert_eq!(colors.len(), width * height);
        Self {
            width,
            height,
            colors,
        }
    }

    /// Builds a `width` x `height` grid filled with one color.
    ///
    /// # Errors
    /// Same conditions as [`Self::from_raw`] for the dimensions.
    pub fn filled(width: usize, height: usize, color: Rgb) -> Result<Self, GridError> {
        let len = width
            .checked_mul(height)
            .ok_or(GridError::TooLarge { width, height })?;
        Self::from_raw(width, height, vec![color; len])
    }

    /// Returns the number of columns.
    #[rustfmt::skip]
    #[must_use]
    pub fn width(&self) -> usize { self.width }

    /// Returns the number of rows.
    #[rustfmt::skip]
    #[must_use]
    pub fn height(&self) -> usize { self.height }

    /// Returns the number of pixels.
    #[rustfmt::skip]
    #[must_use]
    pub fn len(&self) -> usize { self.colors.len() }

    /// Always `false`; construction rejects empty grids.
    #[rustfmt::skip]
    #[must_use]
    pub fn is_empty(&self) -> bool { self.colors.is_empty() }

    /// Returns the row-major linear index of `(row, col)` when in bounds.
    #[must_use]
    pub fn index(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.height && col < self.width).then(|| row * self.width + col)
    }

    /// Returns the color at `(row, col)` when in bounds.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<Rgb> {
        self.index(row, col)
            .and_then(|index| self.colors.get(index).copied())
    }

    /// Returns the pixel stored at linear `index` when in bounds.
    #[must_use]
    pub fn pixel(&self, index: usize) -> Option<Pixel> {
        let color = *self.colors.get(index)?;
        Some(Pixel {
            row: index / self.width,
            col: index % self.width,
            color,
        })
    }

    /// Iterates over every pixel in row-major order.
    pub fn pixels(&self) -> impl ExactSizeIterator<Item = Pixel> + '_ {
        let width = self.width;
        self.colors
            .iter()
            .enumerate()
            .map(move |(index, &color)| Pixel {
                row: index / width,
                col: index % width,
                color,
            })
    }

    /// Iterates over the rows as slices.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[Rgb]> + '_ {
        self.colors.chunks_exact(self.width)
    }

    /// Returns the flat row-major color buffer.
    #[rustfmt::skip]
    #[must_use]
    pub fn as_slice(&self) -> &[Rgb] { &self.colors }
}
