//! Error types for the pixseg core library.
//!
//! Grid validation failures and segmenter configuration failures are kept in
//! separate enums so callers can tell malformed input apart from a bad
//! parameter. Both expose stable machine-readable codes.

use std::fmt;

use thiserror::Error;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// An error produced while building a [`crate::PixelGrid`].
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum GridError {
    /// The grid contained no rows.
    #[error("pixel grid contains no rows")]
    EmptyGrid,
    /// The first row contained no pixels, so the grid has no width.
    #[error("pixel grid rows must contain at least one pixel")]
    EmptyRow,
    /// A row's length differed from the first row's length.
    #[error("row {row} has {found} pixels but the grid is {expected} pixels wide")]
    RaggedRow {
        /// Zero-based index of the offending row.
        row: usize,
        /// Width established by the first row.
        expected: usize,
        /// Number of pixels found in the offending row.
        found: usize,
    },
    /// A flat buffer did not hold exactly `width * height` pixels.
    #[error("a {width}x{height} grid cannot hold {len} pixels")]
    LengthMismatch {
        /// Requested grid width.
        width: usize,
        /// Requested grid height.
        height: usize,
        /// Number of pixels supplied.
        len: usize,
    },
    /// The grid dimensions overflow the addressable pixel count.
    #[error("a {width}x{height} grid exceeds the addressable pixel count")]
    TooLarge {
        /// Requested grid width.
        width: usize,
        /// Requested grid height.
        height: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`GridError`] variants.
    enum GridErrorCode for GridError {
        /// The grid contained no rows.
        EmptyGrid => EmptyGrid => "GRID_EMPTY",
        /// The first row contained no pixels.
        EmptyRow => EmptyRow => "GRID_EMPTY_ROW",
        /// A row's length differed from the first row's length.
        RaggedRow => RaggedRow { .. } => "GRID_RAGGED_ROW",
        /// A flat buffer did not match the requested dimensions.
        LengthMismatch => LengthMismatch { .. } => "GRID_LENGTH_MISMATCH",
        /// The grid dimensions overflow the addressable pixel count.
        TooLarge => TooLarge { .. } => "GRID_TOO_LARGE",
    }
}

/// Error type produced when configuring or running [`crate::Segmenter`].
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SegmenterError {
    /// Granularity must be finite and non-negative.
    #[error("granularity must be finite and non-negative (got {got})")]
    InvalidGranularity {
        /// The rejected granularity.
        got: f64,
    },
    /// Minimum segment size must be at least one pixel.
    #[error("min_segment_size must be at least 1 (got {got})")]
    InvalidMinSegmentSize {
        /// The rejected minimum segment size.
        got: usize,
    },
    /// The input grid was malformed.
    #[error("invalid pixel grid: {source}")]
    Grid {
        /// Underlying grid validation failure.
        #[from]
        source: GridError,
    },
    /// A color distance produced a weight the merge predicate cannot use.
    #[error("edge ({source_index}, {target_index}) has invalid weight {weight}")]
    InvalidWeight {
        /// Linear index of the lower endpoint.
        source_index: usize,
        /// Linear index of the upper endpoint.
        target_index: usize,
        /// The negative or non-finite weight.
        weight: f64,
    },
}

define_error_codes! {
    /// Stable codes describing [`SegmenterError`] variants.
    enum SegmenterErrorCode for SegmenterError {
        /// Granularity must be finite and non-negative.
        InvalidGranularity => InvalidGranularity { .. } => "SEGMENTER_INVALID_GRANULARITY",
        /// Minimum segment size must be at least one pixel.
        InvalidMinSegmentSize => InvalidMinSegmentSize { .. } => "SEGMENTER_INVALID_MIN_SEGMENT_SIZE",
        /// The input grid was malformed.
        GridFailure => Grid { .. } => "SEGMENTER_GRID_FAILURE",
        /// A color distance produced an unusable weight.
        InvalidWeight => InvalidWeight { .. } => "SEGMENTER_INVALID_WEIGHT",
    }
}

impl SegmenterError {
    /// Retrieve the inner [`GridErrorCode`] when the error originated in grid validation.
    #[must_use]
    pub const fn grid_code(&self) -> Option<GridErrorCode> {
        match self {
            Self::Grid { source } => Some(source.code()),
            _ => None,
        }
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, SegmenterError>;
