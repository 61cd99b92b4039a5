//! Color dissimilarity used as edge weight.
//!
//! The segmenter treats the distance as an opaque collaborator: any
//! deterministic, symmetric, non-negative function of two colors works.
//! [`ColorMetric`] covers the built-in choices.

use std::fmt;

use crate::grid::Rgb;

/// A dissimilarity measure between two colors.
///
/// Implementations must be deterministic and symmetric and return finite,
/// non-negative values. The graph builder rejects anything else.
///
/// # Examples
/// ```
/// use pixseg_core::{ColorDistance, Rgb};
///
/// struct RedOnly;
///
/// impl ColorDistance for RedOnly {
///     fn distance(&self, left: Rgb, right: Rgb) -> f64 {
///         f64::from(left.r.abs_diff(right.r))
///     }
/// }
///
/// assert_eq!(RedOnly.distance(Rgb::new(10, 0, 0), Rgb::new(3, 99, 99)), 7.0);
/// ```
pub trait ColorDistance {
    /// Returns the distance between `left` and `right`.
    fn distance(&self, left: Rgb, right: Rgb) -> f64;
}

impl<D: ColorDistance + ?Sized> ColorDistance for &D {
    fn distance(&self, left: Rgb, right: Rgb) -> f64 {
        (**self).distance(left, right)
    }
}

/// Built-in color metrics over RGB channels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ColorMetric {
    /// Straight-line distance in RGB space.
    #[default]
    Euclidean,
    /// Sum of absolute channel differences.
    Manhattan,
}

impl ColorMetric {
    /// Returns the lowercase metric name used in logs and on the CLI.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Euclidean => "euclidean",
            Self::Manhattan => "manhattan",
        }
    }
}

impl fmt::Display for ColorMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ColorDistance for ColorMetric {
    fn distance(&self, left: Rgb, right: Rgb) -> f64 {
        match self {
            Self::Euclidean => euclidean_distance(left, right),
            Self::Manhattan => manhattan_distance(left, right),
        }
    }
}

/// Computes the Euclidean distance between two colors.
///
/// # Examples
/// ```
/// use pixseg_core::{Rgb, euclidean_distance};
///
/// let distance = euclidean_distance(Rgb::new(0, 0, 0), Rgb::new(3, 4, 0));
/// assert_eq!(distance, 5.0);
/// ```
#[must_use]
pub fn euclidean_distance(left: Rgb, right: Rgb) -> f64 {
    let sum: u32 = left
        .channels()
        .iter()
        .zip(right.channels())
        .map(|(&l, r)| {
            let diff = u32::from(l.abs_diff(r));
            diff * diff
        })
        .sum();
    f64::from(sum).sqrt()
}

/// Computes the Manhattan distance between two colors.
///
/// # Examples
/// ```
/// use pixseg_core::{Rgb, manhattan_distance};
///
/// let distance = manhattan_distance(Rgb::new(10, 0, 5), Rgb::new(0, 4, 5));
/// assert_eq!(distance, 14.0);
/// ```
#[must_use]
pub fn manhattan_distance(left: Rgb, right: Rgb) -> f64 {
    let sum: u32 = left
        .channels()
        .iter()
        .zip(right.channels())
        .map(|(&l, r)| u32::from(l.abs_diff(r)))
        .sum();
    f64::from(sum)
}

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;
    use rstest::rstest;

    fn rgb() -> impl Strategy<Value = Rgb> {
        any::<[u8; 3]>().prop_map(Rgb::from)
    }

    #[rstest]
    #[case::identical(Rgb::new(7, 7, 7), Rgb::new(7, 7, 7), 0.0, 0.0)]
    #[case::single_channel(Rgb::new(0, 0, 0), Rgb::new(0, 9, 0), 9.0, 9.0)]
    #[case::corners(Rgb::new(0, 0, 0), Rgb::new(255, 255, 255), 441.672_955_930_063_7, 765.0)]
    fn metrics_match_hand_computed_values(
        #[case] left: Rgb,
        #[case] right: Rgb,
        #[case] euclidean: f64,
        #[case] manhattan: f64,
    ) {
        assert!((ColorMetric::Euclidean.distance(left, right) - euclidean).abs() < 1e-9);
        assert!((ColorMetric::Manhattan.distance(left, right) - manhattan).abs() < 1e-9);
    }

    proptest! {
        #[test]
        fn metrics_are_symmetric_and_non_negative(left in rgb(), right in rgb()) {
            for metric in [ColorMetric::Euclidean, ColorMetric::Manhattan] {
                let forward = metric.distance(left, right);
                let backward = metric.distance(right, left);
                prop_assert!(forward.is_finite());
                prop_assert!(forward >= 0.0);
                prop_assert_eq!(forward, backward);
                prop_assert_eq!(forward == 0.0, left == right);
            }
        }
    }
}
