//! Plain-text pixel grid format read by the CLI.
//!
//! One grid row per line, cells separated by whitespace, each cell a
//! `#rrggbb` color (the `#` is optional). Blank lines and lines starting
//! with `;` are skipped.

use pixseg_core::{PixelGrid, Rgb, SegmenterError};

use super::CliError;

/// Comment marker recognised at the start of a line.
const COMMENT_PREFIX: char = ';';

/// Parses `text` into a [`PixelGrid`].
///
/// # Errors
/// Returns [`CliError::Parse`] for a cell that is not a hex color and
/// [`CliError::Core`] wrapping the grid error when the rows are empty or
/// ragged.
///
/// # Examples
/// ```
/// use pixseg_cli::cli::parse_grid;
///
/// let grid = parse_grid("; two by two\n#000000 #ffffff\n000000 ffffff\n")?;
/// assert_eq!((grid.width(), grid.height()), (2, 2));
/// # Ok::<(), pixseg_cli::cli::CliError>(())
/// ```
pub fn parse_grid(text: &str) -> Result<PixelGrid, CliError> {
    let mut rows = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with(COMMENT_PREFIX) {
            continue;
        }
        let row = line
            .split_whitespace()
            .map(|cell| {
                cell.parse::<Rgb>().map_err(|err| CliError::Parse {
                    line: index + 1,
                    reason: err.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        rows.push(row);
    }
    PixelGrid::try_from_rows(rows)
        .map_err(SegmenterError::from)
        .map_err(CliError::from)
}
