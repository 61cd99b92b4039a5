//! Command-line interface orchestration for pixseg.
//!
//! The CLI offers a single `segment` command that reads a plain-text color
//! grid, runs the segmenter and prints either segment labels or display
//! colors.

mod commands;
mod grid_text;

pub use commands::{
    Cli, CliError, Command, ExecutionSummary, MetricArg, OutputFormat, Rendering, SegmentCommand,
    render_summary, run_cli,
};
pub use grid_text::parse_grid;

#[cfg(test)]
mod tests;
