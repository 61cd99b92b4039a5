//! Command implementations and argument parsing for the pixseg CLI.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use pixseg_core::{
    ColorAllocator, ColorMetric, DEFAULT_GRANULARITY, PixelGrid, RandomPalette, Segmentation,
    SegmenterBuilder, SegmenterError, SequentialPalette,
};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

use super::grid_text::parse_grid;

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(name = "pixseg", about = "Segment a color grid into coherent regions.")]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Segment a plain-text color grid.
    Segment(SegmentCommand),
}

/// Options accepted by the `segment` command.
#[derive(Debug, Args, Clone)]
pub struct SegmentCommand {
    /// Path to a text file with one row of `#rrggbb` cells per line.
    pub path: PathBuf,

    /// Larger values favour fewer, larger segments.
    #[arg(long, default_value_t = DEFAULT_GRANULARITY)]
    pub granularity: f64,

    /// Segments smaller than this are folded into a neighbour.
    #[arg(
        long = "min-segment-size",
        default_value_t = 1,
        value_parser = clap::value_parser!(usize),
    )]
    pub min_segment_size: usize,

    /// Color distance used to weigh neighbouring pixels.
    #[arg(long, value_enum, default_value_t = MetricArg::Euclidean)]
    pub metric: MetricArg,

    /// Whether to print segment labels or display colors.
    #[arg(long, value_enum, default_value_t = OutputFormat::Labels)]
    pub output: OutputFormat,

    /// Seed for random display colors; distinct sequential colors otherwise.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Override name for the source (defaults to the file name).
    #[arg(long)]
    pub name: Option<String>,
}

/// Color metrics selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MetricArg {
    /// Straight-line distance in RGB space.
    Euclidean,
    /// Sum of per-channel differences.
    Manhattan,
}

impl From<MetricArg> for ColorMetric {
    fn from(metric: MetricArg) -> Self {
        match metric {
            MetricArg::Euclidean => Self::Euclidean,
            MetricArg::Manhattan => Self::Manhattan,
        }
    }
}

/// What the summary prints per pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Numeric segment labels.
    Labels,
    /// One display color per segment.
    Colors,
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// The input file could not be read.
    #[error("failed to read `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// A line of the input grid was malformed.
    #[error("line {line}: {reason}")]
    Parse {
        /// One-based line number in the input file.
        line: usize,
        /// Description of the malformed content.
        reason: String,
    },
    /// Configuration, grid validation or segmentation failed.
    #[error(transparent)]
    Core(#[from] SegmenterError),
}

/// Per-pixel output chosen by [`OutputFormat`].
#[derive(Debug, Clone, PartialEq)]
pub enum Rendering {
    /// Print the segmentation's labels.
    Labels,
    /// Print these display colors.
    Colors(PixelGrid),
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug, Clone)]
pub struct ExecutionSummary {
    /// Name of the segmented source.
    pub source: String,
    /// Labels produced by the segmenter.
    pub segmentation: Segmentation,
    /// What [`render_summary`] prints per pixel.
    pub rendering: Rendering,
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when reading, parsing or segmentation fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use pixseg_cli::cli::{Cli, Command, MetricArg, OutputFormat, SegmentCommand, run_cli};
/// # use tempfile::NamedTempFile;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let file = NamedTempFile::new()?;
/// std::fs::write(file.path(), "#000000 #000000 #ffffff\n")?;
/// let cli = Cli {
///     command: Command::Segment(SegmentCommand {
///         path: file.path().to_path_buf(),
///         granularity: 10.0,
///         min_segment_size: 1,
///         metric: MetricArg::Euclidean,
///         output: OutputFormat::Labels,
///         seed: None,
///         name: None,
///     }),
/// };
/// let summary = run_cli(cli)?;
/// assert_eq!(summary.segmentation.segment_count(), 2);
/// # Ok(())
/// # }
/// ```
#[instrument(name = "cli.run", err, skip(cli), fields(command = field::Empty))]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    match cli.command {
        Command::Segment(segment) => {
            Span::current().record("command", field::display("segment"));
            run_segment(segment)
        }
    }
}

#[instrument(
    name = "cli.segment",
    err,
    skip(command),
    fields(path = field::Empty, source = field::Empty, output = field::Empty),
)]
pub(super) fn run_segment(command: SegmentCommand) -> Result<ExecutionSummary, CliError> {
    let SegmentCommand {
        path,
        granularity,
        min_segment_size,
        metric,
        output,
        seed,
        name,
    } = command;
    let segmenter = SegmenterBuilder::new()
        .with_granularity(granularity)
        .with_min_segment_size(min_segment_size)
        .with_metric(metric.into())
        .build()?;

    let source = derive_source_name(&path, name.as_deref());
    let span = Span::current();
    span.record("path", field::display(path.display()));
    span.record("source", field::display(&source));
    span.record("output", field::debug(output));

    let grid = load_grid(&path)?;
    let segmentation = segmenter.segment(&grid)?;
    let rendering = match output {
        OutputFormat::Labels => Rendering::Labels,
        OutputFormat::Colors => Rendering::Colors(paint(&segmentation, seed)),
    };

    info!(
        source = source.as_str(),
        segments = segmentation.segment_count(),
        "command completed"
    );
    Ok(ExecutionSummary {
        source,
        segmentation,
        rendering,
    })
}

fn paint(segmentation: &Segmentation, seed: Option<u64>) -> PixelGrid {
    let mut allocator: Box<dyn ColorAllocator> = match seed {
        Some(seed) => Box::new(RandomPalette::seeded(seed)),
        None => Box::new(SequentialPalette::new()),
    };
    segmentation.paint(allocator.as_mut())
}

#[instrument(name = "cli.load_grid", err, fields(path = field::Empty))]
pub(super) fn load_grid(path: &Path) -> Result<PixelGrid, CliError> {
    Span::current().record("path", field::display(path.display()));
    let text = fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_grid(&text)
}

pub(super) fn derive_source_name(path: &Path, override_name: Option<&str>) -> String {
    if let Some(name) = override_name {
        return name.to_owned();
    }

    path.file_stem()
        .and_then(|value| value.to_str())
        .map_or_else(|| "grid".to_owned(), ToOwned::to_owned)
}

/// Renders `summary` to `writer`: a short header followed by one
/// tab-separated line per grid row.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use pixseg_cli::cli::{ExecutionSummary, Rendering, render_summary};
/// # use pixseg_core::{PixelGrid, SegmenterBuilder};
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let grid = PixelGrid::try_from_rows(vec![vec![[0, 0, 0], [255, 255, 255]]])?;
/// let segmentation = SegmenterBuilder::new().with_granularity(0.0).build()?.segment(&grid)?;
/// let summary = ExecutionSummary {
///     source: "demo".into(),
///     segmentation,
///     rendering: Rendering::Labels,
/// };
/// let mut buffer = Vec::new();
/// render_summary(&summary, &mut buffer)?;
/// assert_eq!(
///     String::from_utf8(buffer)?,
///     "source: demo\nsize: 2x1\nsegments: 2\n0\t1\n"
/// );
/// # Ok(())
/// # }
/// ```
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    let segmentation = &summary.segmentation;
    writeln!(writer, "source: {}", summary.source)?;
    writeln!(
        writer,
        "size: {}x{}",
        segmentation.width(),
        segmentation.height()
    )?;
    writeln!(writer, "segments: {}", segmentation.segment_count())?;
    match &summary.rendering {
        Rendering::Labels => {
            for row in segmentation.rows() {
                write_row(&mut writer, row.iter().map(|id| id.get()))?;
            }
        }
        Rendering::Colors(colors) => {
            for row in colors.rows() {
                write_row(&mut writer, row.iter())?;
            }
        }
    }
    Ok(())
}

fn write_row<T: std::fmt::Display>(
    writer: &mut impl Write,
    cells: impl IntoIterator<Item = T>,
) -> io::Result<()> {
    for (index, cell) in cells.into_iter().enumerate() {
        if index > 0 {
            writer.write_all(b"\t")?;
        }
        write!(writer, "{cell}")?;
    }
    writeln!(writer)
}
