//! Unit tests for the CLI commands and grid loading.

use super::commands::{derive_source_name, load_grid, run_segment};
use super::{
    Cli, CliError, Command, MetricArg, OutputFormat, Rendering, SegmentCommand, render_summary,
    run_cli,
};

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::Parser;
use pixseg_core::{Rgb, SegmenterError};
use pixseg_test_support::tracing::RecordingLayer;
use rstest::{fixture, rstest};
use tempfile::TempDir;
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;

type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Dark 2x2 block on the left, bright 2x2 block on the right.
const BLOCKS: &str = "\
; two flat blocks
#101010 #101010 #f0f0f0 #f0f0f0
#101010 #101010 #f0f0f0 #f0f0f0
";

#[fixture]
fn temp_dir() -> TempDir {
    match TempDir::new() {
        Ok(dir) => dir,
        Err(err) => panic!("failed to create temp dir: {err}"),
    }
}

fn create_grid_file(dir: &TempDir, name: &str, contents: &str) -> io::Result<PathBuf> {
    let path = dir.path().join(name);
    let mut file = File::create(&path)?;
    file.write_all(contents.as_bytes())?;
    Ok(path)
}

fn command(path: PathBuf) -> SegmentCommand {
    SegmentCommand {
        path,
        granularity: 100.0,
        min_segment_size: 1,
        metric: MetricArg::Euclidean,
        output: OutputFormat::Labels,
        seed: None,
        name: None,
    }
}

fn run_segment_expecting_error(cmd: SegmentCommand, panic_msg: &str) -> CliError {
    match run_segment(cmd) {
        Ok(_) => panic!("{panic_msg}"),
        Err(err) => err,
    }
}

#[rstest]
#[case::override_name("/tmp/photo.grid", Some("override"), "override")]
#[case::stem_with_extension("/tmp/photo.grid", None, "photo")]
#[case::stem_without_extension("/tmp/photo", None, "photo")]
#[case::missing_stem("", None, "grid")]
fn derive_source_name_selects_expected_name(
    #[case] raw_path: &str,
    #[case] override_name: Option<&'static str>,
    #[case] expected: &str,
) {
    assert_eq!(derive_source_name(Path::new(raw_path), override_name), expected);
}

#[rstest]
fn segment_labels_blocks(temp_dir: TempDir) -> TestResult {
    let path = create_grid_file(&temp_dir, "blocks.grid", BLOCKS)?;
    let summary = run_cli(Cli {
        command: Command::Segment(command(path)),
    })?;

    assert_eq!(summary.source, "blocks");
    assert_eq!(summary.rendering, Rendering::Labels);
    let labels: Vec<usize> = summary
        .segmentation
        .labels()
        .iter()
        .map(|id| id.get())
        .collect();
    assert_eq!(labels, vec![0, 0, 1, 1, 0, 0, 1, 1]);
    Ok(())
}

#[rstest]
#[case::sequential(None)]
#[case::seeded(Some(5))]
fn segment_colors_paints_each_block_once(
    temp_dir: TempDir,
    #[case] seed: Option<u64>,
) -> TestResult {
    let path = create_grid_file(&temp_dir, "blocks.grid", BLOCKS)?;
    let summary = run_segment(SegmentCommand {
        output: OutputFormat::Colors,
        seed,
        ..command(path)
    })?;

    let Rendering::Colors(colors) = &summary.rendering else {
        panic!("color output must carry a painted grid");
    };
    let rows: Vec<&[Rgb]> = colors.rows().collect();
    assert_eq!(rows[0][0], rows[1][1]);
    assert_eq!(rows[0][2], rows[1][3]);
    assert_ne!(rows[0][1], rows[0][2]);
    Ok(())
}

#[rstest]
fn minimum_size_merges_everything_on_small_grids(temp_dir: TempDir) -> TestResult {
    let path = create_grid_file(&temp_dir, "blocks.grid", BLOCKS)?;
    let summary = run_segment(SegmentCommand {
        min_segment_size: 5,
        ..command(path)
    })?;
    assert_eq!(summary.segmentation.segment_count(), 1);
    Ok(())
}

#[rstest]
fn manhattan_metric_is_forwarded(temp_dir: TempDir) -> TestResult {
    // Euclidean distance between the cells is 50, Manhattan 70.
    let path = create_grid_file(&temp_dir, "pair.grid", "#000000 #1e2800\n")?;
    let granularity = 60.0;

    let euclidean = run_segment(SegmentCommand {
        granularity,
        ..command(path.clone())
    })?;
    let manhattan = run_segment(SegmentCommand {
        granularity,
        metric: MetricArg::Manhattan,
        ..command(path)
    })?;

    assert_eq!(euclidean.segmentation.segment_count(), 1);
    assert_eq!(manhattan.segmentation.segment_count(), 2);
    Ok(())
}

#[rstest]
fn missing_files_surface_io_errors(temp_dir: TempDir) {
    let path = temp_dir.path().join("missing.grid");
    let err = run_segment_expecting_error(command(path.clone()), "missing file must fail");
    match err {
        CliError::Io { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[rstest]
fn malformed_cells_surface_parse_errors(temp_dir: TempDir) -> TestResult {
    let path = create_grid_file(&temp_dir, "bad.grid", "#000000\n#zzzzzz\n")?;
    let err = run_segment_expecting_error(command(path), "malformed cell must fail");
    assert!(matches!(err, CliError::Parse { line: 2, .. }));
    Ok(())
}

#[rstest]
#[case::negative_granularity(-1.0, 1)]
#[case::zero_min_segment_size(10.0, 0)]
fn invalid_parameters_fail_before_reading(
    temp_dir: TempDir,
    #[case] granularity: f64,
    #[case] min_segment_size: usize,
) {
    let path = temp_dir.path().join("never-read.grid");
    let err = run_segment_expecting_error(
        SegmentCommand {
            granularity,
            min_segment_size,
            ..command(path)
        },
        "invalid parameters must fail",
    );
    assert!(matches!(
        err,
        CliError::Core(
            SegmenterError::InvalidGranularity { .. } | SegmenterError::InvalidMinSegmentSize { .. }
        )
    ));
}

#[rstest]
fn render_summary_writes_labels(temp_dir: TempDir) -> TestResult {
    let path = create_grid_file(&temp_dir, "blocks.grid", BLOCKS)?;
    let summary = run_segment(SegmentCommand {
        name: Some("demo".into()),
        ..command(path)
    })?;

    let mut buffer = Vec::new();
    render_summary(&summary, &mut buffer)?;
    assert_eq!(
        String::from_utf8(buffer)?,
        "source: demo\nsize: 4x2\nsegments: 2\n0\t0\t1\t1\n0\t0\t1\t1\n"
    );
    Ok(())
}

#[rstest]
fn render_summary_writes_hex_colors(temp_dir: TempDir) -> TestResult {
    let path = create_grid_file(&temp_dir, "blocks.grid", BLOCKS)?;
    let summary = run_segment(SegmentCommand {
        output: OutputFormat::Colors,
        ..command(path)
    })?;

    let mut buffer = Vec::new();
    render_summary(&summary, &mut buffer)?;
    let text = String::from_utf8(buffer)?;
    let rows: Vec<&str> = text.lines().skip(3).collect();
    assert_eq!(rows.len(), 2);
    for row in rows {
        let cells: Vec<&str> = row.split('\t').collect();
        assert_eq!(cells.len(), 4);
        assert!(cells.iter().all(|cell| cell.len() == 7 && cell.starts_with('#')));
        assert_eq!(cells[0], cells[1]);
        assert_ne!(cells[1], cells[2]);
    }
    Ok(())
}

#[rstest]
#[case::defaults(&["pixseg", "segment", "img.grid"], 300.0, 1, MetricArg::Euclidean, OutputFormat::Labels)]
#[case::overrides(
    &[
        "pixseg", "segment", "img.grid", "--granularity", "25.5", "--min-segment-size", "4",
        "--metric", "manhattan", "--output", "colors",
    ],
    25.5,
    4,
    MetricArg::Manhattan,
    OutputFormat::Colors,
)]
fn clap_parses_segment_options(
    #[case] args: &[&str],
    #[case] granularity: f64,
    #[case] min_segment_size: usize,
    #[case] metric: MetricArg,
    #[case] output: OutputFormat,
) {
    let cli = Cli::try_parse_from(args).expect("arguments must parse");
    let Command::Segment(segment) = cli.command;
    assert_eq!(segment.path, PathBuf::from("img.grid"));
    assert_eq!(segment.granularity, granularity);
    assert_eq!(segment.min_segment_size, min_segment_size);
    assert_eq!(segment.metric, metric);
    assert_eq!(segment.output, output);
    assert_eq!(segment.seed, None);
}

#[rstest]
fn clap_rejects_unknown_metric() {
    let args = ["pixseg", "segment", "img.grid", "--metric", "cosine"];
    assert!(Cli::try_parse_from(args).is_err());
}

#[rstest]
fn run_segment_emits_tracing_fields(temp_dir: TempDir) -> TestResult {
    let path = create_grid_file(&temp_dir, "blocks.grid", BLOCKS)?;
    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());

    let summary = tracing::subscriber::with_default(subscriber, || run_segment(command(path)))?;
    assert_eq!(summary.source, "blocks");

    let segment = layer
        .span("cli.segment")
        .expect("cli.segment span must exist");
    assert!(
        segment
            .fields
            .get("path")
            .is_some_and(|value| value.ends_with("blocks.grid"))
    );
    assert_eq!(segment.fields.get("source"), Some(&"blocks".to_owned()));
    assert_eq!(segment.fields.get("output"), Some(&"Labels".to_owned()));
    assert!(layer.span("cli.load_grid").is_some());
    assert!(layer.span("core.segment").is_some());

    let completed = layer
        .event(Level::INFO, "command completed")
        .expect("completion event must be emitted");
    assert_eq!(completed.fields.get("segments"), Some(&"2".to_owned()));
    Ok(())
}

#[rstest]
fn load_grid_records_path_on_failure(temp_dir: TempDir) {
    let path = temp_dir.path().join("missing.grid");
    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());

    let result = tracing::subscriber::with_default(subscriber, || load_grid(&path));
    assert!(matches!(result, Err(CliError::Io { .. })));

    let span = layer
        .span("cli.load_grid")
        .expect("cli.load_grid span must exist");
    assert!(
        span.fields
            .get("path")
            .is_some_and(|value| value.ends_with("missing.grid"))
    );
    assert!(layer.events().iter().any(|event| event.level == Level::ERROR));
}
