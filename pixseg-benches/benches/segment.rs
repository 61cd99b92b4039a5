//! End-to-end segmentation benchmarks.
//!
//! Measures graph construction, the merge pass and labelling together over
//! synthetic images of increasing size and varying structure.
#![expect(
    missing_docs,
    reason = "Criterion macros generate items without doc comments"
)]
#![expect(
    clippy::shadow_reuse,
    reason = "Criterion bench_with_input closures rebind parameter names"
)]
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use pixseg_benches::{
    error::BenchSetupError,
    params::{ImageBenchParams, SegmentBenchParams},
    source::{ImagePattern, SyntheticImageConfig},
};
use pixseg_core::SegmenterBuilder;

/// Seed used for all synthetic image generation in this benchmark.
const SEED: u64 = 42;

/// Image sides to benchmark.
const SIDES: &[usize] = &[32, 64, 128];

/// Granularity values swept by the granularity benchmark.
const GRANULARITIES: &[f64] = &[50.0, 300.0, 1_000.0];

fn segment_patterns_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let mut group = c.benchmark_group("segment_patterns");
    group.sample_size(20);

    let segmenter = SegmenterBuilder::new().build()?;
    let patterns = [
        ("noise", ImagePattern::Noise),
        ("blobs", ImagePattern::Blobs { count: 12 }),
        ("gradient", ImagePattern::Gradient { jitter: 6 }),
    ];

    for &side in SIDES {
        let image = ImageBenchParams::square(side);
        for (label, pattern) in patterns {
            let grid = SyntheticImageConfig {
                width: image.width,
                height: image.height,
                pattern,
                seed: SEED,
            }
            .generate()?;

            group.bench_with_input(
                BenchmarkId::new(label, image),
                &grid,
                |b, grid| {
                    b.iter(|| segmenter.segment(grid));
                },
            );
        }
    }

    group.finish();
    Ok(())
}

fn segment_granularity_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let mut group = c.benchmark_group("segment_granularity");
    group.sample_size(20);

    let image = ImageBenchParams::square(96);
    let grid = SyntheticImageConfig {
        width: image.width,
        height: image.height,
        pattern: ImagePattern::Gradient { jitter: 12 },
        seed: SEED,
    }
    .generate()?;

    for &granularity in GRANULARITIES {
        for min_segment_size in [1, 20] {
            let params = SegmentBenchParams {
                image,
                granularity,
                min_segment_size,
            };
            let segmenter = SegmenterBuilder::new()
                .with_granularity(granularity)
                .with_min_segment_size(min_segment_size)
                .build()?;

            group.bench_with_input(
                BenchmarkId::from_parameter(&params),
                &grid,
                |b, grid| {
                    b.iter(|| segmenter.segment(grid));
                },
            );
        }
    }

    group.finish();
    Ok(())
}

fn segment_patterns(c: &mut Criterion) {
    if let Err(err) = segment_patterns_impl(c) {
        panic!("segment_patterns benchmark setup failed: {err}");
    }
}

fn segment_granularity(c: &mut Criterion) {
    if let Err(err) = segment_granularity_impl(c) {
        panic!("segment_granularity benchmark setup failed: {err}");
    }
}

criterion_group!(benches, segment_patterns, segment_granularity);
criterion_main!(benches);
