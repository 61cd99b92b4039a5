//! Benchmark support for pixseg.
//!
//! Provides deterministic synthetic images and the parameter types used by
//! the Criterion benchmarks under `benches/`.

pub mod error;
pub mod params;
pub mod source;
