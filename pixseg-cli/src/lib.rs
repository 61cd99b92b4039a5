//! Support library for the `pixseg` binary.
//!
//! Exposes the command pipeline and logging set-up so doctests and
//! integration tests can drive the CLI without spawning a subprocess.

pub mod cli;
pub mod logging;
