//! Real-world scenario benchmarks.
//!
//! The audio-thread renderer under click load, and the control-side
//! scheduler tick.

mod clicks;

pub use clicks::{bench_renderer, bench_scheduler};
