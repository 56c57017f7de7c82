//! Pre-built voices.
//!
//! # Example
//!
//! ```ignore
//! use saavy_metronome::voices;
//!
//! let click = voices::click(0.05);
//! ```

mod click;

pub use click::{click, Click};
