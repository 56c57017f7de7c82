//! Composable building blocks for constructing click sounds.
//!
//! Graph nodes wrap the low-level DSP primitives with the ergonomics needed
//! for voice design: trigger events and block-based rendering. The
//! `extensions` module adds fluent helpers so voices read as a chain.

/// Multiply a signal by a gating modulator (envelope).
pub mod amplify;
/// One-shot decay envelope node.
pub mod envelope;
/// Fluent combinators (`.amplify()`).
pub mod extensions;
/// Core traits shared by all graph nodes.
pub mod node;
/// Audio-band sine oscillator node.
pub mod oscillator;

pub use node::{GraphNode, RenderCtx};
