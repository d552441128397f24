//! Stratus Core - DSP building blocks for the stratus reverberation engine
//!
//! This crate provides the primitives the reverb core is assembled from,
//! designed for real-time block processing with zero allocation in the
//! audio path:
//!
//! - [`BlockDelay`] - integer pre-delay with an owned per-block output
//! - [`OnePoleLowpass`] / [`OnePoleHighpass`] - 6 dB/oct pre-filters
//! - [`LowShelf`] / [`HighShelf`] - one-pole shelving filters
//! - [`ModulatedAllpass`] - allpass stage with an LFO-modulated tap
//! - [`AllpassDiffuser`] - seed-decorrelated serial allpass cascade
//! - [`FeedbackDelayLine`] - modulated, filtered late-reverb strand
//! - [`rand::generate`] - pure seeded sequences for structural randomness
//! - math helpers: [`flush_denormal`], [`db_to_linear`], [`ms_to_samples`], ...
//!
//! # Design Principles
//!
//! - **Real-time safe**: every buffer is allocated at construction and
//!   reused; `process`/`tick` never allocate, block or perform I/O
//! - **Deterministic structure**: all "random" layout decisions derive
//!   from pure seeded sequences, never from ambient RNG state
//! - **no_std compatible**: pure `no_std` + `alloc` with `libm` for math;
//!   disable the default `std` feature for embedded targets
//!
//! Processors follow one of two shapes: per-sample `tick(f32) -> f32` for
//! components that sit inside feedback loops, and block-based
//! `process(&[f32])` + `output()` with internally owned buffers for the
//! stage-sequenced top level.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod allpass;
pub mod delay;
pub mod delay_line;
pub mod diffuser;
pub mod math;
pub mod one_pole;
pub mod rand;
pub mod shelf;

// Re-export main types at crate root
pub use allpass::ModulatedAllpass;
pub use delay::BlockDelay;
pub use delay_line::FeedbackDelayLine;
pub use diffuser::{AllpassDiffuser, MAX_STAGES, SEEDS_PER_DIFFUSER};
pub use math::{
    db_to_linear, flush_denormal, lerp, linear_to_db, ms_to_samples, samples_to_ms,
};
pub use one_pole::{OnePoleHighpass, OnePoleLowpass};
pub use shelf::{HighShelf, LowShelf};
