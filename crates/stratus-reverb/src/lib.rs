//! Stratus Reverb - per-channel core of the stratus reverberation engine
//!
//! This crate assembles the primitives from `stratus-core` into one
//! complete mono reverb channel:
//!
//! - [`MultitapDiffuser`] - seed-decorrelated multitap early reflections
//! - [`Parameter`] - the closed set of channel controls
//! - [`ReverbChannel`] - the full signal path: pre-filters, pre-delay,
//!   early network and a bank of modulated feedback delay lines
//!
//! The channel is block-synchronous and single-threaded; parameter
//! changes and processing must be serialized by the caller. All buffers
//! are allocated at construction and the audio path never allocates.
//!
//! ## Example
//!
//! ```rust
//! use stratus_reverb::{Parameter, ReverbChannel};
//!
//! let mut channel = ReverbChannel::new(256, 48000.0);
//! channel.set_parameter(Parameter::TapCount, 24.0);
//! channel.set_parameter(Parameter::TapLength, 80.0);
//! channel.set_parameter(Parameter::TapGain, 1.0);
//! channel.set_parameter(Parameter::LineCount, 8.0);
//! channel.set_parameter(Parameter::LineDelay, 60.0);
//! channel.set_parameter(Parameter::LineFeedback, 0.75);
//! channel.set_parameter(Parameter::DryOut, 0.8);
//! channel.set_parameter(Parameter::MainOut, 0.4);
//!
//! let block = [0.0f32; 256];
//! channel.process(&block);
//! let _mixed = channel.output();
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod channel;
pub mod multitap;
pub mod params;

// Re-export main types at crate root
pub use channel::{ReverbChannel, TOTAL_LINE_COUNT};
pub use multitap::{MultitapDiffuser, MAX_TAPS};
pub use params::Parameter;
