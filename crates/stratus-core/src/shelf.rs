//! One-pole shelving filters for the per-line frequency response.
//!
//! Each shelf splits the signal with a one-pole crossover and scales one
//! band: `low_shelf = gain·low + high`, `high_shelf = low + gain·high`.
//! The unscaled band passes through untouched and the filter stays stable
//! for any non-negative gain. 6 dB/octave transition, one state variable
//! each.

use crate::flush_denormal;
use libm::expf;

/// Shared one-pole band splitter.
#[derive(Debug, Clone)]
struct Crossover {
    state: f32,
    coeff: f32,
    sample_rate: f32,
    frequency_hz: f32,
}

impl Crossover {
    fn new(sample_rate: f32, frequency_hz: f32) -> Self {
        let mut splitter = Self {
            state: 0.0,
            coeff: 0.0,
            sample_rate,
            frequency_hz,
        };
        splitter.recalculate();
        splitter
    }

    fn set_frequency_hz(&mut self, frequency_hz: f32) {
        self.frequency_hz = frequency_hz.max(1.0);
        self.recalculate();
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.recalculate();
    }

    fn recalculate(&mut self) {
        self.coeff = expf(-core::f32::consts::TAU * self.frequency_hz / self.sample_rate);
    }

    /// Split one sample into its (low, high) bands.
    #[inline]
    fn split(&mut self, input: f32) -> (f32, f32) {
        self.state = flush_denormal(input + self.coeff * (self.state - input));
        (self.state, input - self.state)
    }
}

/// Low shelf: scales everything below the corner frequency.
///
/// Gain is linear (1.0 = flat); the band above the corner passes through
/// unchanged.
#[derive(Debug, Clone)]
pub struct LowShelf {
    crossover: Crossover,
    gain: f32,
}

impl LowShelf {
    /// Create a flat (unity-gain) low shelf.
    pub fn new(sample_rate: f32, frequency_hz: f32) -> Self {
        Self {
            crossover: Crossover::new(sample_rate, frequency_hz),
            gain: 1.0,
        }
    }

    /// Set the shelf corner frequency in Hz.
    pub fn set_frequency_hz(&mut self, frequency_hz: f32) {
        self.crossover.set_frequency_hz(frequency_hz);
    }

    /// Set the linear gain applied below the corner (clamped at 0).
    pub fn set_gain(&mut self, gain: f32) {
        self.gain = gain.max(0.0);
    }

    /// Current linear shelf gain.
    pub fn gain(&self) -> f32 {
        self.gain
    }

    /// Update the sample rate, keeping the configured corner.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.crossover.set_sample_rate(sample_rate);
    }

    /// Filter one sample.
    #[inline]
    pub fn tick(&mut self, input: f32) -> f32 {
        let (low, high) = self.crossover.split(input);
        self.gain * low + high
    }

    /// Zero the filter state.
    pub fn reset(&mut self) {
        self.crossover.state = 0.0;
    }
}

/// High shelf: scales everything above the corner frequency.
#[derive(Debug, Clone)]
pub struct HighShelf {
    crossover: Crossover,
    gain: f32,
}

impl HighShelf {
    /// Create a flat (unity-gain) high shelf.
    pub fn new(sample_rate: f32, frequency_hz: f32) -> Self {
        Self {
            crossover: Crossover::new(sample_rate, frequency_hz),
            gain: 1.0,
        }
    }

    /// Set the shelf corner frequency in Hz.
    pub fn set_frequency_hz(&mut self, frequency_hz: f32) {
        self.crossover.set_frequency_hz(frequency_hz);
    }

    /// Set the linear gain applied above the corner (clamped at 0).
    pub fn set_gain(&mut self, gain: f32) {
        self.gain = gain.max(0.0);
    }

    /// Current linear shelf gain.
    pub fn gain(&self) -> f32 {
        self.gain
    }

    /// Update the sample rate, keeping the configured corner.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.crossover.set_sample_rate(sample_rate);
    }

    /// Filter one sample.
    #[inline]
    pub fn tick(&mut self, input: f32) -> f32 {
        let (low, high) = self.crossover.split(input);
        low + self.gain * high
    }

    /// Zero the filter state.
    pub fn reset(&mut self) {
        self.crossover.state = 0.0;
    }
}
