//! One-pole lowpass and highpass filters used ahead of the reverb network.
//!
//! Both are 6 dB/octave, one multiply per sample. The coefficient follows
//! `coeff = exp(-2π f / fs)`; the highpass is the lowpass subtracted from
//! the input, which keeps the two exactly complementary.

use crate::flush_denormal;
use libm::expf;

/// One-pole (6 dB/oct) lowpass filter.
///
/// # Invariants
///
/// - `coeff` stays in `[0, 1)` for any cutoff above 0 Hz
/// - internal state is flushed to zero below 1e-20 (denormal guard)
#[derive(Debug, Clone)]
pub struct OnePoleLowpass {
    state: f32,
    coeff: f32,
    sample_rate: f32,
    cutoff_hz: f32,
}

impl OnePoleLowpass {
    /// Create a lowpass at the given sample rate and cutoff frequency.
    pub fn new(sample_rate: f32, cutoff_hz: f32) -> Self {
        let mut filter = Self {
            state: 0.0,
            coeff: 0.0,
            sample_rate,
            cutoff_hz,
        };
        filter.recalculate();
        filter
    }

    /// Set the cutoff (−3 dB) frequency in Hz.
    pub fn set_cutoff_hz(&mut self, cutoff_hz: f32) {
        self.cutoff_hz = cutoff_hz.max(1.0);
        self.recalculate();
    }

    /// Current cutoff frequency in Hz.
    pub fn cutoff_hz(&self) -> f32 {
        self.cutoff_hz
    }

    /// Update the sample rate, keeping the configured cutoff.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.recalculate();
    }

    /// Filter one sample.
    #[inline]
    pub fn tick(&mut self, input: f32) -> f32 {
        // y[n] = x[n] + coeff * (y[n-1] - x[n])
        self.state = flush_denormal(input + self.coeff * (self.state - input));
        self.state
    }

    /// Filter a whole block into `output`.
    pub fn process(&mut self, input: &[f32], output: &mut [f32]) {
        debug_assert_eq!(input.len(), output.len());
        for (inp, out) in input.iter().zip(output.iter_mut()) {
            *out = self.tick(*inp);
        }
    }

    /// Zero the filter state.
    pub fn reset(&mut self) {
        self.state = 0.0;
    }

    fn recalculate(&mut self) {
        self.coeff = expf(-core::f32::consts::TAU * self.cutoff_hz / self.sample_rate);
    }
}

/// One-pole (6 dB/oct) highpass filter.
///
/// Implemented as `input - lowpass(input)`, so its corner tracks
/// [`OnePoleLowpass`] exactly.
#[derive(Debug, Clone)]
pub struct OnePoleHighpass {
    lowpass: OnePoleLowpass,
}

impl OnePoleHighpass {
    /// Create a highpass at the given sample rate and cutoff frequency.
    pub fn new(sample_rate: f32, cutoff_hz: f32) -> Self {
        Self {
            lowpass: OnePoleLowpass::new(sample_rate, cutoff_hz),
        }
    }

    /// Set the cutoff (−3 dB) frequency in Hz.
    pub fn set_cutoff_hz(&mut self, cutoff_hz: f32) {
        self.lowpass.set_cutoff_hz(cutoff_hz);
    }

    /// Current cutoff frequency in Hz.
    pub fn cutoff_hz(&self) -> f32 {
        self.lowpass.cutoff_hz()
    }

    /// Update the sample rate, keeping the configured cutoff.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.lowpass.set_sample_rate(sample_rate);
    }

    /// Filter one sample.
    #[inline]
    pub fn tick(&mut self, input: f32) -> f32 {
        input - self.lowpass.tick(input)
    }

    /// Filter a whole block into `output`.
    pub fn process(&mut self, input: &[f32], output: &mut [f32]) {
        debug_assert_eq!(input.len(), output.len());
        for (inp, out) in input.iter().zip(output.iter_mut()) {
            *out = self.tick(*inp);
        }
    }

    /// Zero the filter state.
    pub fn reset(&mut self) {
        self.lowpass.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowpass_passes_dc() {
        let mut lp = OnePoleLowpass::new(48000.0, 1000.0);
        let mut out = 0.0;
        for _ in 0..48000 {
            out = lp.tick(1.0);
        }
        assert!((out - 1.0).abs() < 1e-4, "DC should pass, got {out}");
    }

    #[test]
    fn lowpass_attenuates_nyquist() {
        let mut lp = OnePoleLowpass::new(48000.0, 100.0);
        let mut sum = 0.0f32;
        for i in 0..4800 {
            let input = if i % 2 == 0 { 1.0 } else { -1.0 };
            sum += lp.tick(input).abs();
        }
        assert!(sum / 4800.0 < 0.05);
    }

    #[test]
    fn highpass_blocks_dc() {
        let mut hp = OnePoleHighpass::new(48000.0, 100.0);
        let mut out = 1.0;
        for _ in 0..48000 {
            out = hp.tick(1.0);
        }
        assert!(out.abs() < 1e-3, "DC should be rejected, got {out}");
    }

    #[test]
    fn highpass_complements_lowpass() {
        let mut lp = OnePoleLowpass::new(48000.0, 500.0);
        let mut hp = OnePoleHighpass::new(48000.0, 500.0);
        for i in 0..512 {
            let x = libm::sinf(i as f32 * 0.37);
            let sum = lp.tick(x) + hp.tick(x);
            assert!((sum - x).abs() < 1e-5, "lp + hp should reconstruct input");
        }
    }

    #[test]
    fn reset_clears_state() {
        let mut lp = OnePoleLowpass::new(48000.0, 1000.0);
        lp.tick(1.0);
        lp.reset();
        assert_eq!(lp.tick(0.0), 0.0);
    }
}
