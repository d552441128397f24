//! Allpass filter with an LFO-modulated delay tap.
//!
//! The canonical direct-form allpass:
//!
//! ```text
//! v[n]   = x[n] + g · buf[n - d]
//! y[n]   = buf[n - d] - g · v[n]
//! buf[n] = v[n]
//! ```
//!
//! passes all frequencies at equal magnitude while smearing phase, which is
//! what makes cascades of these the workhorse of reverb diffusion. Slowly
//! modulating the read position `d` with a sine LFO breaks up the static
//! comb-like ringing a fixed cascade would develop.

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std as alloc;

use alloc::vec;
use alloc::vec::Vec;

use crate::{flush_denormal, lerp};
use libm::sinf;

/// Single allpass stage with optional sine modulation of its delay tap.
///
/// Delay is expressed in samples; "a delay of `n`" reads the sample written
/// `n` ticks ago (minimum 1). With interpolation enabled, fractional delays
/// are read with linear interpolation; otherwise they truncate.
#[derive(Debug, Clone)]
pub struct ModulatedAllpass {
    buffer: Vec<f32>,
    write_pos: usize,
    delay_samples: f32,
    feedback: f32,
    mod_enabled: bool,
    mod_amount: f32,
    mod_phase: f32,
    mod_phase_inc: f32,
    interpolation: bool,
}

impl ModulatedAllpass {
    /// Create a stage able to hold delays up to `capacity` samples.
    ///
    /// # Panics
    ///
    /// Panics if `capacity < 4` (too small to interpolate against).
    pub fn new(capacity: usize) -> Self {
        assert!(capacity >= 4, "allpass capacity must be >= 4");
        Self {
            buffer: vec![0.0; capacity],
            write_pos: 0,
            delay_samples: 1.0,
            feedback: 0.5,
            mod_enabled: false,
            mod_amount: 0.0,
            mod_phase: 0.0,
            mod_phase_inc: 0.0,
            interpolation: true,
        }
    }

    /// Set the base delay in samples (clamped to `[1, capacity - 2]`).
    pub fn set_delay_samples(&mut self, samples: f32) {
        self.delay_samples = samples.clamp(1.0, (self.buffer.len() - 2) as f32);
    }

    /// Current base delay in samples.
    pub fn delay_samples(&self) -> f32 {
        self.delay_samples
    }

    /// Set the feedback coefficient. Stable for |g| < 1; clamped to ±0.99.
    pub fn set_feedback(&mut self, feedback: f32) {
        self.feedback = feedback.clamp(-0.99, 0.99);
    }

    /// Current feedback coefficient.
    pub fn feedback(&self) -> f32 {
        self.feedback
    }

    /// Enable or disable delay-tap modulation.
    pub fn set_mod_enabled(&mut self, enabled: bool) {
        self.mod_enabled = enabled;
    }

    /// Set the modulation excursion in samples.
    pub fn set_mod_amount(&mut self, samples: f32) {
        self.mod_amount = samples.max(0.0);
    }

    /// Set the modulation rate in cycles per sample.
    pub fn set_mod_rate(&mut self, cycles_per_sample: f32) {
        self.mod_phase_inc = core::f32::consts::TAU * cycles_per_sample.max(0.0);
    }

    /// Set the LFO phase in turns (`[0, 1)` = one full cycle).
    ///
    /// Giving each stage of a cascade a different starting phase is what
    /// decorrelates their modulation.
    pub fn set_mod_phase(&mut self, turns: f32) {
        self.mod_phase = core::f32::consts::TAU * turns.rem_euclid(1.0);
    }

    /// Toggle linear interpolation of fractional delay reads.
    pub fn set_interpolation_enabled(&mut self, enabled: bool) {
        self.interpolation = enabled;
    }

    /// Process one sample.
    #[inline]
    pub fn tick(&mut self, input: f32) -> f32 {
        let delay = if self.mod_enabled {
            let excursion = self.mod_amount * sinf(self.mod_phase);
            self.mod_phase += self.mod_phase_inc;
            if self.mod_phase >= core::f32::consts::TAU {
                self.mod_phase -= core::f32::consts::TAU;
            }
            self.delay_samples + excursion
        } else {
            self.delay_samples
        };

        let delayed = self.read(delay);
        let v = input + delayed * self.feedback;
        self.buffer[self.write_pos] = flush_denormal(v);
        self.write_pos = (self.write_pos + 1) % self.buffer.len();

        delayed - v * self.feedback
    }

    /// Zero the delay buffer and LFO phase; configuration is untouched.
    pub fn clear(&mut self) {
        self.buffer.fill(0.0);
        self.write_pos = 0;
        self.mod_phase = 0.0;
    }

    /// Maximum usable delay in samples.
    pub fn capacity(&self) -> usize {
        self.buffer.len() - 2
    }

    #[inline]
    fn read(&self, delay: f32) -> f32 {
        let len = self.buffer.len();
        let clamped = delay.clamp(1.0, (len - 2) as f32);
        let whole = clamped as usize;
        let frac = clamped - whole as f32;

        let newer = (self.write_pos + len - whole) % len;
        if self.interpolation {
            let older = (newer + len - 1) % len;
            lerp(self.buffer[newer], self.buffer[older], frac)
        } else {
            self.buffer[newer]
        }
    }
}
