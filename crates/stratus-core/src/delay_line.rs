//! Modulated feedback delay line, one strand of a late reverberation
//! network.
//!
//! Signal path per sample:
//!
//! ```text
//! input ─→ (+) ─→ [modulated delay] ─→ [diffuser]* ─→ [shelves/cutoff]* ─→ tap
//!            ↑                                                    │
//!            └──────────────── feedback ×g ←─────────────────────┘
//! ```
//!
//! Stages marked `*` are individually switchable. The output tap is taken
//! either straight off the delay (`late_stage_tap = false`) or after the
//! diffuser and tone filters (`late_stage_tap = true`). Two lo-fi controls
//! (sample-resolution quantization and zero-order-hold undersampling)
//! shape the tapped signal only, keeping the feedback path clean.

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std as alloc;

use alloc::vec;
use alloc::vec::Vec;

use libm::{floorf, powf, sinf};

use crate::{AllpassDiffuser, HighShelf, LowShelf, OnePoleLowpass, flush_denormal, lerp};

/// Bit depths at or above this leave the signal untouched.
const TRANSPARENT_BITS: f32 = 32.0;

/// One modulated, filtered feedback delay line.
///
/// All buffers are allocated at construction; `process` never allocates.
/// Delay lengths, modulation and filter coefficients are driven externally
/// (the reverb channel derives them from its parameter set), so
/// `set_sample_rate` here only re-derives what the line owns: filter
/// coefficients and the modulation phase increment.
#[derive(Debug, Clone)]
pub struct FeedbackDelayLine {
    ring: Vec<f32>,
    write_pos: usize,
    output: Vec<f32>,
    sample_rate: f32,

    delay_samples: f32,
    feedback: f32,
    interpolation: bool,

    mod_amount: f32,
    mod_rate_hz: f32,
    mod_phase: f32,
    mod_phase_inc: f32,

    diffuser: AllpassDiffuser,
    diffuser_enabled: bool,

    low_shelf: LowShelf,
    low_shelf_enabled: bool,
    high_shelf: HighShelf,
    high_shelf_enabled: bool,
    cutoff: OnePoleLowpass,
    cutoff_enabled: bool,

    late_stage_tap: bool,

    sample_resolution: f32,
    undersampling: f32,
    held: f32,
    hold_counter: f32,
}

impl FeedbackDelayLine {
    /// Create a line for blocks up to `max_block` samples and delays up to
    /// `max_delay_samples`. The internal diffuser accepts stage delays up
    /// to a quarter of the line's delay capacity.
    pub fn new(max_block: usize, max_delay_samples: usize, sample_rate: f32) -> Self {
        assert!(max_delay_samples >= 8, "delay capacity too small");

        Self {
            ring: vec![0.0; max_delay_samples + 2],
            write_pos: 0,
            output: vec![0.0; max_block],
            sample_rate,

            delay_samples: 1.0,
            feedback: 0.0,
            interpolation: true,

            mod_amount: 0.0,
            mod_rate_hz: 0.0,
            mod_phase: 0.0,
            mod_phase_inc: 0.0,

            diffuser: AllpassDiffuser::new(max_block, (max_delay_samples / 4).max(8), sample_rate),
            diffuser_enabled: false,

            low_shelf: LowShelf::new(sample_rate, 200.0),
            low_shelf_enabled: false,
            high_shelf: HighShelf::new(sample_rate, 4000.0),
            high_shelf_enabled: false,
            cutoff: OnePoleLowpass::new(sample_rate, 20000.0),
            cutoff_enabled: false,

            late_stage_tap: true,

            sample_resolution: TRANSPARENT_BITS,
            undersampling: 1.0,
            held: 0.0,
            hold_counter: 0.0,
        }
    }

    // --- line ---------------------------------------------------------

    /// Set the delay length in samples (clamped to `[1, capacity]`).
    pub fn set_delay_samples(&mut self, samples: f32) {
        self.delay_samples = samples.clamp(1.0, (self.ring.len() - 2) as f32);
    }

    /// Current delay length in samples.
    pub fn delay_samples(&self) -> f32 {
        self.delay_samples
    }

    /// Set the feedback gain (clamped to `[0, 0.999]` for stability).
    pub fn set_feedback(&mut self, feedback: f32) {
        self.feedback = feedback.clamp(0.0, 0.999);
    }

    /// Set the delay modulation excursion in samples.
    pub fn set_line_mod_amount(&mut self, samples: f32) {
        self.mod_amount = samples.max(0.0);
    }

    /// Set the delay modulation rate in Hz.
    pub fn set_line_mod_rate(&mut self, rate_hz: f32) {
        self.mod_rate_hz = rate_hz.max(0.0);
        self.mod_phase_inc = core::f32::consts::TAU * self.mod_rate_hz / self.sample_rate;
    }

    /// Toggle interpolated delay reads (line and diffuser).
    pub fn set_interpolation_enabled(&mut self, enabled: bool) {
        self.interpolation = enabled;
        self.diffuser.set_interpolation_enabled(enabled);
    }

    // --- internal diffuser --------------------------------------------

    /// Enable/disable the in-line diffuser. Does not clear its buffers;
    /// callers that care about stale tails call
    /// [`clear_diffuser_buffers`](Self::clear_diffuser_buffers) at the flip.
    pub fn set_diffuser_enabled(&mut self, enabled: bool) {
        self.diffuser_enabled = enabled;
    }

    /// Whether the in-line diffuser is currently enabled.
    pub fn diffuser_enabled(&self) -> bool {
        self.diffuser_enabled
    }

    /// Set the diffuser stage count (clamped by the diffuser).
    pub fn set_diffuser_stages(&mut self, stages: usize) {
        self.diffuser.set_stages(stages);
    }

    /// Set the diffuser base stage delay in samples.
    pub fn set_diffuser_delay(&mut self, samples: f32) {
        self.diffuser.set_delay_samples(samples);
    }

    /// Set the diffuser stage feedback.
    pub fn set_diffuser_feedback(&mut self, feedback: f32) {
        self.diffuser.set_feedback(feedback);
    }

    /// Replace the diffuser seed sequence.
    pub fn set_diffuser_seeds(&mut self, seeds: Vec<f32>) {
        self.diffuser.set_seeds(seeds);
    }

    /// Set the diffuser modulation excursion in samples.
    pub fn set_diffuser_mod_amount(&mut self, samples: f32) {
        self.diffuser.set_modulation_enabled(samples > 0.0);
        self.diffuser.set_mod_amount(samples);
    }

    /// Set the diffuser modulation rate in Hz.
    pub fn set_diffuser_mod_rate(&mut self, rate_hz: f32) {
        self.diffuser.set_mod_rate(rate_hz);
    }

    /// Zero only the diffuser's internal state.
    pub fn clear_diffuser_buffers(&mut self) {
        self.diffuser.clear_buffers();
    }

    // --- tone filters -------------------------------------------------

    /// Enable/disable the low shelf in the feedback path.
    pub fn set_low_shelf_enabled(&mut self, enabled: bool) {
        self.low_shelf_enabled = enabled;
    }

    /// Set the low shelf linear gain.
    pub fn set_low_shelf_gain(&mut self, gain: f32) {
        self.low_shelf.set_gain(gain);
    }

    /// Set the low shelf corner frequency in Hz.
    pub fn set_low_shelf_frequency(&mut self, frequency_hz: f32) {
        self.low_shelf.set_frequency_hz(frequency_hz);
    }

    /// Enable/disable the high shelf in the feedback path.
    pub fn set_high_shelf_enabled(&mut self, enabled: bool) {
        self.high_shelf_enabled = enabled;
    }

    /// Set the high shelf linear gain.
    pub fn set_high_shelf_gain(&mut self, gain: f32) {
        self.high_shelf.set_gain(gain);
    }

    /// Set the high shelf corner frequency in Hz.
    pub fn set_high_shelf_frequency(&mut self, frequency_hz: f32) {
        self.high_shelf.set_frequency_hz(frequency_hz);
    }

    /// Enable/disable the cutoff lowpass in the feedback path.
    pub fn set_cutoff_enabled(&mut self, enabled: bool) {
        self.cutoff_enabled = enabled;
    }

    /// Set the cutoff lowpass frequency in Hz.
    pub fn set_cutoff_frequency(&mut self, frequency_hz: f32) {
        self.cutoff.set_cutoff_hz(frequency_hz);
    }

    // --- output shaping -----------------------------------------------

    /// Tap the output after the diffuser and filters (`true`) or straight
    /// off the delay (`false`).
    pub fn set_late_stage_tap(&mut self, late: bool) {
        self.late_stage_tap = late;
    }

    /// Set the output quantization depth in bits; 32 is transparent.
    pub fn set_sample_resolution(&mut self, bits: f32) {
        self.sample_resolution = bits.clamp(1.0, TRANSPARENT_BITS);
    }

    /// Set the zero-order-hold undersampling factor; 1 is transparent.
    pub fn set_undersampling(&mut self, factor: f32) {
        self.undersampling = factor.max(1.0);
    }

    // --- processing ---------------------------------------------------

    /// Update the sample rate: filter coefficients and modulation phase
    /// increments are re-derived; delay lengths are left to the caller.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.mod_phase_inc = core::f32::consts::TAU * self.mod_rate_hz / sample_rate;
        self.low_shelf.set_sample_rate(sample_rate);
        self.high_shelf.set_sample_rate(sample_rate);
        self.cutoff.set_sample_rate(sample_rate);
        self.diffuser.set_sample_rate(sample_rate);
    }

    /// Process one sample through the line.
    #[inline]
    pub fn tick(&mut self, input: f32) -> f32 {
        let delay = if self.mod_amount > 0.0 {
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

        let diffused = if self.diffuser_enabled {
            self.diffuser.tick(delayed)
        } else {
            delayed
        };

        let mut shaped = diffused;
        if self.low_shelf_enabled {
            shaped = self.low_shelf.tick(shaped);
        }
        if self.high_shelf_enabled {
            shaped = self.high_shelf.tick(shaped);
        }
        if self.cutoff_enabled {
            shaped = self.cutoff.tick(shaped);
        }

        // Feed back the shaped signal within the same tick so the loop
        // period equals the delay length exactly.
        let len = self.ring.len();
        self.ring[self.write_pos] = flush_denormal(input + self.feedback * shaped);
        self.write_pos = (self.write_pos + 1) % len;

        let tap = if self.late_stage_tap { shaped } else { delayed };
        self.shape_output(tap)
    }

    /// Process a block into the internal output buffer.
    pub fn process(&mut self, input: &[f32]) {
        debug_assert!(input.len() <= self.output.len());
        for (i, &sample) in input.iter().enumerate() {
            self.output[i] = self.tick(sample);
        }
    }

    /// The most recently produced block.
    pub fn output(&self) -> &[f32] {
        &self.output
    }

    /// Zero every internal buffer and state variable; configuration stays.
    pub fn clear_buffers(&mut self) {
        self.ring.fill(0.0);
        self.output.fill(0.0);
        self.write_pos = 0;
        self.mod_phase = 0.0;
        self.held = 0.0;
        self.hold_counter = 0.0;
        self.diffuser.clear_buffers();
        self.low_shelf.reset();
        self.high_shelf.reset();
        self.cutoff.reset();
    }

    #[inline]
    fn read(&self, delay: f32) -> f32 {
        let len = self.ring.len();
        let clamped = delay.clamp(1.0, (len - 2) as f32);
        let whole = clamped as usize;
        let frac = clamped - whole as f32;

        let newer = (self.write_pos + len - whole) % len;
        if self.interpolation {
            let older = (newer + len - 1) % len;
            lerp(self.ring[newer], self.ring[older], frac)
        } else {
            self.ring[newer]
        }
    }

    /// Apply undersampling (zero-order hold) and bit quantization to the
    /// output tap.
    #[inline]
    fn shape_output(&mut self, sample: f32) -> f32 {
        let mut v = sample;
        if self.undersampling > 1.0 {
            self.hold_counter += 1.0;
            if self.hold_counter >= self.undersampling {
                self.held = v;
                self.hold_counter -= self.undersampling;
            }
            v = self.held;
        }
        if self.sample_resolution < TRANSPARENT_BITS {
            let levels = powf(2.0, self.sample_resolution);
            v = floorf(v * levels + 0.5) / levels;
        }
        v
    }
}
