//! Serial allpass diffusion network.
//!
//! A cascade of up to [`MAX_STAGES`] [`ModulatedAllpass`] stages. Each stage
//! gets its own delay, modulation depth and LFO phase, derived from a seeded
//! random sequence, so the cascade smears transients without the periodic
//! "flutter" identical stages would produce. Used both as the early
//! diffusion network of a reverb channel and as the in-line diffuser of each
//! feedback delay line.

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std as alloc;

use alloc::vec;
use alloc::vec::Vec;

use crate::ModulatedAllpass;
use crate::rand;

/// Maximum number of allpass stages in one diffuser.
pub const MAX_STAGES: usize = 8;

/// Seed values one diffuser consumes: per-stage delay jitter, modulation
/// depth jitter and LFO phase offset.
pub const SEEDS_PER_DIFFUSER: usize = MAX_STAGES * 3;

/// Cascade of seed-decorrelated modulated allpass stages.
///
/// All stages are constructed up front; `set_stages` only moves the active
/// cursor, so changing the stage count never allocates. Stage layout
/// (delays, modulation offsets) is re-derived eagerly by each setter, all
/// of which run off the audio path; [`process`](Self::process) and
/// [`tick`](Self::tick) only read it.
///
/// Per-stage derivation from the seed triple `(s_d, s_m, s_p)`:
///
/// ```text
/// delay_i = max(1, base_delay · (0.5 + s_d))
/// depth_i = mod_amount · (0.7 + 0.3 · s_m)
/// phase_i = s_p turns
/// ```
#[derive(Debug, Clone)]
pub struct AllpassDiffuser {
    stages: Vec<ModulatedAllpass>,
    active_stages: usize,
    delay_samples: f32,
    max_delay_samples: f32,
    feedback: f32,
    seeds: Vec<f32>,
    modulation_enabled: bool,
    mod_amount: f32,
    mod_rate_hz: f32,
    sample_rate: f32,
    output: Vec<f32>,
}

impl AllpassDiffuser {
    /// Create a diffuser for blocks up to `max_block` samples and per-stage
    /// base delays up to `max_delay_samples`.
    pub fn new(max_block: usize, max_delay_samples: usize, sample_rate: f32) -> Self {
        // Seed jitter scales a stage up to 1.5x the base delay; +4 gives the
        // interpolator and modulation excursion room at the edge.
        let stage_capacity = max_delay_samples + max_delay_samples / 2 + 4;
        let stages = (0..MAX_STAGES)
            .map(|_| ModulatedAllpass::new(stage_capacity))
            .collect();

        let mut diffuser = Self {
            stages,
            active_stages: MAX_STAGES,
            delay_samples: 1.0,
            max_delay_samples: max_delay_samples as f32,
            feedback: 0.5,
            seeds: rand::generate(1, SEEDS_PER_DIFFUSER),
            modulation_enabled: false,
            mod_amount: 0.0,
            mod_rate_hz: 0.0,
            sample_rate,
            output: vec![0.0; max_block],
        };
        diffuser.update_stages();
        diffuser
    }

    /// Set the number of active stages, clamped to `1..=MAX_STAGES`.
    pub fn set_stages(&mut self, stages: usize) {
        self.active_stages = stages.clamp(1, MAX_STAGES);
    }

    /// Number of active stages.
    pub fn stages(&self) -> usize {
        self.active_stages
    }

    /// Set the base stage delay in samples (clamped to the capacity).
    pub fn set_delay_samples(&mut self, samples: f32) {
        self.delay_samples = samples.clamp(1.0, self.max_delay_samples);
        self.update_stages();
    }

    /// Set the feedback coefficient applied by every stage.
    pub fn set_feedback(&mut self, feedback: f32) {
        self.feedback = feedback.clamp(-0.99, 0.99);
        self.update_stages();
    }

    /// Replace the seed sequence ([`SEEDS_PER_DIFFUSER`] values expected;
    /// shorter sequences repeat cyclically).
    pub fn set_seeds(&mut self, seeds: Vec<f32>) {
        if !seeds.is_empty() {
            self.seeds = seeds;
            self.update_stages();
        }
    }

    /// Enable or disable delay-tap modulation on all stages.
    pub fn set_modulation_enabled(&mut self, enabled: bool) {
        self.modulation_enabled = enabled;
        self.update_stages();
    }

    /// Set the modulation excursion in samples (before per-stage jitter).
    pub fn set_mod_amount(&mut self, samples: f32) {
        self.mod_amount = samples.max(0.0);
        self.update_stages();
    }

    /// Set the modulation rate in Hz.
    pub fn set_mod_rate(&mut self, rate_hz: f32) {
        self.mod_rate_hz = rate_hz.max(0.0);
        self.update_stages();
    }

    /// Toggle interpolated delay reads on all stages.
    pub fn set_interpolation_enabled(&mut self, enabled: bool) {
        for stage in &mut self.stages {
            stage.set_interpolation_enabled(enabled);
        }
    }

    /// Update the sample rate; modulation rates are re-derived from Hz.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.update_stages();
    }

    /// Diffuse one sample through the active stages.
    #[inline]
    pub fn tick(&mut self, input: f32) -> f32 {
        let mut signal = input;
        for stage in &mut self.stages[..self.active_stages] {
            signal = stage.tick(signal);
        }
        signal
    }

    /// Diffuse a block into the internal output buffer.
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

    /// Zero all stage buffers and the output block; configuration stays.
    pub fn clear_buffers(&mut self) {
        for stage in &mut self.stages {
            stage.clear();
        }
        self.output.fill(0.0);
        // Stage LFO phases were reset along with the buffers.
        self.update_stages();
    }

    fn update_stages(&mut self) {
        let seed_count = self.seeds.len();
        for (i, stage) in self.stages.iter_mut().enumerate() {
            let delay_jitter = self.seeds[i % seed_count];
            let depth_jitter = self.seeds[(MAX_STAGES + i) % seed_count];
            let phase_offset = self.seeds[(2 * MAX_STAGES + i) % seed_count];

            stage.set_delay_samples((self.delay_samples * (0.5 + delay_jitter)).max(1.0));
            stage.set_feedback(self.feedback);
            stage.set_mod_enabled(self.modulation_enabled);
            stage.set_mod_amount(self.mod_amount * (0.7 + 0.3 * depth_jitter));
            stage.set_mod_rate(self.mod_rate_hz / self.sample_rate);
            stage.set_mod_phase(phase_offset);
        }
    }
}
