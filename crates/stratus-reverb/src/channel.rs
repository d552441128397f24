//! Single-channel reverb orchestrator.
//!
//! [`ReverbChannel`] wires the whole signal path together: input tone
//! filters, a near-silence guard, pre-delay, the multitap early-reflection
//! diffuser, an optional early allpass diffusion cascade, and a bank of
//! modulated feedback delay lines whose normalized sum forms the late tail.
//! Every control goes through [`set_parameter`](ReverbChannel::set_parameter);
//! raw values are retained so the full state can be re-derived after a
//! sample-rate change.
//!
//! The channel is block-synchronous and single-threaded: parameter changes
//! and [`process`](ReverbChannel::process) must be serialized by the caller.

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std as alloc;

use alloc::vec;
use alloc::vec::Vec;

use libm::{powf, sqrtf};
use stratus_core::{
    flush_denormal, ms_to_samples, rand, AllpassDiffuser, BlockDelay, FeedbackDelayLine,
    OnePoleHighpass, OnePoleLowpass, SEEDS_PER_DIFFUSER,
};

use crate::multitap::MultitapDiffuser;
use crate::params::Parameter;

/// Number of delay lines constructed per channel. The active subset is
/// selected with [`Parameter::LineCount`].
pub const TOTAL_LINE_COUNT: usize = 12;

/// Pre-delay capacity in samples.
const MAX_PRE_DELAY_SAMPLES: usize = 10_000;

/// Shortest usable base line delay, samples.
const MIN_LINE_DELAY_SAMPLES: f32 = 50.0;

/// Inputs quieter than this (squared) are treated as digital silence before
/// they reach the feedback network, so the tail decays to true zero instead
/// of circulating denormal-range noise.
const SILENCE_THRESHOLD_SQUARED: f32 = 1e-9;

/// One reverb channel: pre-filters, early network and late delay-line bank.
///
/// All buffers are allocated in [`new`](ReverbChannel::new); the audio path
/// never allocates.
///
/// # Example
///
/// ```rust
/// use stratus_reverb::{Parameter, ReverbChannel};
///
/// let mut channel = ReverbChannel::new(128, 44100.0);
/// channel.set_parameter(Parameter::LineCount, 4.0);
/// channel.set_parameter(Parameter::LineDelay, 60.0);
/// channel.set_parameter(Parameter::LineFeedback, 0.7);
/// channel.set_parameter(Parameter::MainOut, 1.0);
///
/// let input = [0.5f32; 128];
/// channel.process(&input);
/// let _wet = channel.output();
/// ```
pub struct ReverbChannel {
    sample_rate: f32,
    buffer_size: usize,

    parameters: [f32; Parameter::COUNT],

    pre_delay: BlockDelay,
    multitap: MultitapDiffuser,
    high_pass: OnePoleHighpass,
    low_pass: OnePoleLowpass,
    diffuser: AllpassDiffuser,
    lines: Vec<FeedbackDelayLine>,

    delay_line_seeds: Vec<f32>,

    high_pass_enabled: bool,
    low_pass_enabled: bool,
    diffuser_enabled: bool,
    line_count: usize,
    per_line_gain: f32,

    dry_out: f32,
    predelay_out: f32,
    early_out: f32,
    line_out: f32,

    temp_buffer: Vec<f32>,
    line_out_buffer: Vec<f32>,
    out_buffer: Vec<f32>,
}

impl ReverbChannel {
    /// Create a channel for blocks up to `buffer_size` samples.
    ///
    /// The multitap window is sized for one second of signal and each delay
    /// line for two, both at the construction-time `sample_rate`; later
    /// [`set_sample_rate`](ReverbChannel::set_sample_rate) calls re-derive
    /// timings within those capacities.
    #[must_use]
    pub fn new(buffer_size: usize, sample_rate: f32) -> Self {
        assert!(buffer_size > 0, "block size must be > 0");
        assert!(sample_rate > 0.0, "sample rate must be > 0");

        let line_capacity = (sample_rate * 2.0) as usize;
        let diffuser_capacity = (sample_rate * 0.05) as usize;

        let lines = (0..TOTAL_LINE_COUNT)
            .map(|_| FeedbackDelayLine::new(buffer_size, line_capacity, sample_rate))
            .collect();

        let mut channel = Self {
            sample_rate,
            buffer_size,
            parameters: [0.0; Parameter::COUNT],
            pre_delay: BlockDelay::new(buffer_size, MAX_PRE_DELAY_SAMPLES),
            multitap: MultitapDiffuser::new(buffer_size, sample_rate as usize),
            high_pass: OnePoleHighpass::new(sample_rate, 20.0),
            low_pass: OnePoleLowpass::new(sample_rate, 20_000.0),
            diffuser: AllpassDiffuser::new(buffer_size, diffuser_capacity, sample_rate),
            lines,
            delay_line_seeds: rand::generate(12345, TOTAL_LINE_COUNT * 3),
            high_pass_enabled: false,
            low_pass_enabled: false,
            diffuser_enabled: false,
            line_count: 8,
            per_line_gain: 0.0,
            dry_out: 0.0,
            predelay_out: 0.0,
            early_out: 0.0,
            line_out: 0.0,
            temp_buffer: vec![0.0; buffer_size],
            line_out_buffer: vec![0.0; buffer_size],
            out_buffer: vec![0.0; buffer_size],
        };
        channel.per_line_gain = channel.compute_per_line_gain();
        channel
    }

    /// Current sample rate.
    #[must_use]
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Largest block `process` accepts.
    #[must_use]
    pub fn buffer_size(&self) -> usize {
        self.buffer_size
    }

    /// Last raw value written for `parameter`.
    #[must_use]
    pub fn parameter(&self, parameter: Parameter) -> f32 {
        self.parameters[parameter.index()]
    }

    /// The mixed channel output for the last processed block.
    #[must_use]
    pub fn output(&self) -> &[f32] {
        &self.out_buffer
    }

    /// The normalized delay-line sum for the last processed block, before
    /// the output mix is applied.
    #[must_use]
    pub fn line_output(&self) -> &[f32] {
        &self.line_out_buffer
    }

    /// Move to a new sample rate, re-deriving every time-based quantity from
    /// the retained parameter values.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        assert!(sample_rate > 0.0, "sample rate must be > 0");
        self.sample_rate = sample_rate;

        self.high_pass.set_sample_rate(sample_rate);
        self.low_pass.set_sample_rate(sample_rate);
        self.diffuser.set_sample_rate(sample_rate);
        for line in &mut self.lines {
            line.set_sample_rate(sample_rate);
        }

        self.reapply(Parameter::PreDelay);
        self.reapply(Parameter::TapLength);
        self.reapply(Parameter::DiffusionDelay);
        self.reapply(Parameter::LineDelay);
        self.reapply(Parameter::LateDiffusionDelay);
        self.reapply(Parameter::EarlyDiffusionModAmount);
        self.reapply(Parameter::EarlyDiffusionModRate);
        self.reapply(Parameter::LineModRate);
        self.reapply(Parameter::LateDiffusionModRate);
        self.reapply(Parameter::LineModAmount);
        self.update_lines();
    }

    /// Apply one control change.
    ///
    /// The raw `value` is stored before dispatch; booleans are encoded as
    /// `value >= 0.5`, counts and seeds round toward zero. Changes take
    /// effect at the next [`process`](ReverbChannel::process) call.
    pub fn set_parameter(&mut self, parameter: Parameter, value: f32) {
        self.parameters[parameter.index()] = value;

        match parameter {
            Parameter::PreDelay => {
                let samples = ms_to_samples(value, self.sample_rate) as usize;
                self.pre_delay.set_delay_samples(samples);
            }
            Parameter::HighPass => self.high_pass.set_cutoff_hz(value),
            Parameter::LowPass => self.low_pass.set_cutoff_hz(value),

            Parameter::TapCount => {
                self.multitap.set_tap_count(value as usize);
                self.multitap.update();
            }
            Parameter::TapLength => {
                let samples = ms_to_samples(value, self.sample_rate) as usize;
                self.multitap.set_tap_length_samples(samples);
                self.multitap.update();
            }
            Parameter::TapGain => {
                self.multitap.set_tap_gain(value);
                self.multitap.update();
            }
            Parameter::TapDecay => {
                self.multitap.set_tap_decay(value);
                self.multitap.update();
            }

            Parameter::DiffusionEnabled => {
                let enabled = value >= 0.5;
                if enabled != self.diffuser_enabled {
                    self.diffuser.clear_buffers();
                }
                self.diffuser_enabled = enabled;
            }
            Parameter::DiffusionStages => self.diffuser.set_stages(value as usize),
            Parameter::DiffusionDelay => {
                let samples = ms_to_samples(value, self.sample_rate);
                self.diffuser.set_delay_samples(samples);
            }
            Parameter::DiffusionFeedback => self.diffuser.set_feedback(value),

            Parameter::LineCount => {
                self.line_count = (value as usize).min(TOTAL_LINE_COUNT);
                self.per_line_gain = self.compute_per_line_gain();
            }
            Parameter::LineDelay | Parameter::LineFeedback => self.update_lines(),

            Parameter::LateDiffusionEnabled => {
                let enabled = value >= 0.5;
                for line in &mut self.lines {
                    if enabled != line.diffuser_enabled() {
                        line.clear_diffuser_buffers();
                    }
                    line.set_diffuser_enabled(enabled);
                }
            }
            Parameter::LateDiffusionStages => {
                for line in &mut self.lines {
                    line.set_diffuser_stages(value as usize);
                }
            }
            Parameter::LateDiffusionDelay => {
                let samples = ms_to_samples(value, self.sample_rate);
                for line in &mut self.lines {
                    line.set_diffuser_delay(samples);
                }
            }
            Parameter::LateDiffusionFeedback => {
                for line in &mut self.lines {
                    line.set_diffuser_feedback(value);
                }
            }

            Parameter::PostLowShelfGain => {
                for line in &mut self.lines {
                    line.set_low_shelf_gain(value);
                }
            }
            Parameter::PostLowShelfFrequency => {
                for line in &mut self.lines {
                    line.set_low_shelf_frequency(value);
                }
            }
            Parameter::PostHighShelfGain => {
                for line in &mut self.lines {
                    line.set_high_shelf_gain(value);
                }
            }
            Parameter::PostHighShelfFrequency => {
                for line in &mut self.lines {
                    line.set_high_shelf_frequency(value);
                }
            }
            Parameter::PostCutoffFrequency => {
                for line in &mut self.lines {
                    line.set_cutoff_frequency(value);
                }
            }

            Parameter::EarlyDiffusionModAmount => {
                self.diffuser.set_modulation_enabled(value > 0.0);
                self.diffuser
                    .set_mod_amount(ms_to_samples(value, self.sample_rate));
            }
            Parameter::EarlyDiffusionModRate => self.diffuser.set_mod_rate(value),
            Parameter::LineModAmount
            | Parameter::LineModRate
            | Parameter::LateDiffusionModAmount
            | Parameter::LateDiffusionModRate => self.update_lines(),

            Parameter::TapSeed => {
                self.multitap
                    .set_seeds(rand::generate(seed_of(value), MultitapDiffuser::SEED_COUNT));
                self.multitap.update();
            }
            Parameter::DiffusionSeed => {
                self.diffuser
                    .set_seeds(rand::generate(seed_of(value), SEEDS_PER_DIFFUSER));
            }
            Parameter::CombSeed => {
                self.delay_line_seeds = rand::generate(seed_of(value), TOTAL_LINE_COUNT * 3);
                self.update_lines();
            }
            Parameter::PostDiffusionSeed => {
                let seed = seed_of(value);
                for (i, line) in self.lines.iter_mut().enumerate() {
                    let line_seed = seed.wrapping_mul(i as u64 + 1);
                    line.set_diffuser_seeds(rand::generate(line_seed, SEEDS_PER_DIFFUSER));
                }
            }

            Parameter::DryOut => self.dry_out = value,
            Parameter::PredelayOut => self.predelay_out = value,
            Parameter::EarlyOut => self.early_out = value,
            Parameter::MainOut => self.line_out = value,

            Parameter::HiPassEnabled => self.high_pass_enabled = value >= 0.5,
            Parameter::LowPassEnabled => self.low_pass_enabled = value >= 0.5,
            Parameter::LowShelfEnabled => {
                for line in &mut self.lines {
                    line.set_low_shelf_enabled(value >= 0.5);
                }
            }
            Parameter::HighShelfEnabled => {
                for line in &mut self.lines {
                    line.set_high_shelf_enabled(value >= 0.5);
                }
            }
            Parameter::CutoffEnabled => {
                for line in &mut self.lines {
                    line.set_cutoff_enabled(value >= 0.5);
                }
            }
            Parameter::LateStageTap => {
                for line in &mut self.lines {
                    line.set_late_stage_tap(value >= 0.5);
                }
            }

            Parameter::SampleResolution => {
                for line in &mut self.lines {
                    line.set_sample_resolution(value);
                }
            }
            Parameter::Undersampling => {
                for line in &mut self.lines {
                    line.set_undersampling(value);
                }
            }
            Parameter::Interpolation => {
                let enabled = value >= 0.5;
                self.diffuser.set_interpolation_enabled(enabled);
                for line in &mut self.lines {
                    line.set_interpolation_enabled(enabled);
                }
            }
        }
    }

    /// Run one block through the channel.
    ///
    /// Stage order is fixed: highpass, lowpass (each per its enable flag,
    /// plain copy when both are off), near-silence guard, pre-delay,
    /// multitap diffuser, optional early diffusion, fan-out into the active
    /// delay lines, normalized sum, output mix. `input.len()` must not
    /// exceed the channel's block capacity.
    pub fn process(&mut self, input: &[f32]) {
        assert!(input.len() <= self.buffer_size, "block exceeds capacity");
        let len = input.len();

        if self.high_pass_enabled || self.low_pass_enabled {
            for (dst, &x) in self.temp_buffer[..len].iter_mut().zip(input) {
                let mut sample = x;
                if self.high_pass_enabled {
                    sample = self.high_pass.tick(sample);
                }
                if self.low_pass_enabled {
                    sample = self.low_pass.tick(sample);
                }
                *dst = sample;
            }
        } else {
            self.temp_buffer[..len].copy_from_slice(input);
        }

        // Near-silent input would otherwise keep the feedback network busy
        // with vanishingly small values.
        for sample in &mut self.temp_buffer[..len] {
            if *sample * *sample < SILENCE_THRESHOLD_SQUARED {
                *sample = 0.0;
            }
        }

        self.pre_delay.process(&self.temp_buffer[..len]);
        self.multitap.process(&self.pre_delay.output()[..len]);

        if self.diffuser_enabled {
            self.diffuser.process(&self.multitap.output()[..len]);
            self.temp_buffer[..len].copy_from_slice(&self.diffuser.output()[..len]);
        } else {
            self.temp_buffer[..len].copy_from_slice(&self.multitap.output()[..len]);
        }

        for line in &mut self.lines[..self.line_count] {
            line.process(&self.temp_buffer[..len]);
        }

        self.temp_buffer[..len].fill(0.0);
        for line in &self.lines[..self.line_count] {
            for (acc, &sample) in self.temp_buffer[..len].iter_mut().zip(line.output()) {
                *acc += sample;
            }
        }
        for sample in &mut self.temp_buffer[..len] {
            *sample = flush_denormal(*sample * self.per_line_gain);
        }
        self.line_out_buffer[..len].copy_from_slice(&self.temp_buffer[..len]);

        let early = if self.diffuser_enabled {
            self.diffuser.output()
        } else {
            self.multitap.output()
        };
        let predelayed = self.pre_delay.output();
        for i in 0..len {
            self.out_buffer[i] = self.dry_out * input[i]
                + self.predelay_out * predelayed[i]
                + self.early_out * early[i]
                + self.line_out * self.temp_buffer[i];
        }
    }

    /// Zero every internal buffer and filter state. Configuration, seeds
    /// and the active tap layout are preserved.
    pub fn clear_buffers(&mut self) {
        self.temp_buffer.fill(0.0);
        self.line_out_buffer.fill(0.0);
        self.out_buffer.fill(0.0);

        self.high_pass.reset();
        self.low_pass.reset();
        self.pre_delay.clear();
        self.multitap.clear_buffers();
        self.diffuser.clear_buffers();
        for line in &mut self.lines {
            line.clear_buffers();
        }
    }

    fn compute_per_line_gain(&self) -> f32 {
        if self.line_count == 0 {
            0.0
        } else {
            1.0 / sqrtf(self.line_count as f32)
        }
    }

    fn reapply(&mut self, parameter: Parameter) {
        self.set_parameter(parameter, self.parameters[parameter.index()]);
    }

    /// Re-derive the per-line delay, feedback and modulation settings from
    /// the retained base parameters and the comb seed sequence.
    ///
    /// Each line gets a delay of `(0.1 + 0.9 * seed) * base`, a feedback
    /// scaled so every line decays at the same rate per unit time
    /// (`feedback ^ (delay / base)`), and mildly decorrelated modulation
    /// depth and rate.
    fn update_lines(&mut self) {
        let base_delay = ms_to_samples(
            self.parameters[Parameter::LineDelay.index()],
            self.sample_rate,
        )
        .max(MIN_LINE_DELAY_SAMPLES);
        let base_feedback = self.parameters[Parameter::LineFeedback.index()];

        let mod_amount = ms_to_samples(
            self.parameters[Parameter::LineModAmount.index()],
            self.sample_rate,
        );
        let mod_rate = self.parameters[Parameter::LineModRate.index()];

        let late_mod_amount = ms_to_samples(
            self.parameters[Parameter::LateDiffusionModAmount.index()],
            self.sample_rate,
        );
        let late_mod_rate = self.parameters[Parameter::LateDiffusionModRate.index()];

        let count = self.lines.len();
        for (i, line) in self.lines.iter_mut().enumerate() {
            let delay = (0.1 + 0.9 * self.delay_line_seeds[i]) * base_delay;
            let feedback = powf(base_feedback, delay / base_delay);

            line.set_delay_samples(delay);
            line.set_feedback(feedback);
            line.set_line_mod_amount(
                mod_amount * (0.8 + 0.2 * self.delay_line_seeds[i + count]),
            );
            line.set_line_mod_rate(
                mod_rate * (0.8 + 0.2 * self.delay_line_seeds[i + 2 * count]),
            );
            line.set_diffuser_mod_amount(late_mod_amount);
            line.set_diffuser_mod_rate(late_mod_rate);
        }
    }
}

/// Interpret a parameter value as a generator seed.
fn seed_of(value: f32) -> u64 {
    value.max(0.0) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLOCK: usize = 128;
    const RATE: f32 = 44100.0;

    fn noise(len: usize) -> Vec<f32> {
        // Deterministic pseudo-noise in [-0.5, 0.5).
        rand::generate(77, len).iter().map(|s| s - 0.5).collect()
    }

    fn basic_channel() -> ReverbChannel {
        let mut channel = ReverbChannel::new(BLOCK, RATE);
        channel.set_parameter(Parameter::TapCount, 8.0);
        channel.set_parameter(Parameter::TapLength, 50.0);
        channel.set_parameter(Parameter::TapGain, 1.0);
        channel.set_parameter(Parameter::TapDecay, 0.8);
        channel.set_parameter(Parameter::LineCount, 4.0);
        channel.set_parameter(Parameter::LineDelay, 60.0);
        channel.set_parameter(Parameter::LineFeedback, 0.6);
        channel.set_parameter(Parameter::MainOut, 1.0);
        channel
    }

    #[test]
    fn dry_only_mix_passes_input_through() {
        let mut channel = ReverbChannel::new(BLOCK, RATE);
        channel.set_parameter(Parameter::DryOut, 1.0);
        channel.set_parameter(Parameter::LineCount, 0.0);

        let input = noise(BLOCK);
        channel.process(&input);

        for (out, inp) in channel.output().iter().zip(&input) {
            assert!((out - inp).abs() < 1e-6);
        }
    }

    #[test]
    fn zero_mix_is_silent() {
        let mut channel = basic_channel();
        channel.set_parameter(Parameter::MainOut, 0.0);

        let input = noise(BLOCK);
        channel.process(&input);

        assert!(channel.output().iter().all(|&s| s == 0.0));
    }

    #[test]
    fn near_silent_input_is_zeroed_before_the_network() {
        let mut channel = basic_channel();
        channel.set_parameter(Parameter::EarlyOut, 1.0);
        channel.set_parameter(Parameter::PredelayOut, 1.0);

        // Every sample is below the guard threshold.
        let input = vec![1e-6f32; BLOCK];
        for _ in 0..8 {
            channel.process(&input);
        }

        assert!(channel.output().iter().all(|&s| s == 0.0));
        assert!(channel.line_output().iter().all(|&s| s == 0.0));
    }

    #[test]
    fn line_sum_is_normalized_by_sqrt_of_line_count() {
        // With feedback off each line passes its delayed input at unit
        // gain, so a constant input settles to sum(n) / sqrt(n) = sqrt(n).
        let constant = vec![0.25f32; BLOCK];

        for count in [1usize, 4, 9] {
            let mut channel = ReverbChannel::new(BLOCK, RATE);
            channel.set_parameter(Parameter::TapCount, 1.0);
            channel.set_parameter(Parameter::TapGain, 1.0);
            channel.set_parameter(Parameter::LineCount, count as f32);
            channel.set_parameter(Parameter::LineDelay, 10.0);
            channel.set_parameter(Parameter::LineFeedback, 0.0);
            channel.set_parameter(Parameter::MainOut, 1.0);

            // Run long enough for every line delay to fill.
            for _ in 0..60 {
                channel.process(&constant);
            }

            let expected = 0.25 * sqrtf(count as f32);
            let last = channel.line_output()[BLOCK - 1];
            assert!(
                (last - expected).abs() < 1e-3,
                "count {count}: got {last}, expected {expected}"
            );
        }
    }

    #[test]
    fn zero_lines_produce_no_late_output() {
        let mut channel = basic_channel();
        channel.set_parameter(Parameter::LineCount, 0.0);

        let input = noise(BLOCK);
        channel.process(&input);

        assert!(channel.line_output().iter().all(|&s| s == 0.0));
    }

    #[test]
    fn clear_buffers_silences_the_tail() {
        let mut channel = basic_channel();
        let input = noise(BLOCK);
        for _ in 0..4 {
            channel.process(&input);
        }

        channel.clear_buffers();
        channel.process(&vec![0.0f32; BLOCK]);

        assert!(channel.output().iter().all(|&s| s == 0.0));
    }

    #[test]
    fn diffusion_toggle_clears_stage_state() {
        // Early-diffusion-only path: a single tap at offset zero makes the
        // multitap stage a pass-through, so after one noise block the only
        // remaining state is inside the allpass cascade.
        let configure = |channel: &mut ReverbChannel| {
            channel.set_parameter(Parameter::TapCount, 1.0);
            channel.set_parameter(Parameter::TapGain, 1.0);
            channel.set_parameter(Parameter::DiffusionEnabled, 1.0);
            channel.set_parameter(Parameter::DiffusionStages, 4.0);
            channel.set_parameter(Parameter::DiffusionDelay, 1.0);
            channel.set_parameter(Parameter::DiffusionFeedback, 0.7);
            channel.set_parameter(Parameter::EarlyOut, 1.0);
            channel.set_parameter(Parameter::LineCount, 0.0);
        };

        let input = noise(BLOCK);
        let silence = vec![0.0f32; BLOCK];

        let mut control = ReverbChannel::new(BLOCK, RATE);
        configure(&mut control);
        control.process(&input);
        control.process(&silence);
        assert!(
            control.output().iter().any(|&s| s != 0.0),
            "cascade should ring into the next block"
        );

        let mut toggled = ReverbChannel::new(BLOCK, RATE);
        configure(&mut toggled);
        toggled.process(&input);
        toggled.set_parameter(Parameter::DiffusionEnabled, 0.0);
        toggled.set_parameter(Parameter::DiffusionEnabled, 1.0);
        toggled.process(&silence);
        assert!(toggled.output().iter().all(|&s| s == 0.0));
    }

    #[test]
    fn sample_rate_change_matches_fresh_construction() {
        let configure = |channel: &mut ReverbChannel| {
            channel.set_parameter(Parameter::TapCount, 12.0);
            channel.set_parameter(Parameter::TapLength, 80.0);
            channel.set_parameter(Parameter::TapGain, 1.0);
            channel.set_parameter(Parameter::TapDecay, 0.7);
            channel.set_parameter(Parameter::PreDelay, 5.0);
            channel.set_parameter(Parameter::LineCount, 6.0);
            channel.set_parameter(Parameter::LineDelay, 45.0);
            channel.set_parameter(Parameter::LineFeedback, 0.5);
            channel.set_parameter(Parameter::EarlyOut, 0.8);
            channel.set_parameter(Parameter::PredelayOut, 0.3);
            channel.set_parameter(Parameter::MainOut, 1.0);
        };

        let mut moved = ReverbChannel::new(BLOCK, 22050.0);
        configure(&mut moved);
        moved.set_sample_rate(RATE);

        let mut fresh = ReverbChannel::new(BLOCK, RATE);
        configure(&mut fresh);

        let input = noise(BLOCK);
        for _ in 0..20 {
            moved.process(&input);
            fresh.process(&input);
        }

        for (a, b) in moved.output().iter().zip(fresh.output()) {
            assert!((a - b).abs() < 1e-5, "{a} vs {b}");
        }
    }

    #[test]
    fn comb_seed_changes_the_tail() {
        let run = |seed: f32| {
            let mut channel = basic_channel();
            channel.set_parameter(Parameter::CombSeed, seed);
            let input = noise(BLOCK);
            for _ in 0..30 {
                channel.process(&input);
            }
            channel.output().to_vec()
        };

        let a = run(1.0);
        let b = run(2.0);
        assert!(a.iter().zip(&b).any(|(x, y)| (x - y).abs() > 1e-6));
    }

    #[test]
    fn retained_parameters_are_readable() {
        let mut channel = ReverbChannel::new(BLOCK, RATE);
        channel.set_parameter(Parameter::LineDelay, 42.0);
        assert!((channel.parameter(Parameter::LineDelay) - 42.0).abs() < f32::EPSILON);
        assert_eq!(channel.parameter(Parameter::TapCount), 0.0);
    }

    #[test]
    fn short_blocks_are_accepted() {
        let mut channel = basic_channel();
        channel.set_parameter(Parameter::DryOut, 1.0);

        let input = [0.1f32; 16];
        channel.process(&input);
        assert!((channel.output()[0] - 0.1).abs() < 1e-6);
    }
}
