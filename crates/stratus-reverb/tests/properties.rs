//! Property-based tests for the tap layout and the full channel.
//!
//! Uses proptest to verify structural invariants of the multitap layout
//! across the whole configuration space, and that the channel stays finite
//! for arbitrary (in-range) parameter settings.

use proptest::prelude::*;
use stratus_core::rand;
use stratus_reverb::{MultitapDiffuser, Parameter, ReverbChannel, MAX_TAPS};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Tap positions are strictly increasing and stay inside the window
    /// for every count, window and seed combination.
    #[test]
    fn tap_positions_strictly_increase(
        count in 1usize..=MAX_TAPS,
        window in 100usize..=20_000,
        seed in 0u64..1_000,
    ) {
        let mut taps = MultitapDiffuser::new(64, 48_000);
        taps.set_tap_count(count);
        taps.set_tap_length_samples(window);
        taps.set_tap_gain(1.0);
        taps.set_seeds(rand::generate(seed, MultitapDiffuser::SEED_COUNT));
        taps.update();

        let positions = taps.tap_positions();
        prop_assert!(!positions.is_empty());
        prop_assert_eq!(positions[0], 0);
        for pair in positions.windows(2) {
            prop_assert!(pair[0] < pair[1]);
        }
        prop_assert!(*positions.last().unwrap() <= window);
    }

    /// Tap gains never increase along the layout.
    #[test]
    fn tap_gains_never_increase(
        count in 1usize..=MAX_TAPS,
        decay in 0.0f32..1.0,
        gain in 0.01f32..2.0,
        seed in 0u64..1_000,
    ) {
        let mut taps = MultitapDiffuser::new(64, 48_000);
        taps.set_tap_count(count);
        taps.set_tap_length_samples(10_000);
        taps.set_tap_gain(gain);
        taps.set_tap_decay(decay);
        taps.set_seeds(rand::generate(seed, MultitapDiffuser::SEED_COUNT));
        taps.update();

        for pair in taps.tap_gains().windows(2) {
            prop_assert!(pair[1] <= pair[0] + 1e-6);
        }
    }

    /// The same configuration always commits the same layout.
    #[test]
    fn tap_layout_is_deterministic(
        count in 1usize..=MAX_TAPS,
        window in 100usize..=20_000,
        seed in 0u64..1_000,
    ) {
        let build = || {
            let mut taps = MultitapDiffuser::new(64, 48_000);
            taps.set_tap_count(count);
            taps.set_tap_length_samples(window);
            taps.set_tap_gain(1.0);
            taps.set_seeds(rand::generate(seed, MultitapDiffuser::SEED_COUNT));
            taps.update();
            taps
        };

        let a = build();
        let b = build();
        prop_assert_eq!(a.tap_positions(), b.tap_positions());
        prop_assert_eq!(a.tap_gains(), b.tap_gains());
    }

    /// Arbitrary in-range parameter settings never drive the channel to
    /// NaN or infinity.
    #[test]
    fn channel_output_stays_finite(
        tap_count in 0.0f32..60.0,
        tap_length in 1.0f32..200.0,
        tap_decay in 0.0f32..1.0,
        pre_delay in 0.0f32..100.0,
        line_count in 0.0f32..14.0,
        line_delay in 1.0f32..150.0,
        line_feedback in 0.0f32..1.0,
        diffusion in any::<bool>(),
        late_diffusion in any::<bool>(),
        seed in 0u64..100,
    ) {
        let mut channel = ReverbChannel::new(64, 8_000.0);
        channel.set_parameter(Parameter::TapCount, tap_count);
        channel.set_parameter(Parameter::TapLength, tap_length);
        channel.set_parameter(Parameter::TapGain, 1.0);
        channel.set_parameter(Parameter::TapDecay, tap_decay);
        channel.set_parameter(Parameter::PreDelay, pre_delay);
        channel.set_parameter(Parameter::LineCount, line_count);
        channel.set_parameter(Parameter::LineDelay, line_delay);
        channel.set_parameter(Parameter::LineFeedback, line_feedback);
        channel.set_parameter(Parameter::DiffusionEnabled, if diffusion { 1.0 } else { 0.0 });
        channel.set_parameter(Parameter::DiffusionStages, 3.0);
        channel.set_parameter(Parameter::DiffusionDelay, 10.0);
        channel.set_parameter(Parameter::DiffusionFeedback, 0.7);
        channel.set_parameter(
            Parameter::LateDiffusionEnabled,
            if late_diffusion { 1.0 } else { 0.0 },
        );
        channel.set_parameter(Parameter::LateDiffusionStages, 2.0);
        channel.set_parameter(Parameter::LateDiffusionDelay, 5.0);
        channel.set_parameter(Parameter::LateDiffusionFeedback, 0.6);
        channel.set_parameter(Parameter::CombSeed, seed as f32);
        channel.set_parameter(Parameter::DryOut, 0.5);
        channel.set_parameter(Parameter::PredelayOut, 0.5);
        channel.set_parameter(Parameter::EarlyOut, 0.5);
        channel.set_parameter(Parameter::MainOut, 0.5);

        let input: Vec<f32> =
            rand::generate(seed.wrapping_add(1), 64).iter().map(|s| s - 0.5).collect();
        for _ in 0..6 {
            channel.process(&input);
            prop_assert!(channel.output().iter().all(|s| s.is_finite()));
        }
    }
}
