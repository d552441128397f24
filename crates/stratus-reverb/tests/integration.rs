//! End-to-end tests for the full channel signal path.
//!
//! Each test drives a [`ReverbChannel`] the way a host would: configure
//! through parameters, feed blocks, inspect the owned output buffers.

use stratus_core::{ms_to_samples, rand};
use stratus_reverb::{MultitapDiffuser, Parameter, ReverbChannel};

const BLOCK: usize = 512;
const RATE: f32 = 44100.0;

/// Feed `blocks` blocks, the first carrying a unit impulse, and return the
/// concatenated channel output.
fn impulse_response(channel: &mut ReverbChannel, blocks: usize) -> Vec<f32> {
    let mut response = Vec::with_capacity(blocks * BLOCK);
    let mut input = vec![0.0f32; BLOCK];
    input[0] = 1.0;

    for i in 0..blocks {
        channel.process(&input);
        response.extend_from_slice(channel.output());
        if i == 0 {
            input[0] = 0.0;
        }
    }
    response
}

#[test]
fn predelay_shifts_the_onset() {
    let mut channel = ReverbChannel::new(BLOCK, RATE);
    channel.set_parameter(Parameter::PreDelay, 10.0);
    channel.set_parameter(Parameter::PredelayOut, 1.0);
    channel.set_parameter(Parameter::LineCount, 0.0);

    let response = impulse_response(&mut channel, 2);
    let delay = ms_to_samples(10.0, RATE) as usize;

    for (i, &sample) in response.iter().enumerate() {
        if i == delay {
            assert!((sample - 1.0).abs() < 1e-6);
        } else {
            assert_eq!(sample, 0.0, "unexpected signal at sample {i}");
        }
    }
}

#[test]
fn early_reflections_follow_the_tap_layout() {
    // With only the early mix active the channel output must match a
    // standalone multitap diffuser under the same configuration.
    let mut channel = ReverbChannel::new(BLOCK, RATE);
    channel.set_parameter(Parameter::TapCount, 10.0);
    channel.set_parameter(Parameter::TapLength, 10.0);
    channel.set_parameter(Parameter::TapGain, 1.0);
    channel.set_parameter(Parameter::TapDecay, 0.6);
    channel.set_parameter(Parameter::EarlyOut, 1.0);
    channel.set_parameter(Parameter::LineCount, 0.0);

    let mut reference = MultitapDiffuser::new(BLOCK, RATE as usize);
    reference.set_tap_count(10);
    reference.set_tap_length_samples(ms_to_samples(10.0, RATE) as usize);
    reference.set_tap_gain(1.0);
    reference.set_tap_decay(0.6);
    reference.update();

    let mut input = vec![0.0f32; BLOCK];
    input[0] = 1.0;

    channel.process(&input);
    reference.process(&input);

    for (got, want) in channel.output().iter().zip(reference.output()) {
        assert!((got - want).abs() < 1e-6);
    }
}

#[test]
fn impulse_response_decays() {
    let mut channel = ReverbChannel::new(BLOCK, RATE);
    channel.set_parameter(Parameter::TapCount, 20.0);
    channel.set_parameter(Parameter::TapLength, 60.0);
    channel.set_parameter(Parameter::TapGain, 1.0);
    channel.set_parameter(Parameter::TapDecay, 0.8);
    channel.set_parameter(Parameter::DiffusionEnabled, 1.0);
    channel.set_parameter(Parameter::DiffusionStages, 4.0);
    channel.set_parameter(Parameter::DiffusionDelay, 20.0);
    channel.set_parameter(Parameter::DiffusionFeedback, 0.6);
    channel.set_parameter(Parameter::LineCount, 8.0);
    channel.set_parameter(Parameter::LineDelay, 50.0);
    channel.set_parameter(Parameter::LineFeedback, 0.5);
    channel.set_parameter(Parameter::MainOut, 1.0);
    channel.set_parameter(Parameter::EarlyOut, 0.5);

    let response = impulse_response(&mut channel, 100);

    assert!(response.iter().all(|s| s.is_finite()));
    assert!(response.iter().any(|&s| s != 0.0));

    let energy = |window: &[f32]| window.iter().map(|s| s * s).sum::<f32>();
    let early = energy(&response[..response.len() / 2]);
    let late = energy(&response[response.len() * 3 / 4..]);
    assert!(
        late < early * 0.1,
        "tail failed to decay: early {early}, late {late}"
    );
}

#[test]
fn line_output_feeds_the_main_mix() {
    let mut channel = ReverbChannel::new(BLOCK, RATE);
    channel.set_parameter(Parameter::TapCount, 4.0);
    channel.set_parameter(Parameter::TapLength, 20.0);
    channel.set_parameter(Parameter::TapGain, 1.0);
    channel.set_parameter(Parameter::LineCount, 3.0);
    channel.set_parameter(Parameter::LineDelay, 30.0);
    channel.set_parameter(Parameter::LineFeedback, 0.4);
    channel.set_parameter(Parameter::MainOut, 0.25);

    let input: Vec<f32> = rand::generate(5, BLOCK).iter().map(|s| s - 0.5).collect();
    for _ in 0..10 {
        channel.process(&input);
    }

    for (out, line) in channel.output().iter().zip(channel.line_output()) {
        assert!((out - 0.25 * line).abs() < 1e-6);
    }
}

#[test]
fn late_stage_tap_changes_the_response() {
    let run = |late_tap: f32| {
        let mut channel = ReverbChannel::new(BLOCK, RATE);
        channel.set_parameter(Parameter::TapCount, 1.0);
        channel.set_parameter(Parameter::TapGain, 1.0);
        channel.set_parameter(Parameter::LineCount, 2.0);
        channel.set_parameter(Parameter::LineDelay, 60.0);
        channel.set_parameter(Parameter::LineFeedback, 0.6);
        channel.set_parameter(Parameter::LateDiffusionEnabled, 1.0);
        channel.set_parameter(Parameter::LateDiffusionStages, 3.0);
        channel.set_parameter(Parameter::LateDiffusionDelay, 5.0);
        channel.set_parameter(Parameter::LateDiffusionFeedback, 0.6);
        channel.set_parameter(Parameter::LateStageTap, late_tap);
        channel.set_parameter(Parameter::MainOut, 1.0);
        impulse_response(&mut channel, 12)
    };

    let before = run(0.0);
    let after = run(1.0);
    assert!(before.iter().zip(&after).any(|(a, b)| (a - b).abs() > 1e-6));
}

#[test]
fn sample_resolution_quantizes_the_line_output() {
    let mut channel = ReverbChannel::new(BLOCK, RATE);
    channel.set_parameter(Parameter::TapCount, 6.0);
    channel.set_parameter(Parameter::TapLength, 20.0);
    channel.set_parameter(Parameter::TapGain, 1.0);
    channel.set_parameter(Parameter::LineCount, 1.0);
    channel.set_parameter(Parameter::LineDelay, 20.0);
    channel.set_parameter(Parameter::LineFeedback, 0.5);
    channel.set_parameter(Parameter::MainOut, 1.0);
    channel.set_parameter(Parameter::SampleResolution, 4.0);

    let input: Vec<f32> = rand::generate(9, BLOCK).iter().map(|s| s - 0.5).collect();
    for _ in 0..8 {
        channel.process(&input);
    }

    // One active line, so the line output is the quantized tap itself;
    // 4 bits means every value sits on a 1/16 grid.
    let mut nonzero = 0usize;
    for &sample in channel.line_output() {
        let steps = sample * 16.0;
        assert!(
            (steps - steps.round()).abs() < 1e-3,
            "sample {sample} is off the 4-bit grid"
        );
        if sample != 0.0 {
            nonzero += 1;
        }
    }
    assert!(nonzero > 0, "quantized line output should carry signal");
}
