//! Render a four-second impulse response to `impulse_response.wav`.
//!
//! Run with: cargo run --release --example impulse_response

use stratus_reverb::{Parameter, ReverbChannel};

const SAMPLE_RATE: f32 = 48000.0;
const BLOCK: usize = 512;
const SECONDS: f32 = 4.0;

fn main() -> Result<(), hound::Error> {
    let mut channel = ReverbChannel::new(BLOCK, SAMPLE_RATE);

    // A medium hall: dense early reflections, eight modulated lines.
    channel.set_parameter(Parameter::PreDelay, 20.0);
    channel.set_parameter(Parameter::TapCount, 30.0);
    channel.set_parameter(Parameter::TapLength, 130.0);
    channel.set_parameter(Parameter::TapGain, 1.0);
    channel.set_parameter(Parameter::TapDecay, 0.85);
    channel.set_parameter(Parameter::DiffusionEnabled, 1.0);
    channel.set_parameter(Parameter::DiffusionStages, 5.0);
    channel.set_parameter(Parameter::DiffusionDelay, 40.0);
    channel.set_parameter(Parameter::DiffusionFeedback, 0.7);
    channel.set_parameter(Parameter::LineCount, 8.0);
    channel.set_parameter(Parameter::LineDelay, 90.0);
    channel.set_parameter(Parameter::LineFeedback, 0.85);
    channel.set_parameter(Parameter::LateDiffusionEnabled, 1.0);
    channel.set_parameter(Parameter::LateDiffusionStages, 3.0);
    channel.set_parameter(Parameter::LateDiffusionDelay, 25.0);
    channel.set_parameter(Parameter::LateDiffusionFeedback, 0.6);
    channel.set_parameter(Parameter::LineModAmount, 0.6);
    channel.set_parameter(Parameter::LineModRate, 0.25);
    channel.set_parameter(Parameter::CutoffEnabled, 1.0);
    channel.set_parameter(Parameter::PostCutoffFrequency, 9000.0);
    channel.set_parameter(Parameter::EarlyOut, 0.6);
    channel.set_parameter(Parameter::MainOut, 0.5);

    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: SAMPLE_RATE as u32,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };
    let mut writer = hound::WavWriter::create("impulse_response.wav", spec)?;

    let blocks = (SECONDS * SAMPLE_RATE) as usize / BLOCK;
    let mut input = vec![0.0f32; BLOCK];
    input[0] = 1.0;

    for i in 0..blocks {
        channel.process(&input);
        for &sample in channel.output() {
            writer.write_sample(sample)?;
        }
        if i == 0 {
            input[0] = 0.0;
        }
    }

    writer.finalize()?;
    println!(
        "wrote {} samples to impulse_response.wav",
        blocks * BLOCK
    );
    Ok(())
}
