//! Control parameters understood by a [`ReverbChannel`](crate::ReverbChannel).
//!
//! Every knob of the channel and its stages is addressed through this closed
//! enum; [`ReverbChannel::set_parameter`](crate::ReverbChannel::set_parameter)
//! dispatches on it and retains the raw value so the full state can be
//! re-derived after a sample-rate change. Boolean switches are carried as
//! `f32` (>= 0.5 means enabled), counts and seeds are rounded.

/// A single channel control. Values are plain `f32`; units are noted per
/// variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Parameter {
    /// Pre-delay before the early network, milliseconds.
    PreDelay,
    /// Input highpass cutoff, Hz.
    HighPass,
    /// Input lowpass cutoff, Hz.
    LowPass,

    /// Number of early-reflection taps, 1..=50.
    TapCount,
    /// Early-reflection window length, milliseconds.
    TapLength,
    /// Overall tap gain, linear.
    TapGain,
    /// Tap decay shape, 0..1.
    TapDecay,

    /// Early diffusion on/off.
    DiffusionEnabled,
    /// Early diffusion stage count, 1..=8.
    DiffusionStages,
    /// Early diffusion base delay, milliseconds.
    DiffusionDelay,
    /// Early diffusion allpass feedback, 0..1.
    DiffusionFeedback,

    /// Active delay-line count, 0..=12.
    LineCount,
    /// Base line delay, milliseconds.
    LineDelay,
    /// Per-round feedback at the base delay, 0..1.
    LineFeedback,

    /// Per-line late diffusion on/off.
    LateDiffusionEnabled,
    /// Late diffusion stage count, 1..=8.
    LateDiffusionStages,
    /// Late diffusion base delay, milliseconds.
    LateDiffusionDelay,
    /// Late diffusion allpass feedback, 0..1.
    LateDiffusionFeedback,

    /// Per-line low-shelf gain, linear.
    PostLowShelfGain,
    /// Per-line low-shelf corner, Hz.
    PostLowShelfFrequency,
    /// Per-line high-shelf gain, linear.
    PostHighShelfGain,
    /// Per-line high-shelf corner, Hz.
    PostHighShelfFrequency,
    /// Per-line lowpass cutoff, Hz.
    PostCutoffFrequency,

    /// Early diffusion LFO depth, samples.
    EarlyDiffusionModAmount,
    /// Early diffusion LFO rate, Hz.
    EarlyDiffusionModRate,
    /// Line-delay LFO depth, samples.
    LineModAmount,
    /// Line-delay LFO rate, Hz.
    LineModRate,
    /// Late diffusion LFO depth, samples.
    LateDiffusionModAmount,
    /// Late diffusion LFO rate, Hz.
    LateDiffusionModRate,

    /// Seed for the tap layout.
    TapSeed,
    /// Seed for the early diffusion stages.
    DiffusionSeed,
    /// Seed for line delays, feedbacks and modulation.
    CombSeed,
    /// Seed for the per-line late diffusion stages.
    PostDiffusionSeed,

    /// Dry signal level, linear.
    DryOut,
    /// Pre-delayed signal level, linear.
    PredelayOut,
    /// Early-reflection level, linear.
    EarlyOut,
    /// Late-reverb level, linear.
    MainOut,

    /// Input highpass on/off.
    HiPassEnabled,
    /// Input lowpass on/off.
    LowPassEnabled,
    /// Per-line low shelf on/off.
    LowShelfEnabled,
    /// Per-line high shelf on/off.
    HighShelfEnabled,
    /// Per-line cutoff lowpass on/off.
    CutoffEnabled,
    /// Tap the line after (on) or before (off) its diffusion stage.
    LateStageTap,

    /// Line output bit depth, 1..=32 (32 is transparent).
    SampleResolution,
    /// Zero-order-hold decimation factor inside the lines, >= 1.
    Undersampling,
    /// Fractional delay interpolation on/off.
    Interpolation,
}

impl Parameter {
    /// Every parameter, in declaration order.
    pub const ALL: [Parameter; Self::COUNT] = [
        Parameter::PreDelay,
        Parameter::HighPass,
        Parameter::LowPass,
        Parameter::TapCount,
        Parameter::TapLength,
        Parameter::TapGain,
        Parameter::TapDecay,
        Parameter::DiffusionEnabled,
        Parameter::DiffusionStages,
        Parameter::DiffusionDelay,
        Parameter::DiffusionFeedback,
        Parameter::LineCount,
        Parameter::LineDelay,
        Parameter::LineFeedback,
        Parameter::LateDiffusionEnabled,
        Parameter::LateDiffusionStages,
        Parameter::LateDiffusionDelay,
        Parameter::LateDiffusionFeedback,
        Parameter::PostLowShelfGain,
        Parameter::PostLowShelfFrequency,
        Parameter::PostHighShelfGain,
        Parameter::PostHighShelfFrequency,
        Parameter::PostCutoffFrequency,
        Parameter::EarlyDiffusionModAmount,
        Parameter::EarlyDiffusionModRate,
        Parameter::LineModAmount,
        Parameter::LineModRate,
        Parameter::LateDiffusionModAmount,
        Parameter::LateDiffusionModRate,
        Parameter::TapSeed,
        Parameter::DiffusionSeed,
        Parameter::CombSeed,
        Parameter::PostDiffusionSeed,
        Parameter::DryOut,
        Parameter::PredelayOut,
        Parameter::EarlyOut,
        Parameter::MainOut,
        Parameter::HiPassEnabled,
        Parameter::LowPassEnabled,
        Parameter::LowShelfEnabled,
        Parameter::HighShelfEnabled,
        Parameter::CutoffEnabled,
        Parameter::LateStageTap,
        Parameter::SampleResolution,
        Parameter::Undersampling,
        Parameter::Interpolation,
    ];

    /// Number of parameters.
    pub const COUNT: usize = 46;

    /// Position of this parameter in [`Parameter::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Display name.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Parameter::PreDelay => "Pre-Delay",
            Parameter::HighPass => "High Pass",
            Parameter::LowPass => "Low Pass",
            Parameter::TapCount => "Tap Count",
            Parameter::TapLength => "Tap Length",
            Parameter::TapGain => "Tap Gain",
            Parameter::TapDecay => "Tap Decay",
            Parameter::DiffusionEnabled => "Diffusion Enabled",
            Parameter::DiffusionStages => "Diffusion Stages",
            Parameter::DiffusionDelay => "Diffusion Delay",
            Parameter::DiffusionFeedback => "Diffusion Feedback",
            Parameter::LineCount => "Line Count",
            Parameter::LineDelay => "Line Delay",
            Parameter::LineFeedback => "Line Feedback",
            Parameter::LateDiffusionEnabled => "Late Diffusion Enabled",
            Parameter::LateDiffusionStages => "Late Diffusion Stages",
            Parameter::LateDiffusionDelay => "Late Diffusion Delay",
            Parameter::LateDiffusionFeedback => "Late Diffusion Feedback",
            Parameter::PostLowShelfGain => "Low Shelf Gain",
            Parameter::PostLowShelfFrequency => "Low Shelf Frequency",
            Parameter::PostHighShelfGain => "High Shelf Gain",
            Parameter::PostHighShelfFrequency => "High Shelf Frequency",
            Parameter::PostCutoffFrequency => "Cutoff Frequency",
            Parameter::EarlyDiffusionModAmount => "Early Diffusion Mod Amount",
            Parameter::EarlyDiffusionModRate => "Early Diffusion Mod Rate",
            Parameter::LineModAmount => "Line Mod Amount",
            Parameter::LineModRate => "Line Mod Rate",
            Parameter::LateDiffusionModAmount => "Late Diffusion Mod Amount",
            Parameter::LateDiffusionModRate => "Late Diffusion Mod Rate",
            Parameter::TapSeed => "Tap Seed",
            Parameter::DiffusionSeed => "Diffusion Seed",
            Parameter::CombSeed => "Comb Seed",
            Parameter::PostDiffusionSeed => "Post Diffusion Seed",
            Parameter::DryOut => "Dry Out",
            Parameter::PredelayOut => "Pre-Delay Out",
            Parameter::EarlyOut => "Early Out",
            Parameter::MainOut => "Main Out",
            Parameter::HiPassEnabled => "Hi-Pass Enabled",
            Parameter::LowPassEnabled => "Low-Pass Enabled",
            Parameter::LowShelfEnabled => "Low Shelf Enabled",
            Parameter::HighShelfEnabled => "High Shelf Enabled",
            Parameter::CutoffEnabled => "Cutoff Enabled",
            Parameter::LateStageTap => "Late Stage Tap",
            Parameter::SampleResolution => "Sample Resolution",
            Parameter::Undersampling => "Undersampling",
            Parameter::Interpolation => "Interpolation",
        }
    }
}
