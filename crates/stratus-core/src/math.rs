//! Numeric helpers shared by the reverb processors.
//!
//! Everything here is allocation-free and `no_std`-safe; transcendental
//! functions come from `libm`.

use libm::{expf, logf};

/// Flush subnormal (denormalized) floats to zero.
///
/// Subnormal floats cause severe CPU performance degradation on most
/// architectures, and feedback structures (delay lines, allpass chains)
/// decay toward them indefinitely. Values below 1e-20 are replaced with
/// zero, leaving ample margin above the IEEE 754 subnormal range.
#[allow(clippy::inline_always)]
#[inline(always)]
pub fn flush_denormal(x: f32) -> f32 {
    if x.abs() < 1e-20 { 0.0 } else { x }
}

/// Convert decibels to linear gain (0 dB → 1.0, -6 dB → ~0.5).
#[inline]
pub fn db_to_linear(db: f32) -> f32 {
    // 10^(dB/20) = e^(dB * ln(10)/20)
    const FACTOR: f32 = core::f32::consts::LN_10 / 20.0;
    expf(db * FACTOR)
}

/// Convert linear gain to decibels.
///
/// Gains at or below zero are floored to avoid `-inf`.
#[inline]
pub fn linear_to_db(linear: f32) -> f32 {
    const FACTOR: f32 = 20.0 / core::f32::consts::LN_10;
    logf(linear.max(1e-10)) * FACTOR
}

/// Convert milliseconds to (fractional) samples at the given rate.
#[inline]
pub fn ms_to_samples(ms: f32, sample_rate: f32) -> f32 {
    ms * sample_rate / 1000.0
}

/// Convert samples to milliseconds at the given rate.
#[inline]
pub fn samples_to_ms(samples: f32, sample_rate: f32) -> f32 {
    samples * 1000.0 / sample_rate
}

/// Linear interpolation between `a` (t=0) and `b` (t=1).
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
