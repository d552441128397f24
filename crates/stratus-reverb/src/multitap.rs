//! Multitap diffuser: the early-reflection cloud.
//!
//! Turns a single input stream into a sum of attenuated, delayed copies of
//! itself. Tap positions and gains are derived from a seeded sequence so a
//! given seed always produces the same reflection pattern.
//!
//! # Tap layout law
//!
//! For `count` taps over a window of `length` samples, with seed values
//! `s_0, s_1, ...` in `[0, 1)`:
//!
//! - tap 0 sits at position 0;
//! - the remaining positions are the cumulative sums of the jittered
//!   weights `w_k = 0.1 + s_k`, normalized so the last tap lands at
//!   `length`, rounded to integer samples;
//! - each position is then forced at least one sample past its
//!   predecessor; taps pushed beyond the window are dropped.
//!
//! The `0.1` floor keeps any weight from collapsing to zero, so positions
//! are strictly increasing for any seed when the window is large enough.
//! Gains follow the decay envelope `gain · decay^(k / count)`, which is
//! non-increasing in `k` for `0 ≤ decay < 1`.
//!
//! # Double buffering
//!
//! Configuration setters only mark the layout dirty. [`update`] rebuilds a
//! *pending* tap set completely off the audio path and then swaps it with
//! the active one, so [`process`] can never observe a half-written layout.
//!
//! [`update`]: MultitapDiffuser::update
//! [`process`]: MultitapDiffuser::process

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std as alloc;

use alloc::vec;
use alloc::vec::Vec;

use libm::powf;
use stratus_core::rand;

/// Maximum number of simultaneous taps.
pub const MAX_TAPS: usize = 50;

/// One fully-built tap layout. Both the active and the pending set are
/// preallocated to [`MAX_TAPS`], so rebuilding never allocates.
#[derive(Debug, Clone)]
struct TapSet {
    positions: Vec<usize>,
    gains: Vec<f32>,
}

impl TapSet {
    fn with_capacity() -> Self {
        Self {
            positions: Vec::with_capacity(MAX_TAPS),
            gains: Vec::with_capacity(MAX_TAPS),
        }
    }
}

/// Seed-deterministic multitap early-reflection generator.
///
/// # Example
///
/// ```rust
/// use stratus_reverb::MultitapDiffuser;
///
/// let mut taps = MultitapDiffuser::new(64, 4800);
/// taps.set_tap_count(10);
/// taps.set_tap_length_samples(1000);
/// taps.set_tap_decay(0.7);
/// taps.update();
///
/// let mut impulse = [0.0f32; 64];
/// impulse[0] = 1.0;
/// taps.process(&impulse);
/// assert!(taps.output()[0] != 0.0); // tap 0 sits at position 0
/// ```
#[derive(Debug, Clone)]
pub struct MultitapDiffuser {
    history: Vec<f32>,
    write_pos: usize,
    output: Vec<f32>,

    seeds: Vec<f32>,
    count: usize,
    length_samples: usize,
    gain: f32,
    decay: f32,

    active: TapSet,
    pending: TapSet,
    dirty: bool,
}

impl MultitapDiffuser {
    /// Length of the seed sequence a full layout consumes.
    pub const SEED_COUNT: usize = MAX_TAPS * 2;

    /// Create a diffuser for blocks up to `max_block` samples with a tap
    /// window of at most `max_length_samples`.
    pub fn new(max_block: usize, max_length_samples: usize) -> Self {
        assert!(max_block > 0, "block size must be > 0");
        assert!(max_length_samples > 0, "tap window must be > 0");

        let mut diffuser = Self {
            history: vec![0.0; max_length_samples + 1],
            write_pos: 0,
            output: vec![0.0; max_block],
            seeds: rand::generate(0, Self::SEED_COUNT),
            count: 1,
            length_samples: max_length_samples,
            gain: 1.0,
            decay: 0.0,
            active: TapSet::with_capacity(),
            pending: TapSet::with_capacity(),
            dirty: true,
        };
        diffuser.update();
        diffuser
    }

    /// Set the number of taps. Requests above [`MAX_TAPS`] are clamped to
    /// the maximum; zero taps produce silence (no pass-through).
    pub fn set_tap_count(&mut self, count: usize) {
        self.count = count.min(MAX_TAPS);
        self.dirty = true;
    }

    /// Set the window, in samples, the taps are spread across (clamped to
    /// the history capacity).
    pub fn set_tap_length_samples(&mut self, samples: usize) {
        self.length_samples = samples.min(self.history.len() - 1);
        self.dirty = true;
    }

    /// Set the decay factor of the gain envelope (clamped to `[0, 1)`).
    pub fn set_tap_decay(&mut self, decay: f32) {
        self.decay = decay.clamp(0.0, 0.9999);
        self.dirty = true;
    }

    /// Set the overall linear tap gain.
    pub fn set_tap_gain(&mut self, gain: f32) {
        self.gain = gain.max(0.0);
        self.dirty = true;
    }

    /// Replace the seed sequence driving the layout (ignored if empty).
    pub fn set_seeds(&mut self, seeds: Vec<f32>) {
        if !seeds.is_empty() {
            self.seeds = seeds;
            self.dirty = true;
        }
    }

    /// Current seed sequence.
    pub fn seeds(&self) -> &[f32] {
        &self.seeds
    }

    /// Rebuild the pending tap set from the current configuration and make
    /// it active.
    ///
    /// Safe to call between blocks; idempotent for unchanged inputs. The
    /// pending layout is built in full before the swap so a concurrent
    /// `process` in the same (single-threaded) sequence can never see a
    /// partial layout.
    pub fn update(&mut self) {
        if !self.dirty {
            return;
        }

        self.pending.positions.clear();
        self.pending.gains.clear();

        let count = self.count.min(self.seeds.len());
        if count > 0 && self.gain > 0.0 {
            // Jittered weights; cumulative sums give the raw positions.
            let total: f32 = self.seeds[..count]
                .iter()
                .skip(1)
                .map(|s| 0.1 + s)
                .sum::<f32>()
                .max(f32::MIN_POSITIVE);

            let window = self.length_samples as f32;
            let mut cumulative = 0.0f32;
            let mut previous: Option<usize> = None;

            for k in 0..count {
                if k > 0 {
                    cumulative += 0.1 + self.seeds[k];
                }
                let raw = (window * cumulative / total + 0.5) as usize;
                let position = match previous {
                    None => raw,
                    Some(p) => raw.max(p + 1),
                };
                if position > self.length_samples {
                    // Window too small for the requested count.
                    break;
                }
                previous = Some(position);
                self.pending.positions.push(position);
                self.pending
                    .gains
                    .push(self.gain * powf(self.decay, k as f32 / count as f32));
            }
        }

        core::mem::swap(&mut self.active, &mut self.pending);
        self.dirty = false;
    }

    /// Active tap positions (sample offsets, strictly increasing).
    pub fn tap_positions(&self) -> &[usize] {
        &self.active.positions
    }

    /// Active tap gains (non-increasing).
    pub fn tap_gains(&self) -> &[f32] {
        &self.active.gains
    }

    /// Sum the active taps over `input` into the internal output buffer.
    pub fn process(&mut self, input: &[f32]) {
        debug_assert!(input.len() <= self.output.len());

        let len = self.history.len();
        for (i, &sample) in input.iter().enumerate() {
            self.history[self.write_pos] = sample;

            let mut acc = 0.0f32;
            for (&position, &tap_gain) in
                self.active.positions.iter().zip(&self.active.gains)
            {
                let read_pos = (self.write_pos + len - position) % len;
                acc += tap_gain * self.history[read_pos];
            }
            self.output[i] = acc;

            self.write_pos = (self.write_pos + 1) % len;
        }
    }

    /// The most recently produced block.
    pub fn output(&self) -> &[f32] {
        &self.output
    }

    /// Zero history and output without touching the configuration or the
    /// active tap layout.
    pub fn clear_buffers(&mut self) {
        self.history.fill(0.0);
        self.output.fill(0.0);
        self.write_pos = 0;
    }
}
