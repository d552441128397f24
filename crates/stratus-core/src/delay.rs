//! Plain sample delay with block processing and an owned output buffer.
//!
//! This is the pre-delay stage of the reverb: no feedback, no interpolation,
//! just an integer-offset circular buffer. Both the ring and the per-block
//! output are allocated once at construction and never resized, so
//! [`BlockDelay::process`] is allocation-free.

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std as alloc;

use alloc::vec;
use alloc::vec::Vec;

/// Fixed-capacity integer delay processing whole blocks at a time.
///
/// # Example
///
/// ```rust
/// use stratus_core::BlockDelay;
///
/// let mut delay = BlockDelay::new(64, 4800);
/// delay.set_delay_samples(3);
/// delay.process(&[1.0, 0.0, 0.0, 0.0, 0.0]);
/// assert_eq!(delay.output()[3], 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct BlockDelay {
    ring: Vec<f32>,
    output: Vec<f32>,
    write_pos: usize,
    delay_samples: usize,
}

impl BlockDelay {
    /// Create a delay sized for blocks of up to `max_block` samples and
    /// delays of up to `max_delay_samples`.
    ///
    /// # Panics
    ///
    /// Panics if either size is zero.
    pub fn new(max_block: usize, max_delay_samples: usize) -> Self {
        assert!(max_block > 0, "block size must be > 0");
        assert!(max_delay_samples > 0, "delay capacity must be > 0");

        Self {
            // One extra slot so a delay equal to the full capacity is valid.
            ring: vec![0.0; max_delay_samples + 1],
            output: vec![0.0; max_block],
            write_pos: 0,
            delay_samples: 0,
        }
    }

    /// Set the delay length in samples, clamped to the construction capacity.
    pub fn set_delay_samples(&mut self, samples: usize) {
        self.delay_samples = samples.min(self.ring.len() - 1);
    }

    /// Current delay length in samples.
    pub fn delay_samples(&self) -> usize {
        self.delay_samples
    }

    /// Maximum delay this instance supports.
    pub fn capacity(&self) -> usize {
        self.ring.len() - 1
    }

    /// Delay `input` into the internal output buffer.
    ///
    /// Only the first `input.len()` samples of [`output`](Self::output) are
    /// meaningful afterwards. Input slices longer than the construction-time
    /// block size are a caller error and will panic in debug builds.
    pub fn process(&mut self, input: &[f32]) {
        debug_assert!(input.len() <= self.output.len());

        let len = self.ring.len();
        for (i, &sample) in input.iter().enumerate() {
            self.ring[self.write_pos] = sample;
            let read_pos = (self.write_pos + len - self.delay_samples) % len;
            self.output[i] = self.ring[read_pos];
            self.write_pos = (self.write_pos + 1) % len;
        }
    }

    /// The most recently produced block.
    pub fn output(&self) -> &[f32] {
        &self.output
    }

    /// Zero all internal state without touching the configured delay length.
    pub fn clear(&mut self) {
        self.ring.fill(0.0);
        self.output.fill(0.0);
        self.write_pos = 0;
    }
}
