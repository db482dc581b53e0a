//! Seeded pseudo-random number generation
//!
//! Every resolution step draws from an explicit [`RandomSource`] handed in by
//! the caller. There is no ambient generator, so identical seeds replay
//! identical matches and parallel simulations never share state.

/// A source of uniformly distributed 32-bit values.
///
/// Only `next_u32` is required; the bounded helpers are derived from it so
/// that scripted sources used in tests can override them to force exact
/// outcomes.
pub trait RandomSource {
    /// Generate the next raw 32-bit value.
    fn next_u32(&mut self) -> u32;

    /// Uniform integer in `[0, max_inclusive]`.
    fn roll(&mut self, max_inclusive: u32) -> u32 {
        match max_inclusive.checked_add(1) {
            Some(span) => self.next_u32() % span,
            None => self.next_u32(),
        }
    }

    /// Uniform index in `[0, len)`. Returns 0 when `len` is 0.
    fn pick(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        (self.next_u32() as usize) % len
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_u32(&mut self) -> u32 {
        (**self).next_u32()
    }

    fn roll(&mut self, max_inclusive: u32) -> u32 {
        (**self).roll(max_inclusive)
    }

    fn pick(&mut self, len: usize) -> usize {
        (**self).pick(len)
    }
}

/// Seeded random number generator
///
/// Deterministic: same seed + index = same sequence
#[derive(Clone, Debug)]
pub struct SeededRng {
    state: u64,
}

impl SeededRng {
    /// Create a new RNG from a 32-byte seed and match index
    pub fn new(seed: &[u8; 32], match_index: u32) -> Self {
        let mut state = 0u64;
        for (i, chunk) in seed.chunks(8).enumerate() {
            let mut bytes = [0u8; 8];
            bytes[..chunk.len()].copy_from_slice(chunk);
            state ^= u64::from_le_bytes(bytes).wrapping_add(i as u64);
        }

        state ^= (match_index as u64).wrapping_mul(0x517cc1b727220a95);
        Self::warmed(state)
    }

    /// Create a new RNG from a plain integer seed
    pub fn from_u64(seed: u64) -> Self {
        Self::warmed(seed.wrapping_mul(0x9e3779b97f4a7c15) ^ 0xd1b54a32d192ed03)
    }

    /// Derive an independent stream, e.g. one per match in a batch
    pub fn for_stream(&self, stream: u32) -> Self {
        let mut new_state = self.state;
        new_state ^= (stream as u64 + 1).wrapping_mul(0x9e3779b97f4a7c15);
        Self::warmed(new_state)
    }

    fn warmed(state: u64) -> Self {
        // xorshift has a fixed point at zero
        let state = if state == 0 { 0x2545f4914f6cdd1d } else { state };
        let mut rng = Self { state };
        for _ in 0..8 {
            rng.next_u64();
        }
        rng
    }

    /// Generate next u64
    pub fn next_u64(&mut self) -> u64 {
        // xorshift64*
        self.state ^= self.state >> 12;
        self.state ^= self.state << 25;
        self.state ^= self.state >> 27;
        self.state.wrapping_mul(0x2545f4914f6cdd1d)
    }
}

impl RandomSource for SeededRng {
    fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }
}
