//! Deterministic random number source for combat rolls.
//!
//! The only randomness in the simulation is damage jitter. Rolls are derived
//! from a world seed and a roll counter through [`compute_seed`], so replaying
//! the same inputs reproduces the same damage numbers.

/// Deterministic random number oracle.
///
/// Implementations must produce the same value for the same seed.
pub trait RngOracle: Send + Sync {
    fn next_u32(&self, seed: u64) -> u32;

    /// Value in `[min, max]` inclusive.
    fn range(&self, seed: u64, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        let span = u64::from(max - min) + 1;
        min + (u64::from(self.next_u32(seed)) % span) as u32
    }

    /// Symmetric offset in `[-magnitude, magnitude]` inclusive.
    fn jitter(&self, seed: u64, magnitude: u32) -> i64 {
        let roll = self.range(seed, 0, magnitude.saturating_mul(2));
        i64::from(roll) - i64::from(magnitude)
    }
}

/// PCG-XSH-RR generator: one LCG step followed by an xorshift and a
/// state-dependent rotation.
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    #[inline]
    fn output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        Self::output(Self::step(seed))
    }
}

/// Derives a per-roll seed.
///
/// * `world_seed` - fixed for the lifetime of a `World`
/// * `nonce` - roll counter, incremented for every roll the world makes
/// * `character` - raw id of the rolling character
/// * `context` - distinguishes independent rolls made for the same event
pub fn compute_seed(world_seed: u64, nonce: u64, character: u32, context: u32) -> u64 {
    let mut hash = world_seed;
    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= u64::from(character).wrapping_mul(0x517cc1b727220a95);
    hash ^= u64::from(context).wrapping_mul(0x85ebca6b);

    // SplitMix-style avalanche
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;
    hash
}
