//! Deterministic random stream for the automaton
//!
//! Every automaton owns one `ChaCha8Rng` seeded from a `u64`, so identical seeds
//! and configurations reproduce identical grids and statistics on every platform.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Random stream type owned by each automaton.
pub type SimRng = ChaCha8Rng;

/// Create the random stream for `seed`.
pub fn seeded_rng(seed: u64) -> SimRng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Draw one uniform value in [0, 1) and test it against `probability`.
///
/// Consumes exactly one draw. Success is `draw < probability`, a strict
/// comparison rather than `<=`: a probability of 0 then never succeeds and a
/// probability of 1 always succeeds. The two comparisons differ only when the
/// draw lands exactly on `probability`.
#[inline]
pub(crate) fn chance<R: Rng + ?Sized>(rng: &mut R, probability: f64) -> bool {
    rng.random::<f64>() < probability
}
