//! Randomness for choosing who moves first.
//!
//! The engine never reaches for a global generator on its own: callers pass
//! an [`Rng`], a seed, or the starting player directly.
//!
//! ```
//! use tictactoe_engine::GameRng;
//!
//! let a = GameRng::new(7).first_player();
//! let b = GameRng::new(7).first_player();
//! assert_eq!(a, b);
//! ```

use crate::types::PlayerId;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Picks a starting player uniformly at random.
pub fn choose_first_player<R: Rng + ?Sized>(rng: &mut R) -> PlayerId {
    if rng.gen_bool(0.5) {
        PlayerId::One
    } else {
        PlayerId::Zero
    }
}

/// Deterministic generator for reproducible games.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seed this generator was created with.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Draws the next starting player.
    pub fn first_player(&mut self) -> PlayerId {
        choose_first_player(&mut self.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_player() {
        for seed in 0..32 {
            assert_eq!(
                GameRng::new(seed).first_player(),
                GameRng::new(seed).first_player()
            );
        }
    }

    #[test]
    fn test_both_players_reachable() {
        let mut rng = GameRng::new(1);
        let draws: Vec<_> = (0..64).map(|_| rng.first_player()).collect();
        assert!(draws.contains(&PlayerId::Zero));
        assert!(draws.contains(&PlayerId::One));
    }
}
