//! Deterministic shuffling for board dealing.
//!
//! The RNG lives inside [`GameState`](super::GameState), so every shuffle
//! advances state that is carried from one snapshot to the next. That keeps
//! the reducer a pure function of `(state, event)` and makes a deal
//! reproducible from its seed.
//!
//! ```
//! use flipzy::core::GameRng;
//!
//! let mut a = GameRng::new(42);
//! let mut b = GameRng::new(42);
//!
//! let mut left = vec![1, 2, 3, 4, 5, 6];
//! let mut right = left.clone();
//! a.shuffle(&mut left);
//! b.shuffle(&mut right);
//!
//! assert_eq!(left, right);
//! ```

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Seeded shuffle source.
///
/// Two RNGs compare equal when they share a seed and stream position, i.e.
/// when their next shuffles would come out the same.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Shuffle a slice in place (uniform Fisher-Yates).
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.inner);
    }
}

impl PartialEq for GameRng {
    fn eq(&self, other: &Self) -> bool {
        self.seed == other.seed && self.inner.get_word_pos() == other.inner.get_word_pos()
    }
}

impl Eq for GameRng {}
