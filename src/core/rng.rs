//! Random number generation for dice, shuffles and event draws.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical sequence
//! - **Serializable**: O(1) state capture and restore
//! - **Injectable**: the engine draws through [`RandomSource`], so tests
//!   can script exact die faces with [`ScriptedRng`]
//!
//! ```
//! use broadside::core::{GameRng, RandomSource};
//!
//! let mut rng = GameRng::new(42);
//! let face = rng.roll_die();
//! assert!((1..=6).contains(&face));
//! ```

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Source of every random decision the engine makes.
///
/// All randomness in a game session flows through one value implementing
/// this trait.
pub trait RandomSource {
    /// Roll a six-sided die (uniform in `1..=6`).
    fn roll_die(&mut self) -> u8;

    /// Uniform index in `0..len`. `len` must be nonzero.
    fn gen_index(&mut self, len: usize) -> usize;

    /// `true` with the given probability.
    fn gen_bool(&mut self, probability: f64) -> bool;
}

/// Deterministic RNG backed by ChaCha8.
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

    /// Seed from operating system entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// The seed this RNG was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

impl RandomSource for GameRng {
    fn roll_die(&mut self) -> u8 {
        self.inner.gen_range(1..=6)
    }

    fn gen_index(&mut self, len: usize) -> usize {
        self.inner.gen_range(0..len)
    }

    fn gen_bool(&mut self, probability: f64) -> bool {
        self.inner.gen_bool(probability.clamp(0.0, 1.0))
    }
}

/// Serializable RNG state for checkpointing.
///
/// Uses ChaCha8 word position for O(1) serialization regardless of
/// how many random numbers have been generated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    /// Original seed
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
}

/// Random source with scripted answers.
///
/// Die rolls and coin flips are served from queues first; once a queue is
/// empty the request falls through to a seeded [`GameRng`]. Index requests
/// always come from the fallback RNG unless scripted with
/// [`ScriptedRng::push_index`].
///
/// ```
/// use broadside::core::{RandomSource, ScriptedRng};
///
/// let mut rng = ScriptedRng::new(7).with_dice([4, 5]);
/// assert_eq!(rng.roll_die(), 4);
/// assert_eq!(rng.roll_die(), 5);
/// ```
#[derive(Clone, Debug)]
pub struct ScriptedRng {
    dice: VecDeque<u8>,
    coins: VecDeque<bool>,
    indices: VecDeque<usize>,
    fallback: GameRng,
}

impl ScriptedRng {
    /// Empty script with a seeded fallback.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            dice: VecDeque::new(),
            coins: VecDeque::new(),
            indices: VecDeque::new(),
            fallback: GameRng::new(seed),
        }
    }

    /// Queue die faces (builder form).
    #[must_use]
    pub fn with_dice(mut self, faces: impl IntoIterator<Item = u8>) -> Self {
        self.push_dice(faces);
        self
    }

    /// Queue coin-flip answers (builder form).
    #[must_use]
    pub fn with_coins(mut self, coins: impl IntoIterator<Item = bool>) -> Self {
        self.coins.extend(coins);
        self
    }

    /// Queue die faces. Faces outside `1..=6` are clamped.
    pub fn push_dice(&mut self, faces: impl IntoIterator<Item = u8>) {
        self.dice.extend(faces.into_iter().map(|f| f.clamp(1, 6)));
    }

    /// Queue a coin-flip answer.
    pub fn push_coin(&mut self, value: bool) {
        self.coins.push_back(value);
    }

    /// Queue an index answer. It is reduced modulo the requested length.
    pub fn push_index(&mut self, index: usize) {
        self.indices.push_back(index);
    }

    /// Number of scripted die faces not yet consumed.
    #[must_use]
    pub fn remaining_dice(&self) -> usize {
        self.dice.len()
    }
}

impl RandomSource for ScriptedRng {
    fn roll_die(&mut self) -> u8 {
        match self.dice.pop_front() {
            Some(face) => face,
            None => self.fallback.roll_die(),
        }
    }

    fn gen_index(&mut self, len: usize) -> usize {
        match self.indices.pop_front() {
            Some(index) => index % len,
            None => self.fallback.gen_index(len),
        }
    }

    fn gen_bool(&mut self, probability: f64) -> bool {
        match self.coins.pop_front() {
            Some(value) => value,
            None => self.fallback.gen_bool(probability),
        }
    }
}
