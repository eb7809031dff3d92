//! Random number generation for the simulation core.
//!
//! Uses a seeded ChaCha RNG for reproducibility. Generators are created at
//! the call-site and passed by reference; there is no process-wide stream.
//! Room generation reseeds from the room's coordinates immediately before
//! drawing its attributes, so outcomes never depend on visit order.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Multiplier applied to the y coordinate when deriving a room seed.
const COORD_SEED_Y: u64 = 0xc70f_6907;
/// Multiplier applied to the x coordinate when deriving a room seed.
const COORD_SEED_X: u64 = 2_166_136_261;

/// Simulation random number generator
///
/// Wraps ChaCha8Rng for reproducible random number generation.
/// Note: RNG state is not serialized - only the seed round-trips, and a
/// deserialized generator restarts from it.
#[derive(Debug, Clone)]
pub struct GameRng {
    rng: ChaCha8Rng,
    seed: u64,
}

// Custom serialization - only serialize seed, recreate RNG on deserialize
impl Serialize for GameRng {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.seed.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for GameRng {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let seed = u64::deserialize(deserializer)?;
        Ok(GameRng::new(seed))
    }
}

impl GameRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create a new RNG with a random seed
    pub fn from_entropy() -> Self {
        let seed = rand::random();
        Self::new(seed)
    }

    /// Create the generator for the room at `(x, y)`.
    ///
    /// The seed mixes the two coordinates with large odd multiplicative
    /// constants, so every coordinate owns a distinct, stable stream.
    pub fn for_coords(x: i64, y: i64) -> Self {
        let seed = (y as u64)
            .wrapping_mul(COORD_SEED_Y)
            .wrapping_add((x as u64).wrapping_mul(COORD_SEED_X));
        Self::new(seed)
    }

    /// Get the seed used to create this RNG
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform draw in `[0, 1)`.
    pub fn frand(&mut self) -> f64 {
        self.rng.gen_range(0.0..1.0)
    }

    /// Uniform draw in `0..n`. Returns 0 if n is 0.
    pub fn rn2(&mut self, n: u32) -> u32 {
        if n == 0 {
            return 0;
        }
        self.rng.gen_range(0..n)
    }

    /// Uniform draw in `1..=n`. Returns 0 if n is 0.
    pub fn rnd(&mut self, n: u32) -> u32 {
        if n == 0 {
            return 0;
        }
        self.rng.gen_range(1..=n)
    }
}
