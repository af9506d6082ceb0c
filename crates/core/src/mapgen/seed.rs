//! Deterministic seed hashing and the pseudo-random stream used by every generation stage.
//!
//! The stream is SplitMix64 so the same seed yields the same draws on any
//! platform. String seeds are hashed with xxh3 before seeding.

use std::fmt;
use std::process;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::xxh3_64;

const GOLDEN_GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeedInput {
    Text(String),
    Number(u64),
}

impl SeedInput {
    pub fn state(&self) -> u64 {
        match self {
            Self::Text(text) => xxh3_64(text.as_bytes()),
            Self::Number(value) => *value,
        }
    }
}

impl fmt::Display for SeedInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Number(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for SeedInput {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for SeedInput {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<u64> for SeedInput {
    fn from(value: u64) -> Self {
        Self::Number(value)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelRng {
    state: u64,
}

impl LevelRng {
    pub fn new(seed: impl Into<SeedInput>) -> Self {
        Self { state: seed.into().state() }
    }

    pub fn reseed(&mut self, seed: impl Into<SeedInput>) {
        self.state = seed.into().state();
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(GOLDEN_GAMMA);
        let mut mixed = self.state;
        mixed = (mixed ^ (mixed >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        mixed = (mixed ^ (mixed >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        mixed ^ (mixed >> 31)
    }

    /// Uniform float in `[0, 1)` built from the top 53 bits of the next draw.
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 * (1.0 / (1_u64 << 53) as f64)
    }

    /// Uniform index in `0..upper`. Returns 0 without drawing when `upper` is 0.
    pub fn below(&mut self, upper: usize) -> usize {
        if upper == 0 {
            return 0;
        }
        let index = (self.next_f64() * upper as f64) as usize;
        index.min(upper - 1)
    }

    pub fn between(&mut self, min_value: usize, max_value: usize) -> usize {
        debug_assert!(min_value <= max_value);
        min_value + self.below(max_value - min_value + 1)
    }

    pub fn chance(&mut self, probability: f64) -> bool {
        self.next_f64() < probability
    }

    /// Uniform odd value in `[min_value, max_value]`; both bounds must be odd.
    pub fn odd_between(&mut self, min_value: usize, max_value: usize) -> usize {
        debug_assert!(min_value % 2 == 1 && max_value % 2 == 1 && min_value <= max_value);
        min_value + 2 * self.below((max_value - min_value) / 2 + 1)
    }
}

static GENERATED_SEED_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Seed string used when the caller does not supply one; keep it for save games.
pub fn generate_runtime_seed() -> String {
    let elapsed = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default();
    let pid = u64::from(process::id());
    let counter = GENERATED_SEED_COUNTER.fetch_add(1, Ordering::Relaxed);

    let nanos = elapsed.as_nanos();
    let entropy =
        (nanos as u64) ^ ((nanos >> 64) as u64) ^ pid.rotate_left(17) ^ counter.rotate_left(7);
    let mut rng = LevelRng::new(entropy);

    format!("{}-{:012x}", elapsed.as_millis(), rng.next_u64() & 0xFFFF_FFFF_FFFF)
}
