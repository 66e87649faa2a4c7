//! Element ids, seeds and timestamps
//!
//! Everything non-deterministic about a build comes from a [`Generator`], so
//! tests can pin both the random source and the clock.

use rand::distr::Alphanumeric;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Length of generated element ids
pub const ID_LENGTH: usize = 12;

/// Exclusive upper bound for seeds and version nonces (2^31 - 1)
pub const MAX_SEED: u32 = 2_147_483_647;

/// Source of ids, seeds and modification timestamps
///
/// `R` is any random number generator; the default is the ChaCha-based
/// [`StdRng`], which is cryptographically strong.
#[derive(Debug, Clone)]
pub struct Generator<R = StdRng> {
    rng: R,
    timestamp: Option<i64>,
}

impl Generator<StdRng> {
    /// Generator seeded from the operating system, stamping elements with the
    /// current time
    pub fn system() -> Self {
        Self::new(StdRng::from_os_rng())
    }

    /// Reproducible generator; combine with [`Generator::with_timestamp`] for
    /// byte-identical output across runs
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl Default for Generator<StdRng> {
    fn default() -> Self {
        Self::system()
    }
}

impl<R: Rng> Generator<R> {
    /// Wrap an arbitrary random source
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            timestamp: None,
        }
    }

    /// Stamp every element with `millis` instead of the wall clock
    pub fn with_timestamp(mut self, millis: i64) -> Self {
        self.timestamp = Some(millis);
        self
    }

    /// A fresh 12-character alphanumeric id
    pub fn id(&mut self) -> String {
        (&mut self.rng)
            .sample_iter(Alphanumeric)
            .take(ID_LENGTH)
            .map(char::from)
            .collect()
    }

    /// A non-negative 31-bit seed
    pub fn seed(&mut self) -> u32 {
        self.rng.random_range(0..MAX_SEED)
    }

    /// A version nonce; drawn from the same range as seeds
    pub fn nonce(&mut self) -> u32 {
        self.seed()
    }

    /// Milliseconds since the Unix epoch
    pub fn timestamp(&self) -> i64 {
        self.timestamp
            .unwrap_or_else(|| chrono::Utc::now().timestamp_millis())
    }
}
