use rand::distributions::Standard;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use thiserror::Error;
use tracing::trace;

pub const DEFAULT_CACHE_CAPACITY: usize = 2048;

const KEY_WORDS: usize = 8;
const FOLD_MULTIPLIER: u32 = 0x9E37_79B9;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum RandomError {
    #[error("Seed '{0}' does not produce a usable generator key")]
    DegenerateSeed(String),
    #[error("Random cache capacity must be at least 1")]
    ZeroCapacity,
}

/// Uniform draws in `[0, 1)` served from a fixed-size cache.
///
/// The cache is regenerated as a whole once the cursor reaches the capacity, so the sequence
/// of draws for a given seed does not depend on how it is consumed.
#[derive(Debug, Clone)]
pub struct RandomStream {
    rng: ChaCha8Rng,
    cache: Vec<f64>,
    cursor: usize,
    refills: u64,
}

impl RandomStream {
    pub fn new(seed: &str, capacity: usize) -> Result<Self, RandomError> {
        let key = derive_key(seed).ok_or_else(|| RandomError::DegenerateSeed(seed.to_string()))?;
        Self::with_rng(ChaCha8Rng::from_seed(key), capacity)
    }

    pub fn from_u64(seed: u64, capacity: usize) -> Result<Self, RandomError> {
        Self::with_rng(ChaCha8Rng::seed_from_u64(seed), capacity)
    }

    fn with_rng(rng: ChaCha8Rng, capacity: usize) -> Result<Self, RandomError> {
        if capacity == 0 {
            return Err(RandomError::ZeroCapacity);
        }
        Ok(Self {
            rng,
            cache: vec![0.0; capacity],
            cursor: capacity,
            refills: 0,
        })
    }

    #[inline]
    pub fn next_uniform(&mut self) -> f64 {
        if self.cursor == self.cache.len() {
            self.refill();
        }
        let value = self.cache[self.cursor];
        self.cursor += 1;
        value
    }

    fn refill(&mut self) {
        for slot in self.cache.iter_mut() {
            *slot = self.rng.sample(Standard);
        }
        self.cursor = 0;
        self.refills += 1;
        trace!(refills = self.refills, "Random cache refilled.");
    }

    pub fn capacity(&self) -> usize {
        self.cache.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn refills(&self) -> u64 {
        self.refills
    }
}

fn derive_words(seed: &str) -> Vec<u32> {
    let mut words: Vec<u32> = seed.bytes().map(|b| u32::from(b) << 8).collect();
    let Some(last) = words.len().checked_sub(1) else {
        return words;
    };
    for i in 0..words.len() {
        let factor = words[last].wrapping_add(i as u32 + 1);
        words[i] = words[i].wrapping_mul(factor);
    }
    words
}

fn derive_key(seed: &str) -> Option<[u8; 32]> {
    let words = derive_words(seed);
    if words.is_empty() {
        return None;
    }

    let mut folded = [0u32; KEY_WORDS];
    for (i, word) in words.iter().enumerate() {
        let slot = &mut folded[i % KEY_WORDS];
        *slot = slot.rotate_left(5) ^ word.wrapping_mul(FOLD_MULTIPLIER);
    }
    if folded.iter().all(|&w| w == 0) {
        return None;
    }

    let mut key = [0u8; 32];
    for (chunk, word) in key.chunks_exact_mut(4).zip(folded) {
        chunk.copy_from_slice(&word.to_le_bytes());
    }
    Some(key)
}
