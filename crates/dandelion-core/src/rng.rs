//! Seeded randomness for sampling k-trees.
//!
//! Batches are reproducible tree by tree: tree `i` of a batch seeded with
//! `master` draws from the substream seed `SipHash-1-3(master, i)` under zero
//! keys, independent of how many trees came before it.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, RngCore, SeedableRng};
use siphasher::sip::SipHasher13;
use std::hash::Hasher;

/// Seeded generator handed to the k-tree samplers.
#[derive(Debug, Clone)]
pub struct RngHandle {
    rng: StdRng,
    seed: u64,
    substream: Option<u64>,
}

impl RngHandle {
    /// Creates a handle drawing directly from `seed`.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
            substream: None,
        }
    }

    /// Creates the handle for substream `substream` of `master_seed`.
    pub fn for_substream(master_seed: u64, substream: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(derive_substream_seed(master_seed, substream)),
            seed: master_seed,
            substream: Some(substream),
        }
    }

    /// Seed the handle was created from (the master seed for substreams).
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Substream index, `None` for handles created with [`RngHandle::from_seed`].
    pub fn substream(&self) -> Option<u64> {
        self.substream
    }

    /// Draws an index uniformly from `0..len`. `len` must be non-zero.
    pub fn draw_index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }

    /// Shuffles a slice of labels in place.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }
}

impl RngCore for RngHandle {
    fn next_u32(&mut self) -> u32 {
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.rng.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.rng.try_fill_bytes(dest)
    }
}

/// Seed of substream `substream` under `master_seed`.
pub fn derive_substream_seed(master_seed: u64, substream: u64) -> u64 {
    let mut hasher = SipHasher13::new_with_keys(0, 0);
    hasher.write_u64(master_seed);
    hasher.write_u64(substream);
    hasher.finish()
}
