//! Seeded random stream shared by level generation and AI.
//! Every draw goes through `next_u64` so a seed fully determines a run.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};

#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
}

impl GameRng {
    pub fn seed_from_u64(seed: u64) -> Self {
        Self { inner: ChaCha8Rng::seed_from_u64(seed) }
    }

    pub fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    /// Uniform integer in `min_value..=max_value`.
    pub fn range_inclusive(&mut self, min_value: i32, max_value: i32) -> i32 {
        debug_assert!(min_value <= max_value);
        let span = (i64::from(max_value) - i64::from(min_value) + 1) as u64;
        let offset = (self.next_u64() % span) as i64;
        (i64::from(min_value) + offset) as i32
    }

    /// Uniform float in `[0, 1)` built from the top 53 bits of one draw.
    pub fn unit_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 * (1.0 / (1_u64 << 53) as f64)
    }

    pub fn coin_flip(&mut self) -> bool {
        self.unit_f64() < 0.5
    }

    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let index = (self.next_u64() % items.len() as u64) as usize;
        items.get(index)
    }

    /// Index chosen proportionally to `weights`; zero-weight entries are never picked.
    pub fn weighted_index(&mut self, weights: &[u32]) -> Option<usize> {
        let total: u64 = weights.iter().map(|&weight| u64::from(weight)).sum();
        if total == 0 {
            return None;
        }
        let roll = self.next_u64() % total;
        let mut cumulative = 0_u64;
        for (index, &weight) in weights.iter().enumerate() {
            cumulative += u64::from(weight);
            if roll < cumulative {
                return Some(index);
            }
        }
        None
    }
}
