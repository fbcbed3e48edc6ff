//! Source of randomness for shuffles and tie-breaks.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Everything the engine draws at random goes through this trait, so tests can
/// script the outcome.
pub trait RandomSource {
    /// Shuffle `slice` in place.
    fn shuffle<T>(&mut self, slice: &mut [T]);

    /// Fair coin: `true` picks the first of two options.
    fn coin_flip(&mut self) -> bool;
}

/// Production randomness from `rand::thread_rng`.
#[derive(Clone, Copy, Debug, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut rand::thread_rng());
    }

    fn coin_flip(&mut self) -> bool {
        rand::thread_rng().gen_bool(0.5)
    }
}

/// Reproducible randomness: same seed, same shuffles and flips.
#[derive(Clone, Debug)]
pub struct SeededRandom {
    inner: StdRng,
}

impl SeededRandom {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.inner);
    }

    fn coin_flip(&mut self) -> bool {
        self.inner.gen_bool(0.5)
    }
}

/// Either source, picked at startup from configuration.
#[derive(Clone, Debug)]
pub enum EngineRandom {
    Thread(ThreadRandom),
    Seeded(SeededRandom),
}

impl EngineRandom {
    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(s) => Self::Seeded(SeededRandom::from_seed(s)),
            None => Self::Thread(ThreadRandom),
        }
    }
}

impl Default for EngineRandom {
    fn default() -> Self {
        Self::Thread(ThreadRandom)
    }
}

impl RandomSource for EngineRandom {
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        match self {
            Self::Thread(r) => r.shuffle(slice),
            Self::Seeded(r) => r.shuffle(slice),
        }
    }

    fn coin_flip(&mut self) -> bool {
        match self {
            Self::Thread(r) => r.coin_flip(),
            Self::Seeded(r) => r.coin_flip(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_shuffle() {
        let mut a: Vec<u32> = (0..8).collect();
        let mut b = a.clone();
        SeededRandom::from_seed(7).shuffle(&mut a);
        SeededRandom::from_seed(7).shuffle(&mut b);
        assert_eq!(a, b);
    }

    #[test]
    fn shuffle_keeps_every_element() {
        let mut v: Vec<u32> = (0..8).collect();
        SeededRandom::from_seed(99).shuffle(&mut v);
        v.sort_unstable();
        assert_eq!(v, (0..8).collect::<Vec<_>>());
    }
}
