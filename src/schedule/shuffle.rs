use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Source of randomness for the scheduler: it only ever reorders lists
pub trait Shuffler {
    fn shuffle<T>(&mut self, items: &mut [T]);
}

/// Shuffler backed by a `rand` generator
#[derive(Debug, Clone)]
pub struct RandomShuffler<R = StdRng> {
    rng: R,
}

impl RandomShuffler<StdRng> {
    /// Non-reproducible shuffler, seeded from the OS
    pub fn from_entropy() -> Self {
        RandomShuffler { rng: StdRng::from_entropy() }
    }

    /// Reproducible shuffler: the same seed gives the same timetable
    pub fn seeded(seed: u64) -> Self {
        RandomShuffler { rng: StdRng::seed_from_u64(seed) }
    }
}

impl<R: Rng> RandomShuffler<R> {
    /// Wraps any generator, e.g. one shared with other code
    pub fn new(rng: R) -> Self {
        RandomShuffler { rng }
    }
}

impl<R: Rng> Shuffler for RandomShuffler<R> {
    fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }
}
