//! Seedable random source for selection.

use rand::prelude::*;

/// Random number generator wrapper for selection sampling.
pub struct SelectionRng {
    rng: StdRng,
}

impl SelectionRng {
    /// Create from seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create with random seed.
    pub fn random() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Uniform value in `[0, 1)`.
    pub fn unit(&mut self) -> f64 {
        self.rng.r#gen::<f64>()
    }

    /// `amount` distinct indices drawn uniformly from `0..len`.
    ///
    /// Returns fewer than `amount` indices when `len < amount`.
    pub fn sample_indices(&mut self, len: usize, amount: usize) -> Vec<usize> {
        rand::seq::index::sample(&mut self.rng, len, amount.min(len)).into_vec()
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }
}

impl std::fmt::Debug for SelectionRng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionRng").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_reproducible() {
        let mut a = SelectionRng::new(42);
        let mut b = SelectionRng::new(42);
        for _ in 0..10 {
            assert_eq!(a.unit(), b.unit());
        }
        assert_eq!(a.sample_indices(20, 5), b.sample_indices(20, 5));
    }

    #[test]
    fn test_unit_range() {
        let mut rng = SelectionRng::new(7);
        for _ in 0..1000 {
            let x = rng.unit();
            assert!((0.0..1.0).contains(&x));
        }
    }

    #[test]
    fn test_sample_indices_distinct() {
        let mut rng = SelectionRng::new(3);
        let mut indices = rng.sample_indices(10, 4);
        assert_eq!(indices.len(), 4);
        indices.sort_unstable();
        indices.dedup();
        assert_eq!(indices.len(), 4);
        assert!(indices.iter().all(|&i| i < 10));

        assert_eq!(rng.sample_indices(2, 5).len(), 2);
    }

    #[test]
    fn test_shuffle_keeps_elements() {
        let mut rng = SelectionRng::new(9);
        let mut items: Vec<u32> = (0..16).collect();
        rng.shuffle(&mut items);
        items.sort_unstable();
        assert_eq!(items, (0..16).collect::<Vec<_>>());
    }
}
