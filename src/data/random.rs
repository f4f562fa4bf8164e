use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniformly distributed reals in `[0, 1)`.
///
/// Every [`rand::Rng`] is a source, so a seeded `StdRng` gives reproducible
/// cluster initialization. Tests can script the values directly.
pub trait UniformSource {
    fn next_uniform(&mut self) -> f64;
}

impl<R: Rng + ?Sized> UniformSource for R {
    fn next_uniform(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

/// Seeded generator when `seed` is given, entropy-seeded otherwise.
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Maps a uniform draw onto an index in `0..len`.
pub(crate) fn uniform_index<R: UniformSource + ?Sized>(rng: &mut R, len: usize) -> usize {
    let index = (rng.next_uniform() * len as f64) as usize;
    index.min(len.saturating_sub(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(f64);

    impl UniformSource for Fixed {
        fn next_uniform(&mut self) -> f64 {
            self.0
        }
    }

    #[test]
    fn test_rng_values_in_unit_interval() {
        let mut rng = rng_from_seed(Some(42));
        for _ in 0..1000 {
            let value = rng.next_uniform();
            assert!((0.0..1.0).contains(&value));
        }
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let mut first = rng_from_seed(Some(7));
        let mut second = rng_from_seed(Some(7));

        let a = (0..5).map(|_| first.next_uniform()).collect::<Vec<_>>();
        let b = (0..5).map(|_| second.next_uniform()).collect::<Vec<_>>();
        assert_eq!(a, b);
    }

    #[test]
    fn test_uniform_index() {
        assert_eq!(uniform_index(&mut Fixed(0.0), 4), 0);
        assert_eq!(uniform_index(&mut Fixed(0.5), 4), 2);
        assert_eq!(uniform_index(&mut Fixed(0.999), 4), 3);
        assert_eq!(uniform_index(&mut Fixed(1.0), 4), 3);
    }
}
