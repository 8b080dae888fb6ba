//! Injectable randomness for entity creation and meteor spawning.

/// A source of uniform samples in `[0, 1)`.
///
/// Every [`rand::Rng`] is a `RandomSource`, so production code can pass
/// `rand::thread_rng()` or a seeded `StdRng`, while tests can script the
/// exact draws with [`FixedSequence`].
pub trait RandomSource {
    /// Next uniform sample in `[0, 1)`.
    fn next_f64(&mut self) -> f64;

    /// Uniform sample in `[low, high)`.
    fn range(&mut self, low: f64, high: f64) -> f64 {
        low + self.next_f64() * (high - low)
    }

    /// `true` with probability `p`.
    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Uniform index in `0..len`. `len` must be non-zero.
    fn index(&mut self, len: usize) -> usize {
        ((self.next_f64() * len as f64) as usize).min(len - 1)
    }
}

impl<R: rand::Rng + ?Sized> RandomSource for R {
    fn next_f64(&mut self) -> f64 {
        self.gen_range(0.0..1.0)
    }
}

/// Replays a fixed list of samples, cycling when exhausted.
#[derive(Debug, Clone)]
pub struct FixedSequence {
    values: Vec<f64>,
    cursor: usize,
}

impl FixedSequence {
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        Self {
            values: values.into(),
            cursor: 0,
        }
    }

    /// Number of samples drawn so far.
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for FixedSequence {
    fn next_f64(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let v = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        v
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn test_fixed_sequence_cycles() {
        let mut seq = FixedSequence::new([0.1, 0.9]);
        assert_eq!(seq.next_f64(), 0.1);
        assert_eq!(seq.next_f64(), 0.9);
        assert_eq!(seq.next_f64(), 0.1);
        assert_eq!(seq.draws(), 3);
    }

    #[test]
    fn test_empty_sequence_yields_zero() {
        let mut seq = FixedSequence::new(Vec::new());
        assert_eq!(seq.next_f64(), 0.0);
    }

    #[test]
    fn test_helpers() {
        let mut seq = FixedSequence::new([0.5, 0.01, 0.999]);
        assert_eq!(seq.range(2.0, 4.0), 3.0);
        assert!(seq.chance(0.02));
        assert_eq!(seq.index(4), 3);
    }

    #[test]
    fn test_rng_is_a_source() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let v = rng.next_f64();
            assert!((0.0..1.0).contains(&v));
        }
    }
}
