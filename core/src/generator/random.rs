use alloc::vec::Vec;

use super::*;

/// Draws each value independently and uniformly from the digit-width span.
/// Duplicates are allowed. Deterministic for a given seed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RandomSequenceGenerator {
    seed: u64,
}

impl RandomSequenceGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl SequenceGenerator for RandomSequenceGenerator {
    fn generate(self, config: GameConfig) -> Sequence {
        use rand::prelude::*;

        let digits = if config.digits < 1 {
            // only reachable through new_unchecked; a zero width has no
            // defined numeric range
            log::warn!("digit width 0 requested, generating width 1 instead");
            1
        } else {
            config.digits.min(MAX_DIGIT_WIDTH)
        };
        let (lo, hi) = digit_span(digits);

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let values: Vec<Value> = (0..config.count)
            .map(|_| rng.random_range(lo..=hi))
            .collect();

        Sequence { values, digits }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_values_fill_length_and_span() {
        for (count, digits) in [(1u8, 1u8), (3, 2), (10, 4), (24, 9)] {
            let config = GameConfig::new(Mode::Normal, count, digits);
            let seq = RandomSequenceGenerator::new(7).generate(config);
            let (lo, hi) = digit_span(digits);

            assert_eq!(seq.len(), count);
            assert!(seq.iter().all(|value| (lo..=hi).contains(&value)));
        }
    }

    #[test]
    fn same_seed_same_sequence() {
        let config = GameConfig::new(Mode::Normal, 8, 3);
        let a = RandomSequenceGenerator::new(1234).generate(config);
        let b = RandomSequenceGenerator::new(1234).generate(config);
        assert_eq!(a, b);
    }

    #[test]
    fn different_seeds_diverge() {
        let config = GameConfig::new(Mode::Normal, 8, 3);
        let a = RandomSequenceGenerator::new(1).generate(config);
        let b = RandomSequenceGenerator::new(2).generate(config);
        assert_ne!(a, b);
    }

    #[test]
    fn zero_width_config_falls_back_to_one_digit() {
        let config = GameConfig::new_unchecked(Mode::Normal, 3, 0);
        let seq = RandomSequenceGenerator::new(9).generate(config);
        assert_eq!(seq.digits(), 1);
        assert!(seq.iter().all(|value| (1..=9).contains(&value)));
    }
}
