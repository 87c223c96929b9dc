//! Random input sequences for the sort demos.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default number of bars in a demo.
pub const DEFAULT_LEN: usize = 20;

/// Smallest value a bar can take.
pub const DEFAULT_MIN: u32 = 5;

/// Largest value a bar can take.
pub const DEFAULT_MAX: u32 = 95;

/// Shape of a freshly generated sequence. Bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceConfig {
    pub len: usize,
    pub min: u32,
    pub max: u32,
}

impl Default for SequenceConfig {
    fn default() -> Self {
        Self {
            len: DEFAULT_LEN,
            min: DEFAULT_MIN,
            max: DEFAULT_MAX,
        }
    }
}

impl SequenceConfig {
    /// Check that the config describes at least one value in a non-empty range.
    pub fn validate(&self) -> Result<()> {
        if self.len == 0 {
            return Err(Error::InvalidSequenceConfig("length must be positive".into()));
        }
        if self.min > self.max {
            return Err(Error::InvalidSequenceConfig(format!(
                "min {} exceeds max {}",
                self.min, self.max
            )));
        }
        Ok(())
    }
}

/// Draw a sequence of `config.len` values uniformly from `[min, max]`.
///
/// The config is assumed valid; an inverted range yields values pinned to `min`.
pub fn random_sequence<R: Rng + ?Sized>(config: &SequenceConfig, rng: &mut R) -> Vec<u32> {
    let max = config.max.max(config.min);
    (0..config.len)
        .map(|_| rng.gen_range(config.min..=max))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn default_shape() {
        let config = SequenceConfig::default();
        assert_eq!(config.len, 20);
        assert_eq!((config.min, config.max), (5, 95));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn values_stay_in_bounds() {
        let mut rng = StdRng::seed_from_u64(42);
        let config = SequenceConfig::default();
        for _ in 0..50 {
            let seq = random_sequence(&config, &mut rng);
            assert_eq!(seq.len(), 20);
            assert!(seq.iter().all(|&v| (5..=95).contains(&v)));
        }
    }

    #[test]
    fn seeded_generation_is_reproducible() {
        let config = SequenceConfig::default();
        let a = random_sequence(&config, &mut StdRng::seed_from_u64(7));
        let b = random_sequence(&config, &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn rejects_empty_or_inverted() {
        let empty = SequenceConfig { len: 0, ..Default::default() };
        assert!(matches!(empty.validate(), Err(Error::InvalidSequenceConfig(_))));

        let inverted = SequenceConfig { min: 10, max: 3, ..Default::default() };
        assert!(matches!(inverted.validate(), Err(Error::InvalidSequenceConfig(_))));
    }

    #[test]
    fn degenerate_range_is_constant() {
        let config = SequenceConfig { len: 5, min: 9, max: 9 };
        let seq = random_sequence(&config, &mut StdRng::seed_from_u64(1));
        assert_eq!(seq, vec![9; 5]);
    }
}
