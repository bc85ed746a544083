use crate::error::{Result, SkipListError};

/// Default maximum node height. At p = 0.25 each level holds about a quarter
/// of the one below, so 19 levels keep search paths O(log n) up to roughly
/// 4^18 (about 6.9e10) entries.
pub const DEFAULT_MAX_LEVEL: usize = 18;

/// Largest maximum level accepted at construction
pub const MAX_LEVEL_LIMIT: usize = 64;

/// Construction-time configuration for a [`SkipList`](crate::SkipList)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkipListOptions {
    /// Highest level a node may be promoted to (levels are 0-indexed)
    pub max_level: usize,
    /// Seed for the level generator; `None` seeds from OS entropy
    pub seed: Option<u64>,
}

impl Default for SkipListOptions {
    fn default() -> Self {
        Self {
            max_level: DEFAULT_MAX_LEVEL,
            seed: None,
        }
    }
}

impl SkipListOptions {
    /// Create options with the given maximum level and an entropy-seeded generator
    pub fn new(max_level: usize) -> Self {
        Self {
            max_level,
            seed: None,
        }
    }

    pub fn with_max_level(mut self, max_level: usize) -> Self {
        self.max_level = max_level;
        self
    }

    /// Fix the level generator seed so node heights are reproducible
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.max_level == 0 || self.max_level > MAX_LEVEL_LIMIT {
            return Err(SkipListError::InvalidMaxLevel {
                max_level: self.max_level,
                limit: MAX_LEVEL_LIMIT,
            });
        }
        Ok(())
    }
}
