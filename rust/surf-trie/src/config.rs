use surf_bits::{WORD_BITS, rank::DEFAULT_RANK_BLOCK_SIZE};
use surf_common::{Result, error::Error};

/// Largest accepted rank block size, in bits.
const MAX_RANK_BLOCK_SIZE: usize = 65536;

/// Tuning knobs for building and loading a trie.
///
/// None of these values is part of the serialized form: the lookup tables they
/// describe are rebuilt from the stored bits whenever a trie is loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrieConfig {
    /// Block size, in bits, of the rank lookup tables over `hasChild` and `hasSuffix`.
    /// Smaller blocks trade memory for fewer popcounts per rank query.
    pub rank_block_size: usize,
}

impl Default for TrieConfig {
    fn default() -> Self {
        TrieConfig {
            rank_block_size: DEFAULT_RANK_BLOCK_SIZE,
        }
    }
}

impl TrieConfig {
    /// Creates a configuration with the given rank block size.
    ///
    /// The block size must be a non-zero multiple of 64 no larger than 65536.
    pub fn with_rank_block_size(rank_block_size: usize) -> Result<TrieConfig> {
        let config = TrieConfig { rank_block_size };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.rank_block_size == 0
            || self.rank_block_size % WORD_BITS != 0
            || self.rank_block_size > MAX_RANK_BLOCK_SIZE
        {
            return Err(Error::invalid_arg(
                "rank_block_size",
                format!(
                    "{} is not a non-zero multiple of {WORD_BITS} up to {MAX_RANK_BLOCK_SIZE}",
                    self.rank_block_size
                ),
            ));
        }
        Ok(())
    }
}
