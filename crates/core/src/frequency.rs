//! Symbol frequency counting.

use crate::error::{Error, Result};

/// Occurrence counts for each byte value in an input.
///
/// Built once from the full input and immutable afterwards. Every symbol
/// present in the input has a count of at least 1; absent symbols have 0 and
/// are not reported by [`FrequencyModel::iter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyModel {
    counts: [u64; 256],
    total: u64,
}

impl FrequencyModel {
    /// Count every symbol of `symbols`.
    ///
    /// # Errors
    /// `Error::EmptyInput` if `symbols` is empty: no tree can be built for it.
    pub fn count(symbols: &[u8]) -> Result<Self> {
        if symbols.is_empty() {
            return Err(Error::EmptyInput);
        }

        let mut counts = [0u64; 256];
        for &symbol in symbols {
            counts[symbol as usize] += 1;
        }

        Ok(Self {
            counts,
            total: symbols.len() as u64,
        })
    }

    /// Occurrences of `symbol` (0 if absent).
    pub fn get(&self, symbol: u8) -> u64 {
        self.counts[symbol as usize]
    }

    /// Iterate `(symbol, count)` pairs for present symbols, ascending by symbol.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, &count)| count > 0)
            .map(|(symbol, &count)| (symbol as u8, count))
    }

    /// Number of distinct symbols.
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&count| count > 0).count()
    }

    /// Total number of symbols counted (the input length).
    pub fn total(&self) -> u64 {
        self.total
    }

    /// The only symbol present, if the input had exactly one distinct symbol.
    pub fn single_symbol(&self) -> Option<u8> {
        let mut present = self.iter();
        match (present.next(), present.next()) {
            (Some((symbol, _)), None) => Some(symbol),
            _ => None,
        }
    }
}
