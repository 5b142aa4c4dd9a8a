//! A suffix array held fully in memory.

use super::SuffixArrayView;
use crate::error::Error;
use serde::{Deserialize, Serialize};

/// An owned, fully materialized suffix array.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InMemorySuffixArray {
    sa: Vec<usize>,
}

impl InMemorySuffixArray {
    /// Wrap a precomputed permutation of `0..sa.len()`.
    ///
    /// Returns `Error::SuffixArray` if `sa` is not such a permutation
    /// (spec §7 "Input corruption").
    pub fn new(sa: Vec<usize>) -> Result<Self, Error> {
        let n = sa.len();
        let mut seen = vec![false; n];
        for &pos in &sa {
            match seen.get_mut(pos) {
                Some(slot) if !*slot => *slot = true,
                _ => {
                    return Err(Error::SuffixArray(format!(
                        "entry {} is out of range or duplicated",
                        pos
                    )))
                }
            }
        }
        Ok(InMemorySuffixArray { sa })
    }

    /// Wrap a permutation without checking it is one. Only use this for
    /// arrays produced by this crate's own construction path.
    pub(crate) fn new_unchecked(sa: Vec<usize>) -> Self {
        InMemorySuffixArray { sa }
    }
}

impl SuffixArrayView for InMemorySuffixArray {
    fn sa(&self, i: usize) -> usize {
        self.sa[i]
    }

    fn size(&self) -> usize {
        self.sa.len()
    }
}
