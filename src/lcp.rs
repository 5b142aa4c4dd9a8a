//! LCP table construction (spec §3 "LCP array", §4.3).

use crate::corpus::CorpusView;
use crate::suffix_array::{SuffixArrayView, MAX_CMP};

/// The longest-common-prefix array of a suffix array.
///
/// `L[i]` (`1 <= i < N`) is the length of the longest common prefix of the
/// suffixes at `SA[i-1]` and `SA[i]`, clamped to [`MAX_CMP`]. `L[0]` and
/// `L[N]` are sentinel zeros.
#[derive(Debug, Clone)]
pub struct LcpTable {
    l: Vec<usize>,
}

impl LcpTable {
    /// Build the LCP table for `corpus` and `sa`.
    ///
    /// For each `i` in `1..N`, compares `T[SA[i] + k]` and `T[SA[i-1] + k]`
    /// for increasing `k`, stopping when tokens differ, either suffix is
    /// exhausted, or `k` reaches [`MAX_CMP`]. `L[0] = L[N] = 0`.
    pub fn build<C: CorpusView, S: SuffixArrayView>(corpus: &C, sa: &S) -> Self {
        let n = sa.size();
        let mut l = vec![0usize; n + 1];
        for i in 1..n {
            let p0 = sa.sa(i - 1);
            let p1 = sa.sa(i);
            let mut k = 0;
            while k < MAX_CMP
                && p0 + k < corpus.length()
                && p1 + k < corpus.length()
                && corpus.token(p0 + k) == corpus.token(p1 + k)
            {
                k += 1;
            }
            l[i] = k;
        }
        LcpTable { l }
    }

    /// `L[i]`, treating out-of-range sentinel positions (`i == 0`,
    /// `i == N`) as `0`.
    pub fn get(&self, i: usize) -> usize {
        self.l[i]
    }

    /// Number of entries (`N + 1`).
    pub fn len(&self) -> usize {
        self.l.len()
    }

    pub fn is_empty(&self) -> bool {
        self.l.len() <= 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::InMemoryCorpus;
    use crate::suffix_array::InMemorySuffixArray;
    use crate::token::TokenId;

    fn tid(v: u32) -> TokenId {
        TokenId(v)
    }

    #[test]
    fn test_abracadabra_like() {
        // a b a b a  (scenario A from spec §8)
        let corpus = InMemoryCorpus::from_sentences(&[vec![tid(1), tid(2), tid(1), tid(2), tid(1)]]);
        let sa_raw = crate::suffix_array::construct::build_suffix_array(&corpus);
        let sa = InMemorySuffixArray::new(sa_raw).unwrap();
        let lcp = LcpTable::build(&corpus, &sa);
        assert_eq!(lcp.get(0), 0);
        assert_eq!(lcp.get(lcp.len() - 1), 0);
        // every interior value must be a true common-prefix length, and a
        // valid lcp array distributes its suffixes so sa order is sorted.
        for i in 1..sa.size() {
            let p0 = sa.sa(i - 1);
            let p1 = sa.sa(i);
            let expected = corpus
                .phrase_tokens(p0, corpus.length())
                .iter()
                .zip(corpus.phrase_tokens(p1, corpus.length()))
                .take_while(|(a, b)| a == b)
                .count();
            assert_eq!(lcp.get(i), expected.min(crate::suffix_array::MAX_CMP));
        }
    }

    #[test]
    fn test_empty_corpus() {
        let corpus = InMemoryCorpus::from_tokens(vec![]).unwrap();
        let sa = InMemorySuffixArray::new(vec![]).unwrap();
        let lcp = LcpTable::build(&corpus, &sa);
        assert_eq!(lcp.len(), 1);
        assert_eq!(lcp.get(0), 0);
    }
}
