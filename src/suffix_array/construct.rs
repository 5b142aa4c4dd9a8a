//! On-the-fly suffix array construction, for the CLI's single-path mode
//! (spec §6), which builds a corpus, suffix array, and LCP table from plain
//! text rather than receiving them pre-built.
//!
//! Implemented as a prefix-doubling rank sort: after `k` rounds each
//! suffix's rank distinguishes it from every other suffix by its first
//! `2^k` tokens, so after `O(log N)` rounds the ranks give the full
//! ordering. This trades the linear-time guarantee of SA-IS (sketched, but
//! left unfinished and depending on an unavailable crate, in the teacher's
//! own `src/sais.rs`) for an implementation that is straightforward to get
//! right.

use crate::corpus::CorpusView;
use crate::token::TokenId;

/// Build a suffix array for `corpus` by prefix-doubling rank sort.
///
/// Returns the permutation `SA` such that the suffixes `T[SA[i]..N)` are
/// lexicographically non-decreasing in `i` (spec §3).
pub fn build_suffix_array<C: CorpusView>(corpus: &C) -> Vec<usize> {
    let n = corpus.length();
    if n == 0 {
        return Vec::new();
    }

    let mut sa: Vec<usize> = (0..n).collect();
    let mut rank: Vec<i64> = (0..n).map(|i| corpus.token(i).0 as i64).collect();
    let mut tmp = vec![0i64; n];

    let mut k = 1usize;
    loop {
        let rank_at = |i: usize| -> i64 {
            if i < n {
                rank[i]
            } else {
                -1
            }
        };
        sa.sort_unstable_by(|&a, &b| {
            (rank[a], rank_at(a + k)).cmp(&(rank[b], rank_at(b + k)))
        });

        tmp[sa[0]] = 0;
        for i in 1..n {
            let prev = sa[i - 1];
            let cur = sa[i];
            let same = rank[prev] == rank[cur] && rank_at(prev + k) == rank_at(cur + k);
            tmp[cur] = tmp[prev] + if same { 0 } else { 1 };
        }
        rank.copy_from_slice(&tmp);

        if rank[sa[n - 1]] as usize == n - 1 {
            break;
        }
        k *= 2;
    }

    sa
}

/// Build the token-id vocabulary-agnostic helper token sequence used by
/// tests: tokenizes `text` on ASCII whitespace, mapping each distinct word
/// to a `TokenId` by first occurrence (ids start at 1; `0` is reserved for
/// `TokenId::EOS`), and appends an EOS token at the end of every line.
pub fn tokenize_lines(text: &str) -> (Vec<TokenId>, rustc_hash::FxHashMap<String, TokenId>) {
    use rustc_hash::FxHashMap;

    let mut vocab: FxHashMap<String, TokenId> = FxHashMap::default();
    let mut tokens = Vec::new();
    let mut next_id = 1u32;

    for line in text.lines() {
        for word in line.split_whitespace() {
            let id = *vocab.entry(word.to_string()).or_insert_with(|| {
                let id = TokenId(next_id);
                next_id += 1;
                id
            });
            tokens.push(id);
        }
        tokens.push(TokenId::EOS);
    }

    (tokens, vocab)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::InMemoryCorpus;

    fn naive_sa<C: CorpusView>(corpus: &C) -> Vec<usize> {
        let n = corpus.length();
        let mut sa: Vec<usize> = (0..n).collect();
        sa.sort_by(|&a, &b| {
            let sa_suffix = corpus.phrase_tokens(a, n);
            let sb_suffix = corpus.phrase_tokens(b, n);
            sa_suffix.cmp(sb_suffix)
        });
        sa
    }

    #[test]
    fn test_matches_naive_on_small_corpus() {
        let (tokens, _) = tokenize_lines("a b a b a\nc d c\n");
        let corpus = InMemoryCorpus::from_tokens(tokens).unwrap();
        let sa = build_suffix_array(&corpus);
        assert_eq!(sa, naive_sa(&corpus));
    }

    #[test]
    fn test_empty_corpus() {
        let corpus = InMemoryCorpus::from_tokens(vec![]).unwrap();
        assert_eq!(build_suffix_array(&corpus), Vec::<usize>::new());
    }

    #[test]
    fn test_single_token_repeated() {
        let tokens: Vec<TokenId> = std::iter::repeat(TokenId(5))
            .take(9)
            .chain(std::iter::once(TokenId::EOS))
            .collect();
        let corpus = InMemoryCorpus::from_tokens(tokens).unwrap();
        let sa = build_suffix_array(&corpus);
        assert_eq!(sa, naive_sa(&corpus));
    }

    #[test]
    fn test_tokenize_lines_reserves_eos() {
        let (tokens, vocab) = tokenize_lines("a b\na\n");
        assert!(!vocab.contains_key(""));
        assert_eq!(tokens.last(), Some(&TokenId::EOS));
        assert_eq!(tokens.iter().filter(|t| t.is_eos()).count(), 2);
    }
}
