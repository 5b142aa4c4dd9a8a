//! Corpus view: indexed read-only access to a token-id sequence and its
//! sentence boundaries (spec §3, §4.1).

use crate::error::Error;
use crate::token::TokenId;
use serde::{Deserialize, Serialize};

/// Read-only view over a tokenized corpus.
///
/// Implementations own (or borrow, via a lifetime on the concrete type) the
/// token sequence; the trait only exposes the small capability set the
/// extractor and the enumerator need, so that an in-memory corpus and a
/// memory-mapped one can be swapped without paying a dispatch cost in the
/// inner loops (each call site is generic over `C: CorpusView`, not a trait
/// object).
///
/// All positions are absolute corpus positions in `0..length()`. Passing an
/// out-of-range position is a programming error and panics, per spec §4.1.
pub trait CorpusView {
    /// Total number of tokens in the corpus.
    fn length(&self) -> usize;

    /// The token id at `pos`.
    fn token(&self, pos: usize) -> TokenId;

    /// The sentence number containing `pos`.
    fn sentence_of(&self, pos: usize) -> usize;

    /// The first position of sentence `s`. `sentence_start(num_sentences())`
    /// is `length()` (an exclusive upper bound), so that
    /// `sentence_start(s + 1)` is always defined for a valid `s`.
    fn sentence_start(&self, s: usize) -> usize;

    /// Number of sentences in the corpus.
    fn num_sentences(&self) -> usize;

    /// The token-id sequence `T[start..end)`.
    fn phrase_tokens(&self, start: usize, end: usize) -> &[TokenId];
}

/// A corpus held fully in memory: the token sequence plus a sentence-start
/// table, built once and immutable for the life of the extractor (spec §3
/// Lifecycle).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InMemoryCorpus {
    tokens: Vec<TokenId>,
    /// `sentence_starts[s]` is the first position of sentence `s`.
    /// `sentence_starts` has `num_sentences() + 1` entries; the last entry
    /// is `tokens.len()`.
    sentence_starts: Vec<usize>,
}

impl InMemoryCorpus {
    /// Build a corpus from a flat token sequence in which every occurrence
    /// of `TokenId::EOS` terminates a sentence (the token itself is kept in
    /// the corpus, as the last token of its sentence, matching how an
    /// end-of-sentence marker is commonly carried through an SMT pipeline).
    ///
    /// Returns `Error::Corpus` if the corpus does not end with an EOS
    /// marker (the sentence table would otherwise have no defined end for
    /// its final sentence).
    pub fn from_tokens(tokens: Vec<TokenId>) -> Result<Self, Error> {
        if tokens.is_empty() {
            return Ok(InMemoryCorpus {
                tokens,
                sentence_starts: vec![0],
            });
        }
        if !tokens.last().unwrap().is_eos() {
            return Err(Error::Corpus(
                "corpus must end with an end-of-sentence token".to_string(),
            ));
        }
        let mut sentence_starts = vec![0];
        for (i, &tok) in tokens.iter().enumerate() {
            if tok.is_eos() {
                sentence_starts.push(i + 1);
            }
        }
        Ok(InMemoryCorpus {
            tokens,
            sentence_starts,
        })
    }

    /// Build a corpus directly from pre-computed sentence boundaries,
    /// without requiring an EOS sentinel in the token stream itself. Used
    /// by `tests/testutil` to build scenario corpora concisely.
    pub fn from_sentences(sentences: &[Vec<TokenId>]) -> Self {
        let mut tokens = Vec::new();
        let mut sentence_starts = vec![0];
        for sentence in sentences {
            tokens.extend_from_slice(sentence);
            sentence_starts.push(tokens.len());
        }
        InMemoryCorpus {
            tokens,
            sentence_starts,
        }
    }
}

impl CorpusView for InMemoryCorpus {
    fn length(&self) -> usize {
        self.tokens.len()
    }

    fn token(&self, pos: usize) -> TokenId {
        self.tokens[pos]
    }

    fn sentence_of(&self, pos: usize) -> usize {
        // sentence_starts is strictly increasing; find the last start <= pos.
        match self.sentence_starts.binary_search(&pos) {
            Ok(s) => s,
            Err(s) => s - 1,
        }
    }

    fn sentence_start(&self, s: usize) -> usize {
        self.sentence_starts[s]
    }

    fn num_sentences(&self) -> usize {
        self.sentence_starts.len() - 1
    }

    fn phrase_tokens(&self, start: usize, end: usize) -> &[TokenId] {
        &self.tokens[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tid(v: u32) -> TokenId {
        TokenId(v)
    }

    #[test]
    fn test_from_sentences_boundaries() {
        let corpus = InMemoryCorpus::from_sentences(&[
            vec![tid(1), tid(2), tid(1)],
            vec![tid(3), tid(1)],
        ]);
        assert_eq!(corpus.length(), 5);
        assert_eq!(corpus.num_sentences(), 2);
        assert_eq!(corpus.sentence_start(0), 0);
        assert_eq!(corpus.sentence_start(1), 3);
        assert_eq!(corpus.sentence_start(2), 5);
        for pos in 0..3 {
            assert_eq!(corpus.sentence_of(pos), 0);
        }
        for pos in 3..5 {
            assert_eq!(corpus.sentence_of(pos), 1);
        }
    }

    #[test]
    fn test_from_tokens_requires_trailing_eos() {
        let err = InMemoryCorpus::from_tokens(vec![tid(1), tid(2)]).unwrap_err();
        assert!(matches!(err, Error::Corpus(_)));
    }

    #[test]
    fn test_from_tokens_multi_sentence() {
        let corpus = InMemoryCorpus::from_tokens(vec![
            tid(1),
            tid(2),
            TokenId::EOS,
            tid(3),
            TokenId::EOS,
        ])
        .unwrap();
        assert_eq!(corpus.num_sentences(), 2);
        assert_eq!(corpus.sentence_start(0), 0);
        assert_eq!(corpus.sentence_start(1), 3);
        assert_eq!(corpus.sentence_start(2), 5);
    }

    #[test]
    fn test_empty_corpus() {
        let corpus = InMemoryCorpus::from_tokens(vec![]).unwrap();
        assert_eq!(corpus.length(), 0);
        assert_eq!(corpus.num_sentences(), 0);
    }
}
