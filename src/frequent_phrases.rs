//! `FrequentPhrases` and the rank map (spec §3 "FrequentPhrases", "Rank",
//! §4.5).

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;

use crate::phrase::PhraseKey;

/// A 16-bit compact identifier for a frequent phrase (spec §3 "Rank").
#[derive(Debug, Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Hash)]
pub struct Rank(pub u16);

/// Ordered mapping from phrase to frequency.
///
/// Iteration order is frequency-descending, ties broken by first-encountered
/// position in the LCP scan (spec §3). Built once by [`crate::extractor`]
/// and immutable afterwards.
#[derive(Debug, Clone, Default)]
pub struct FrequentPhrases {
    by_phrase: IndexMap<PhraseKey, u64>,
}

impl FrequentPhrases {
    /// Build from an already frequency-descending, tie-broken sequence of
    /// `(phrase, frequency)` pairs, as produced by draining and sorting the
    /// extractor's bounded heap.
    pub(crate) fn from_ordered(entries: Vec<(PhraseKey, u64)>) -> Self {
        let mut by_phrase = IndexMap::with_capacity(entries.len());
        for (phrase, freq) in entries {
            by_phrase.insert(phrase, freq);
        }
        FrequentPhrases { by_phrase }
    }

    pub fn len(&self) -> usize {
        self.by_phrase.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_phrase.is_empty()
    }

    pub fn frequency(&self, phrase: &PhraseKey) -> Option<u64> {
        self.by_phrase.get(phrase).copied()
    }

    pub fn contains(&self, phrase: &PhraseKey) -> bool {
        self.by_phrase.contains_key(phrase)
    }

    /// Iterate in frequency-descending, tie-broken order.
    pub fn iter(&self) -> impl Iterator<Item = (&PhraseKey, u64)> {
        self.by_phrase.iter().map(|(k, &v)| (k, v))
    }
}

/// Auxiliary phrase → rank mapping, sharing `FrequentPhrases`' key set and
/// preserving its iteration order (spec §4.5).
///
/// Keyed with `FxBuildHasher`: `rank()` is the collocation enumerator's
/// per-position, per-candidate-length membership test (spec §4.6 step 1),
/// a hot non-adversarial lookup rather than one fed attacker-controlled
/// keys.
#[derive(Debug, Clone, Default)]
pub struct RankMap {
    rank_of: IndexMap<PhraseKey, Rank, FxBuildHasher>,
}

impl RankMap {
    /// Build by iterating `frequent_phrases` and assigning `0, 1, 2, ...`.
    pub fn build(frequent_phrases: &FrequentPhrases) -> Self {
        let mut rank_of =
            IndexMap::with_capacity_and_hasher(frequent_phrases.len(), FxBuildHasher::default());
        for (i, (phrase, _freq)) in frequent_phrases.iter().enumerate() {
            rank_of.insert(phrase.clone(), Rank(i as u16));
        }
        RankMap { rank_of }
    }

    pub fn rank(&self, phrase: &PhraseKey) -> Option<Rank> {
        self.rank_of.get(phrase).copied()
    }

    pub fn len(&self) -> usize {
        self.rank_of.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rank_of.is_empty()
    }
}
