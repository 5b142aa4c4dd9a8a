//! Frequent-phrase extraction: the LCP-interval stack walk (Yamamoto &
//! Church's `print_LDIs_stack`) paired with a bounded top-N frequency heap
//! (spec §4.4).

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use log::debug;

use crate::config::EngineConfig;
use crate::corpus::CorpusView;
use crate::frequent_phrases::FrequentPhrases;
use crate::lcp::LcpTable;
use crate::phrase::{Phrase, PhraseKey};
use crate::suffix_array::SuffixArrayView;

/// One entry in the bounded top-N heap.
///
/// `seq` is a monotonically increasing insertion sequence number used to
/// break frequency ties deterministically (spec §4.4 "Top-N maintenance").
struct HeapEntry {
    freq: u64,
    seq: u64,
    phrase: PhraseKey,
}

/// Orders entries so that `BinaryHeap::pop` returns the one that should be
/// evicted first: the lowest frequency, and among equal frequencies, the
/// one inserted later (higher `seq`) — "higher sequence numbers lose ties
/// on eviction".
impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .freq
            .cmp(&self.freq)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}
impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Eq for HeapEntry {}
impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.freq == other.freq && self.seq == other.seq
    }
}

struct TopNHeap {
    heap: BinaryHeap<HeapEntry>,
    capacity: usize,
    next_seq: u64,
}

impl TopNHeap {
    fn new(capacity: usize) -> Self {
        TopNHeap {
            heap: BinaryHeap::new(),
            capacity,
            next_seq: 0,
        }
    }

    fn insert(&mut self, phrase: PhraseKey, freq: u64) {
        let entry = HeapEntry {
            freq,
            seq: self.next_seq,
            phrase,
        };
        self.next_seq += 1;
        self.heap.push(entry);
        if self.heap.len() > self.capacity {
            self.heap.pop();
        }
    }

    /// Drain into a frequency-descending, insertion-order-tie-broken list.
    fn into_sorted_vec(self) -> Vec<(PhraseKey, u64)> {
        let mut entries: Vec<HeapEntry> = self.heap.into_vec();
        entries.sort_by(|a, b| b.freq.cmp(&a.freq).then_with(|| a.seq.cmp(&b.seq)));
        entries.into_iter().map(|e| (e.phrase, e.freq)).collect()
    }
}

/// Run the LCP-interval stack sweep over `corpus`/`sa`/`lcp` and extract the
/// top [`EngineConfig::max_phrases`] most frequent phrases (spec §4.4).
///
/// `sa` and `lcp` are assumed consistent with `corpus` (callers that build
/// them from untrusted sources should validate via
/// [`crate::suffix_array::InMemorySuffixArray::new`] first, per spec §7
/// "Input corruption").
pub fn extract_frequent_phrases<C: CorpusView, S: SuffixArrayView>(
    corpus: &C,
    sa: &S,
    lcp: &LcpTable,
    config: &EngineConfig,
) -> FrequentPhrases {
    let n = sa.size();
    if n == 0 {
        return FrequentPhrases::from_ordered(Vec::new());
    }

    let mut heap = TopNHeap::new(config.max_phrases as usize);

    // Two parallel stacks, both initialized with 0 (spec §4.4 "State").
    let mut start_idx: Vec<usize> = vec![0];
    let mut sil_idx: Vec<usize> = vec![0];

    for j in 0..n {
        // 1. Emit the trivial interval <j, j>.
        record_class(corpus, sa, lcp, j, j, 0, config, &mut heap);

        // 2. Pop and emit every interval closed off by the new boundary.
        while lcp.get(j + 1) < lcp.get(*sil_idx.last().unwrap()) {
            let i = start_idx.pop().unwrap();
            let k = sil_idx.pop().unwrap();
            record_class(corpus, sa, lcp, i, j, k, config, &mut heap);
        }

        // 3. Push the new frontier.
        start_idx.push(*sil_idx.last().unwrap());
        sil_idx.push(j + 1);
    }

    let ordered = heap.into_sorted_vec();
    debug!(
        "frequent-phrase sweep produced {} phrases (capacity {})",
        ordered.len(),
        config.max_phrases
    );
    FrequentPhrases::from_ordered(ordered)
}

/// The class recorder (spec §4.4 "Class recorder").
///
/// `i, j` delimit the SA interval; `k` is the `SIL` witness index (unused
/// for the trivial case `i == j`, where it is always passed as `0`).
fn record_class<C: CorpusView, S: SuffixArrayView>(
    corpus: &C,
    sa: &S,
    lcp: &LcpTable,
    i: usize,
    j: usize,
    k: usize,
    config: &EngineConfig,
    heap: &mut TopNHeap,
) {
    let lbl = lcp.get(i).max(lcp.get(j + 1));
    let start = sa.sa(i);
    let s = corpus.sentence_of(start);
    let end_of_sentence = corpus.sentence_start(s + 1);
    let max_len = config.max_phrase_length;

    if i == j {
        // Trivial interval: all prefixes of SA[i] longer than LBL are
        // unique to this single suffix and so occur exactly once. (The
        // Definitions in spec §4.4 give this bound as `LBL < m`; taken
        // together with the non-trivial case's symmetric `m = LBL + 1`
        // start, that is the consistent reading — see DESIGN.md.)
        if config.min_frequency <= 1 {
            let mut m = lbl + 1;
            while m <= max_len && start + m <= end_of_sentence {
                emit(corpus, start, m, 1, heap);
                m += 1;
            }
        }
        return;
    }

    let sil = lcp.get(k);
    if lbl >= sil {
        // Not lcp-delimited: empty equivalence class.
        return;
    }
    let interval_size = (j - i + 1) as u64;
    if interval_size < config.min_frequency {
        // No per-m count can exceed the interval's own size, so this is a
        // safe fast path (spec §8 invariant 1: frequency is the in-sentence
        // occurrence count, always <= interval_size).
        return;
    }

    // The interval <i, j> groups every suffix sharing this m-length prefix,
    // including suffixes whose occurrence at length m would straddle its
    // own sentence boundary. `interval_size` alone overcounts those; the
    // true frequency of the recorded phrase is the number of suffixes in
    // the interval whose sentence has room for the full length m. `room`
    // is fixed per suffix and non-increasing in its effect as m grows, so
    // sorting once and tracking how many rooms are still >= m as m
    // increases gives the corrected count without rescanning the interval
    // for every m.
    let mut rooms: Vec<usize> = (i..=j)
        .map(|idx| {
            let pos = sa.sa(idx);
            let sent = corpus.sentence_of(pos);
            corpus.sentence_start(sent + 1) - pos
        })
        .collect();
    rooms.sort_unstable();

    let mut m = lbl + 1;
    while m <= max_len && m <= sil && start + m <= end_of_sentence {
        let freq = (rooms.len() - rooms.partition_point(|&room| room < m)) as u64;
        if freq >= config.min_frequency {
            emit(corpus, start, m, freq, heap);
        }
        m += 1;
    }
}

fn emit<C: CorpusView>(corpus: &C, start: usize, m: usize, freq: u64, heap: &mut TopNHeap) {
    let tokens = corpus.phrase_tokens(start, start + m);
    let phrase = Phrase::new(tokens, start).to_key();
    heap.insert(phrase, freq);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::corpus::InMemoryCorpus;
    use crate::suffix_array::{construct::build_suffix_array, InMemorySuffixArray};
    use crate::token::TokenId;

    fn tid(v: u32) -> TokenId {
        TokenId(v)
    }

    fn build(
        sentences: &[Vec<TokenId>],
    ) -> (InMemoryCorpus, InMemorySuffixArray, LcpTable) {
        let corpus = InMemoryCorpus::from_sentences(sentences);
        let sa_raw = build_suffix_array(&corpus);
        let sa = InMemorySuffixArray::new(sa_raw).unwrap();
        let lcp = LcpTable::build(&corpus, &sa);
        (corpus, sa, lcp)
    }

    fn key(tokens: &[u32]) -> PhraseKey {
        PhraseKey {
            tokens: tokens.iter().map(|&v| TokenId(v)).collect(),
        }
    }

    /// Scenario A (spec §8): corpus = [a b a b a], one sentence.
    #[test]
    fn test_scenario_a() {
        let (corpus, sa, lcp) = build(&[vec![tid(1), tid(2), tid(1), tid(2), tid(1)]]);
        let config = EngineConfig::new(2, 5, 2, 10, 2).unwrap();
        let fp = extract_frequent_phrases(&corpus, &sa, &lcp, &config);

        let mut freqs: Vec<(PhraseKey, u64)> = fp.iter().map(|(k, v)| (k.clone(), v)).collect();
        freqs.sort_by(|a, b| a.0.tokens.cmp(&b.0.tokens));
        let mut expected = vec![
            (key(&[1]), 3),
            (key(&[2]), 2),
            (key(&[1, 2]), 2),
            (key(&[2, 1]), 2),
        ];
        expected.sort_by(|a, b| a.0.tokens.cmp(&b.0.tokens));
        assert_eq!(freqs, expected);
    }

    /// Scenario B (spec §8): corpus = [a b c] [a b c], two sentences.
    #[test]
    fn test_scenario_b_no_cross_sentence_phrases() {
        let (corpus, sa, lcp) = build(&[
            vec![tid(1), tid(2), tid(3)],
            vec![tid(1), tid(2), tid(3)],
        ]);
        let config = EngineConfig::new(2, 100, 3, 10, 2).unwrap();
        let fp = extract_frequent_phrases(&corpus, &sa, &lcp, &config);

        let mut freqs: Vec<(PhraseKey, u64)> = fp.iter().map(|(k, v)| (k.clone(), v)).collect();
        freqs.sort_by(|a, b| a.0.tokens.cmp(&b.0.tokens));
        let mut expected = vec![
            (key(&[1]), 2),
            (key(&[2]), 2),
            (key(&[3]), 2),
            (key(&[1, 2]), 2),
            (key(&[2, 3]), 2),
            (key(&[1, 2, 3]), 2),
        ];
        expected.sort_by(|a, b| a.0.tokens.cmp(&b.0.tokens));
        assert_eq!(freqs, expected);

        // No phrase may straddle the sentence boundary.
        assert!(fp.frequency(&key(&[3, 1])).is_none());
        assert!(fp.frequency(&key(&[3, 1, 2])).is_none());
    }

    /// Scenario D: empty corpus.
    #[test]
    fn test_scenario_d_empty_corpus() {
        let corpus = InMemoryCorpus::from_tokens(vec![]).unwrap();
        let sa = InMemorySuffixArray::new(vec![]).unwrap();
        let lcp = LcpTable::build(&corpus, &sa);
        let config = EngineConfig::new(1, 100, 10, 10, 2).unwrap();
        let fp = extract_frequent_phrases(&corpus, &sa, &lcp, &config);
        assert!(fp.is_empty());
    }

    /// Property 9: a single sentence of one token repeated N times, with
    /// maxPhraseLength = 1, yields one frequent phrase with frequency N.
    #[test]
    fn test_single_token_repeated() {
        let (corpus, sa, lcp) = build(&[vec![tid(7); 9]]);
        let config = EngineConfig::new(1, 100, 1, 10, 2).unwrap();
        let fp = extract_frequent_phrases(&corpus, &sa, &lcp, &config);
        assert_eq!(fp.len(), 1);
        assert_eq!(fp.frequency(&key(&[7])), Some(9));
    }

    /// Property 3: size bound and per-phrase frequency/length bounds.
    #[test]
    fn test_bounds_respected() {
        let (corpus, sa, lcp) = build(&[vec![tid(1), tid(2), tid(1), tid(2), tid(1)]]);
        let config = EngineConfig::new(1, 2, 2, 10, 2).unwrap();
        let fp = extract_frequent_phrases(&corpus, &sa, &lcp, &config);
        assert!(fp.len() <= 2);
        for (phrase, freq) in fp.iter() {
            assert!(phrase.len() >= 1 && phrase.len() <= 2);
            assert!(freq >= 1);
        }
    }

    /// Property 6: idempotence.
    #[test]
    fn test_idempotent() {
        let (corpus, sa, lcp) = build(&[vec![tid(1), tid(2), tid(1), tid(2), tid(1)]]);
        let config = EngineConfig::new(2, 5, 2, 10, 2).unwrap();
        let fp1 = extract_frequent_phrases(&corpus, &sa, &lcp, &config);
        let fp2 = extract_frequent_phrases(&corpus, &sa, &lcp, &config);
        let v1: Vec<_> = fp1.iter().map(|(k, v)| (k.clone(), v)).collect();
        let v2: Vec<_> = fp2.iter().map(|(k, v)| (k.clone(), v)).collect();
        assert_eq!(v1, v2);
    }

    /// Property 7: maxPhrases == number of distinct in-sentence substrings
    /// up to maxPhraseLength yields every such substring.
    #[test]
    fn test_round_trip_all_substrings() {
        let (corpus, sa, lcp) = build(&[vec![tid(1), tid(2), tid(3)]]);
        let max_len = 3;
        let mut distinct = std::collections::HashSet::new();
        for start in 0..3 {
            for end in (start + 1)..=3.min(start + max_len) {
                distinct.insert(corpus.phrase_tokens(start, end).to_vec());
            }
        }
        let config = EngineConfig::new(1, distinct.len() as u32, max_len, 10, 2).unwrap();
        let fp = extract_frequent_phrases(&corpus, &sa, &lcp, &config);
        assert_eq!(fp.len(), distinct.len());
        for tokens in &distinct {
            assert!(fp.frequency(&PhraseKey {
                tokens: tokens.clone()
            })
            .is_some());
        }
    }

    /// Property 1: a sentence-straddling occurrence of a phrase must not
    /// inflate its recorded frequency. `[2, 1]` occurs within sentence 0
    /// (`2 1 3`) and again straddling the boundary between sentence 1
    /// (`5 2`) and sentence 2 (`1 9`); only the former counts.
    #[test]
    fn test_frequency_excludes_sentence_straddling_occurrences() {
        let (corpus, sa, lcp) = build(&[
            vec![tid(2), tid(1), tid(3)],
            vec![tid(5), tid(2)],
            vec![tid(1), tid(9)],
        ]);
        let config = EngineConfig::new(1, 100, 2, 10, 2).unwrap();
        let fp = extract_frequent_phrases(&corpus, &sa, &lcp, &config);
        assert_eq!(fp.frequency(&key(&[2, 1])), Some(1));
    }
}
