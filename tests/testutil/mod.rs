use freqphrase::TokenId;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Build a random multi-sentence corpus: `n_sentences` sentences, each of
/// length uniform in `1..=max_sentence_len`, drawn from an alphabet of
/// `alphabet_size` distinct non-EOS token ids (`1..=alphabet_size`).
pub fn random_sentences(
    seed: u64,
    n_sentences: usize,
    max_sentence_len: usize,
    alphabet_size: u32,
) -> Vec<Vec<TokenId>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n_sentences)
        .map(|_| {
            let len = rng.gen_range(1..=max_sentence_len);
            (0..len)
                .map(|_| TokenId(rng.gen_range(1..=alphabet_size)))
                .collect()
        })
        .collect()
}

/// Brute-force substring frequency: count occurrences of `needle` among
/// all length-`needle.len()` windows that do not cross a sentence boundary.
pub fn brute_force_frequency(sentences: &[Vec<TokenId>], needle: &[TokenId]) -> u64 {
    let mut count = 0;
    for sentence in sentences {
        if needle.len() > sentence.len() {
            continue;
        }
        for start in 0..=(sentence.len() - needle.len()) {
            if &sentence[start..start + needle.len()] == needle {
                count += 1;
            }
        }
    }
    count
}
