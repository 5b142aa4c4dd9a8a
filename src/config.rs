//! Engine configuration (spec §6 "Configuration struct", §7 "Configuration
//! error").

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::suffix_array::MAX_CMP;

/// The maximum number of frequent phrases a [`Rank`](crate::frequent_phrases::Rank)
/// can address (spec §3 "Rank... ranks fit in 16 bits; maxPhrases <= 32767").
pub const MAX_PHRASES_LIMIT: u32 = 32_767;

/// Recognized configuration options (spec §6).
///
/// Constructed via [`EngineConfig::new`] (validating) or
/// [`EngineConfigBuilder`] (panics on programmer-error combinations, mirrors
/// the teacher's `SearchIndexBuilder`).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EngineConfig {
    pub min_frequency: u64,
    pub max_phrases: u32,
    pub max_phrase_length: usize,
    pub window_size: usize,
    pub min_nonterminal_span: usize,
}

impl EngineConfig {
    /// Build and validate a configuration.
    ///
    /// `min_frequency == 0` is clamped to `1` (spec §9 Open Question:
    /// "frequencies below 1 are meaningless"). Every other field is
    /// validated and a configuration error is returned rather than
    /// silently corrected, per spec §7's "Configuration error: fatal,
    /// abort before starting the sweep".
    pub fn new(
        min_frequency: u64,
        max_phrases: u32,
        max_phrase_length: usize,
        window_size: usize,
        min_nonterminal_span: usize,
    ) -> Result<Self, Error> {
        if max_phrases == 0 {
            return Err(Error::Configuration(
                "max_phrases must be at least 1".to_string(),
            ));
        }
        if max_phrases > MAX_PHRASES_LIMIT {
            return Err(Error::Configuration(format!(
                "max_phrases must be at most {} to fit a 16-bit rank",
                MAX_PHRASES_LIMIT
            )));
        }
        if max_phrase_length == 0 {
            return Err(Error::Configuration(
                "max_phrase_length must be at least 1".to_string(),
            ));
        }
        if max_phrase_length > MAX_CMP {
            return Err(Error::Configuration(format!(
                "max_phrase_length ({}) must not exceed MAX_CMP ({})",
                max_phrase_length, MAX_CMP
            )));
        }
        if window_size == 0 {
            return Err(Error::Configuration(
                "window_size must be at least 1".to_string(),
            ));
        }
        if min_nonterminal_span == 0 {
            return Err(Error::Configuration(
                "min_nonterminal_span must be at least 1".to_string(),
            ));
        }
        Ok(EngineConfig {
            min_frequency: min_frequency.max(1),
            max_phrases,
            max_phrase_length,
            window_size,
            min_nonterminal_span,
        })
    }
}

/// Default parameters from spec §6: `minFrequency = 0` (clamped to 1),
/// `maxPhrases = 100`, `maxPhraseLength = 10`, `windowSize = 10`,
/// `minNonterminalSpan = 2`.
impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig::new(0, 100, 10, 10, 2).expect("default configuration is always valid")
    }
}

/// A builder mirroring the teacher's `SearchIndexBuilder`: fields that
/// represent a clearly invalid combination at the call site panic rather
/// than returning a `Result`, matching the teacher's own stance that those
/// are programmer errors, not runtime configuration errors.
pub struct EngineConfigBuilder {
    min_frequency: u64,
    max_phrases: u32,
    max_phrase_length: usize,
    window_size: usize,
    min_nonterminal_span: usize,
}

impl Default for EngineConfigBuilder {
    fn default() -> Self {
        let defaults = EngineConfig::default();
        EngineConfigBuilder {
            min_frequency: defaults.min_frequency,
            max_phrases: defaults.max_phrases,
            max_phrase_length: defaults.max_phrase_length,
            window_size: defaults.window_size,
            min_nonterminal_span: defaults.min_nonterminal_span,
        }
    }
}

impl EngineConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn min_frequency(mut self, value: u64) -> Self {
        self.min_frequency = value;
        self
    }

    pub fn max_phrases(mut self, value: u32) -> Self {
        self.max_phrases = value;
        self
    }

    pub fn max_phrase_length(mut self, value: usize) -> Self {
        self.max_phrase_length = value;
        self
    }

    pub fn window_size(mut self, value: usize) -> Self {
        self.window_size = value;
        self
    }

    pub fn min_nonterminal_span(mut self, value: usize) -> Self {
        self.min_nonterminal_span = value;
        self
    }

    /// Validate and build. Returns a [`Error::Configuration`] for any
    /// externally-sourced value that violates spec §6's constraints.
    pub fn build(self) -> Result<EngineConfig, Error> {
        EngineConfig::new(
            self.min_frequency,
            self.max_phrases,
            self.max_phrase_length,
            self.window_size,
            self.min_nonterminal_span,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_frequency_zero_clamped_to_one() {
        let config = EngineConfig::new(0, 10, 5, 5, 2).unwrap();
        assert_eq!(config.min_frequency, 1);
    }

    #[test]
    fn test_max_phrase_length_over_max_cmp_rejected() {
        let err = EngineConfig::new(1, 10, MAX_CMP + 1, 5, 2).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn test_max_phrases_zero_rejected() {
        let err = EngineConfig::new(1, 0, 5, 5, 2).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn test_max_phrases_over_limit_rejected() {
        let err = EngineConfig::new(1, MAX_PHRASES_LIMIT + 1, 5, 5, 2).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn test_builder_defaults_match_spec() {
        let config = EngineConfigBuilder::new().build().unwrap();
        assert_eq!(config.max_phrases, 100);
        assert_eq!(config.max_phrase_length, 10);
        assert_eq!(config.window_size, 10);
        assert_eq!(config.min_nonterminal_span, 2);
    }
}
