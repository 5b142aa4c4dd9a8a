//! Error types returned by this crate.

/// An error that can occur while building or running the extraction
/// pipeline.
#[derive(Debug)]
pub enum Error {
    /// The suffix array is not a permutation of `0..N`, or otherwise
    /// inconsistent with the corpus it is supposed to index.
    SuffixArray(String),
    /// The sentence index is inconsistent (non-monotonic starts, a position
    /// with no sentence assignment, or a phrase that would straddle a
    /// sentence boundary without the caller's knowledge).
    Corpus(String),
    /// A token id read from a corpus or vocabulary file falls outside the
    /// vocabulary's range.
    Vocabulary(String),
    /// A configured parameter violates the constraints in spec §6/§7.
    Configuration(String),
    /// Failure to read or write a corpus/vocabulary/suffix-array file.
    Io(std::io::Error),
    /// Failure to decode a binary file produced by this crate.
    Decode(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::SuffixArray(msg) => write!(f, "corrupt suffix array: {}", msg),
            Error::Corpus(msg) => write!(f, "corrupt corpus: {}", msg),
            Error::Vocabulary(msg) => write!(f, "vocabulary error: {}", msg),
            Error::Configuration(msg) => write!(f, "invalid configuration: {}", msg),
            Error::Io(err) => write!(f, "I/O error: {}", err),
            Error::Decode(msg) => write!(f, "failed to decode binary file: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<bincode::Error> for Error {
    fn from(err: bincode::Error) -> Self {
        Error::Decode(err.to_string())
    }
}
