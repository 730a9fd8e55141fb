use thiserror::Error;

/// Failure raised while validating or encoding a payload.
///
/// Every variant is terminal for the call that produced it: encoders never
/// return a partial pattern.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("{symbology}: unsupported character '{ch}' at position {position}")]
    InvalidCharacter {
        symbology: &'static str,
        ch: char,
        position: usize,
    },

    #[error("{symbology}: invalid length {actual} (expected {expected})")]
    InvalidLength {
        symbology: &'static str,
        expected: String,
        actual: usize,
    },

    #[error("{symbology}: check digit mismatch (expected '{expected}', found '{found}')")]
    ChecksumMismatch {
        symbology: &'static str,
        expected: String,
        found: String,
    },

    #[error("unsupported conversion: {0}")]
    UnsupportedConversion(String),

    #[error("configuration conflict: {0}")]
    ConfigurationConflict(String),

    #[error("run of {run} units at offset {offset} does not fit a single RLE digit")]
    RunTooLong { run: usize, offset: usize },

    #[error("malformed RLE string: {0}")]
    MalformedRle(String),
}

impl EncodeError {
    pub(crate) fn invalid_char(symbology: &'static str, ch: char, position: usize) -> Self {
        EncodeError::InvalidCharacter {
            symbology,
            ch,
            position,
        }
    }

    pub(crate) fn invalid_length<S: Into<String>>(
        symbology: &'static str,
        expected: S,
        actual: usize,
    ) -> Self {
        EncodeError::InvalidLength {
            symbology,
            expected: expected.into(),
            actual,
        }
    }

    pub(crate) fn mismatch<A: Into<String>, B: Into<String>>(
        symbology: &'static str,
        expected: A,
        found: B,
    ) -> Self {
        EncodeError::ChecksumMismatch {
            symbology,
            expected: expected.into(),
            found: found.into(),
        }
    }
}

pub type Result<T, E = EncodeError> = std::result::Result<T, E>;
