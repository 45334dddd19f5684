//! Error types for the RotorCrypt library.

use thiserror::Error;

/// Errors produced by the RotorCrypt library.
///
/// Only engine construction can fail. Ciphering is total over every
/// character sequence.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RotorCryptError {
    /// The start position is not a usable number (non-numeric text,
    /// an out-of-range integer literal, NaN or an infinity).
    #[error("The start position of the cipher machine must be expressed as a number, got {input:?}")]
    InvalidSeed {
        /// The rejected input, as the caller supplied it.
        input: String,
    },
}

impl RotorCryptError {
    pub(crate) fn invalid_seed(input: impl Into<String>) -> Self {
        RotorCryptError::InvalidSeed {
            input: input.into(),
        }
    }
}
