//! Error types shared across the crate.
//!
//! Every failure carries a stable numeric code, grouped by the layer that
//! raised it:
//!
//! - `1xx`: document-level tokenizer failures (syntax, resource limits)
//! - `2xx`: schema-level decode failures (bad hex in strict fields,
//!   truncated documents)
//! - `3xx`: verification failures (pairing mismatch, script rejection,
//!   missing engine)
//!
//! The codes are part of the tool's contract and must not be renumbered.

use crate::verify::ScriptError;

/// Any failure produced while decoding or verifying a transaction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The document is not well-formed JSON.
    #[error("malformed JSON at byte {0}")]
    Syntax(usize),

    /// The document exceeds the configured input-size limit.
    #[error("document is {0} bytes, limit is {1}")]
    InputTooLarge(usize, usize),

    /// Containers nest deeper than the configured bound.
    #[error("nesting deeper than {0} levels")]
    DepthLimit(usize),

    /// A `txid` field is not 64 hex characters.
    #[error("txid is not 64 hex characters")]
    BadTxid,

    /// A `prevout.scriptpubkey` field is not valid hex.
    #[error("invalid hex in prevout scriptpubkey")]
    BadPrevoutScript,

    /// A witness item is not valid hex.
    #[error("invalid hex in witness item")]
    BadWitnessItem,

    /// The document closed while a recognized field was still awaiting
    /// its value.
    #[error("document ended while a transaction field was still pending")]
    TrailingField,

    /// The decoded transaction does not pair one spent output per input.
    #[error("transaction has {inputs} inputs but {spent} spent outputs")]
    SpentOutputCount {
        /// Number of decoded inputs.
        inputs: usize,
        /// Number of decoded spent outputs.
        spent: usize,
    },

    /// Script verification rejected an input.
    #[error("script verification failed on input {input}: {reason}")]
    Script {
        /// Index of the first failing input.
        input: usize,
        /// Engine classification of the failure.
        reason: ScriptError,
    },

    /// The binary was built without a script engine.
    #[error("no script engine compiled in (build with the `consensus` feature)")]
    EngineUnavailable,
}

impl Error {
    /// Stable numeric code for this error.
    pub fn code(&self) -> u32 {
        match self {
            Error::Syntax(_) => 100,
            Error::InputTooLarge(_, _) => 101,
            Error::DepthLimit(_) => 102,
            Error::BadTxid => 200,
            Error::BadPrevoutScript => 201,
            Error::BadWitnessItem => 202,
            Error::TrailingField => 203,
            Error::SpentOutputCount { .. } => 300,
            Error::Script { .. } => 301,
            Error::EngineUnavailable => 302,
        }
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_grouped_by_layer() {
        assert_eq!(Error::Syntax(0).code(), 100);
        assert_eq!(Error::BadTxid.code(), 200);
        assert_eq!(
            Error::Script {
                input: 0,
                reason: ScriptError::Invalid,
            }
            .code(),
            301
        );
    }

    #[test]
    fn test_display_includes_context() {
        let err = Error::SpentOutputCount {
            inputs: 2,
            spent: 1,
        };
        assert_eq!(
            err.to_string(),
            "transaction has 2 inputs but 1 spent outputs"
        );
        assert_eq!(Error::Syntax(17).to_string(), "malformed JSON at byte 17");
    }
}
