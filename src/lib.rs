//! Scriptmeter - streaming decoder and script-verification meter for
//! Bitcoin transactions in the mempool REST API format.
//!
//! A transaction document is decoded in a single pass, without building a
//! JSON tree, into a [`Transaction`] plus the list of outputs it spends.
//! Each input is then handed to a script engine and the cycles spent on
//! it are reported.
//!
//! # Architecture
//!
//! - [`json`] - push tokenizer with resource limits
//! - [`tx`] - transaction records, builder and the schema state machine
//! - [`verify`] - engine boundary, cycle metering, per-input driver
//! - [`error`] - coded errors shared by all layers
//!
//! # Example
//!
//! ```
//! use scriptmeter::decode_tx;
//!
//! let doc = br#"{"version":2,"locktime":0,"vin":[],"vout":[]}"#;
//! let (tx, spent_outputs) = decode_tx(doc).unwrap();
//! assert_eq!(tx.version, 2);
//! assert_eq!(spent_outputs.len(), tx.inputs.len());
//! ```

// Untrusted-input code must avoid unwrap/expect/panic in library code.
// Tests are checked separately with `cargo test`.
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(missing_docs)]

pub mod error;
pub mod json;
pub mod tx;
pub mod verify;

// Re-export commonly used types
pub use error::{Error, Result};
pub use tx::{decode_tx, decode_tx_with_limits, SpentOutputs, Transaction, TxIn, TxOut, Txid};
pub use verify::{
    verify_inputs, CycleMeter, InputReport, ScriptError, ScriptVerifier, WallClockMeter,
};

#[cfg(feature = "consensus")]
pub use verify::ConsensusVerifier;
