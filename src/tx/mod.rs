//! Transaction model and the streaming decoder that fills it.
//!
//! [`types`] holds the plain-data transaction record, [`builder`] is the
//! single write path into it, and [`decode`] drives the builder from
//! tokenizer events.

pub mod builder;
pub mod decode;
pub mod types;

pub use builder::TxBuilder;
pub use decode::{decode_tx, decode_tx_with_limits, TxDecoder};
pub use types::{SpentOutputs, Transaction, TxIn, TxOut, Txid};
