//! Script engine backed by libbitcoinconsensus.

use bitcoin::hashes::Hash;

use crate::tx::{Transaction, TxOut};
use crate::verify::{ScriptError, ScriptVerifier};

/// [`ScriptVerifier`] that runs Bitcoin Core's script interpreter via the
/// `bitcoinconsensus` bindings.
#[derive(Debug, Clone, Copy)]
pub struct ConsensusVerifier {
    flags: u32,
}

impl ConsensusVerifier {
    /// Verify with every flag libbitcoinconsensus supports.
    pub fn new() -> Self {
        Self {
            flags: bitcoinconsensus::VERIFY_ALL,
        }
    }

    /// Verify with an explicit flag set.
    pub fn with_flags(flags: u32) -> Self {
        Self { flags }
    }
}

impl Default for ConsensusVerifier {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptVerifier for ConsensusVerifier {
    fn verify_input(
        &self,
        tx: &Transaction,
        input: usize,
        spent: &TxOut,
    ) -> std::result::Result<(), ScriptError> {
        let encoded = bitcoin::consensus::serialize(&to_consensus_tx(tx));
        bitcoinconsensus::verify_with_flags(
            &spent.script_pubkey,
            spent.value,
            &encoded,
            input,
            self.flags,
        )
        .map_err(|err| match err {
            bitcoinconsensus::Error::ERR_SCRIPT => ScriptError::Invalid,
            bitcoinconsensus::Error::ERR_TX_INDEX => ScriptError::InputIndex(input),
            bitcoinconsensus::Error::ERR_AMOUNT_REQUIRED => ScriptError::AmountRequired,
            other => ScriptError::Engine(format!("{other:?}")),
        })
    }
}

/// Rebuild the record as a `rust-bitcoin` transaction so the library can
/// produce the consensus encoding the engine expects.
fn to_consensus_tx(tx: &Transaction) -> bitcoin::Transaction {
    bitcoin::Transaction {
        version: tx.version as i32,
        lock_time: bitcoin::absolute::LockTime::from_consensus(tx.lock_time),
        input: tx
            .inputs
            .iter()
            .map(|input| bitcoin::TxIn {
                previous_output: bitcoin::OutPoint {
                    txid: bitcoin::Txid::from_byte_array(input.txid.0),
                    vout: input.vout,
                },
                script_sig: bitcoin::ScriptBuf::from_bytes(input.script_sig.clone()),
                sequence: bitcoin::Sequence(input.sequence),
                witness: bitcoin::Witness::from_slice(&input.witness),
            })
            .collect(),
        output: tx
            .outputs
            .iter()
            .map(|output| bitcoin::TxOut {
                value: output.value,
                script_pubkey: bitcoin::ScriptBuf::from_bytes(output.script_pubkey.clone()),
            })
            .collect(),
    }
}
