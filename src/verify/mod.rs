//! Script verification: engine boundary, cycle metering and the
//! per-input driver.
//!
//! The decoder hands over a transaction plus the outputs it spends; this
//! module checks, input by input, that each unlocking script satisfies
//! the locking script of the output it spends, and reports how many
//! cycles each check took.
//!
//! The engine itself sits behind [`ScriptVerifier`] so the driver and the
//! CLI do not care whether scripts are executed by libbitcoinconsensus
//! (the `consensus` feature) or by a test double.

mod driver;
mod meter;

#[cfg(feature = "consensus")]
mod consensus;

pub use driver::{verify_inputs, InputReport};
pub use meter::{CycleMeter, WallClockMeter};

#[cfg(feature = "consensus")]
pub use consensus::ConsensusVerifier;

use crate::tx::{Transaction, TxOut};

/// Why an engine rejected an input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScriptError {
    /// The script executed and evaluated to false, or violated a script
    /// rule.
    #[error("script evaluated to false or violated a script rule")]
    Invalid,

    /// The engine considered the input index out of range.
    #[error("input index {0} out of range for the engine")]
    InputIndex(usize),

    /// The engine required the spent amount and did not get it.
    #[error("spent amount required but not provided")]
    AmountRequired,

    /// Any other engine-reported failure.
    #[error("engine failure: {0}")]
    Engine(String),
}

/// A script-execution engine.
///
/// `verify_input` checks that input `input` of `tx` correctly spends
/// `spent`, the output it claims to consume. Implementations must be
/// deterministic: the driver's stop-at-first-failure contract is only
/// meaningful if re-running yields the same verdicts.
pub trait ScriptVerifier {
    /// Verify a single input against the output it spends.
    fn verify_input(
        &self,
        tx: &Transaction,
        input: usize,
        spent: &TxOut,
    ) -> std::result::Result<(), ScriptError>;
}
