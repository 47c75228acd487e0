//! The per-input verification loop.

use crate::error::{Error, Result};
use crate::tx::{Transaction, TxOut};
use crate::verify::{CycleMeter, ScriptVerifier};

/// Cycle cost of verifying one input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputReport {
    /// Input index within the transaction.
    pub input: usize,
    /// Cycles the engine spent on this input.
    pub cycles: u64,
}

/// Verify every input of `tx` in order, metering each one.
///
/// Inputs are checked front to back against their positionally paired
/// spent outputs. The first rejection stops the loop and surfaces as
/// [`Error::Script`] with the failing index; later inputs are never
/// handed to the engine. On success there is exactly one report per
/// input, in input order.
///
/// A `spent_outputs` list whose length does not match the input count is
/// rejected up front. The decoder never produces one, but this function
/// is a public entry point and the pairing is what gives input indexes
/// their meaning.
pub fn verify_inputs<V: ScriptVerifier, M: CycleMeter>(
    tx: &Transaction,
    spent_outputs: &[TxOut],
    verifier: &V,
    meter: &M,
) -> Result<Vec<InputReport>> {
    if spent_outputs.len() != tx.inputs.len() {
        return Err(Error::SpentOutputCount {
            inputs: tx.inputs.len(),
            spent: spent_outputs.len(),
        });
    }

    let mut reports = Vec::with_capacity(tx.inputs.len());
    for (input, spent) in spent_outputs.iter().enumerate() {
        let before = meter.current_cycles();
        verifier
            .verify_input(tx, input, spent)
            .map_err(|reason| Error::Script { input, reason })?;
        let after = meter.current_cycles();
        reports.push(InputReport {
            input,
            cycles: after.saturating_sub(before),
        });
    }
    Ok(reports)
}
