//! Incremental construction of a transaction and its spent outputs.

use crate::tx::types::{SpentOutputs, Transaction, TxIn, TxOut};

/// The only write path into a [`Transaction`] under construction.
///
/// The builder owns the pairing invariant: [`TxBuilder::begin_input`]
/// appends an input and its spent output together, and nothing else
/// changes either list's length, so `spent_outputs.len()` always equals
/// `inputs.len()`.
///
/// Field mutators address the most recently appended element and return
/// `None` before the first `begin_*` call, so a stray scalar in a
/// malformed document writes nowhere instead of everywhere.
#[derive(Debug, Default)]
pub struct TxBuilder {
    tx: Transaction,
    spent_outputs: SpentOutputs,
}

impl TxBuilder {
    /// Start with an empty transaction.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the transaction version.
    pub fn set_version(&mut self, version: u32) {
        self.tx.version = version;
    }

    /// Set the transaction lock time.
    pub fn set_lock_time(&mut self, lock_time: u32) {
        self.tx.lock_time = lock_time;
    }

    /// Append a fresh input together with its paired spent output.
    pub fn begin_input(&mut self) {
        self.tx.inputs.push(TxIn::default());
        self.spent_outputs.push(TxOut::default());
    }

    /// Append a fresh output.
    pub fn begin_output(&mut self) {
        self.tx.outputs.push(TxOut::default());
    }

    /// The input currently being filled, if any.
    pub fn input_mut(&mut self) -> Option<&mut TxIn> {
        self.tx.inputs.last_mut()
    }

    /// The spent output paired with the current input, if any.
    pub fn spent_output_mut(&mut self) -> Option<&mut TxOut> {
        self.spent_outputs.last_mut()
    }

    /// The output currently being filled, if any.
    pub fn output_mut(&mut self) -> Option<&mut TxOut> {
        self.tx.outputs.last_mut()
    }

    /// Hand over the finished transaction and its spent outputs.
    pub fn finish(self) -> (Transaction, SpentOutputs) {
        (self.tx, self.spent_outputs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inputs_and_spent_outputs_stay_paired() {
        let mut builder = TxBuilder::new();
        for _ in 0..3 {
            builder.begin_input();
        }
        builder.begin_output();
        let (tx, spent) = builder.finish();
        assert_eq!(tx.inputs.len(), 3);
        assert_eq!(spent.len(), 3);
        assert_eq!(tx.outputs.len(), 1);
    }

    #[test]
    fn test_mutators_target_the_last_element() {
        let mut builder = TxBuilder::new();
        builder.begin_input();
        if let Some(input) = builder.input_mut() {
            input.sequence = 1;
        }
        builder.begin_input();
        if let Some(input) = builder.input_mut() {
            input.sequence = 2;
        }
        if let Some(spent) = builder.spent_output_mut() {
            spent.value = 50_000;
        }
        let (tx, spent) = builder.finish();
        assert_eq!(tx.inputs[0].sequence, 1);
        assert_eq!(tx.inputs[1].sequence, 2);
        assert_eq!(spent[0].value, 0);
        assert_eq!(spent[1].value, 50_000);
    }

    #[test]
    fn test_mutators_are_none_before_first_append() {
        let mut builder = TxBuilder::new();
        assert!(builder.input_mut().is_none());
        assert!(builder.spent_output_mut().is_none());
        assert!(builder.output_mut().is_none());
    }
}
