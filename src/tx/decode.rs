//! Streaming decoder for the mempool-API transaction format.
//!
//! [`TxDecoder`] is an [`EventSink`] that walks the fixed document schema
//! in a single pass, writing recognized fields through a [`TxBuilder`].
//! Instead of a path stack it keeps one flat state telling it where the
//! cursor sits in the schema, so every event is dispatched in constant
//! time and memory stays flat no matter how large the document is.
//!
//! Unknown keys and unexpected value shapes never fail the decode; they
//! simply do not advance the machine. Only four things are fatal: JSON
//! syntax errors, resource-limit violations, bad hex in a strict field
//! (`txid`, `prevout.scriptpubkey`, witness items), and a document that
//! ends while a recognized field still awaits its value.
//!
//! Numeric fields take the C `strtoll` reading of the lexeme: leading
//! sign, digits up to the first non-digit, wrapped to the field's width.
//! Out-of-range values therefore truncate instead of erroring, matching
//! how upstream consumers of this format behave.

use crate::error::{Error, Result};
use crate::json::{EventSink, Limits, Tokenizer};
use crate::tx::builder::TxBuilder;
use crate::tx::types::{SpentOutputs, Transaction, Txid};

/// Position of the cursor within the transaction schema.
///
/// Container states (`Idle`, `Vin`, `VinPrevout`, `VinWitness`, `Vout`)
/// are where key lookup happens; the rest are leaf states naming the
/// field whose value arrives next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DecodeState {
    /// Top level of the document.
    Idle,
    /// Awaiting the `version` number.
    Version,
    /// Awaiting the `locktime` number.
    LockTime,
    /// Inside the `vin` array or one of its input objects.
    Vin,
    /// Awaiting an input's `sequence` number.
    VinSequence,
    /// Awaiting an input's `txid` string.
    VinTxid,
    /// Awaiting an input's `vout` number.
    VinVout,
    /// Awaiting an input's `scriptsig` string.
    VinScriptSig,
    /// Inside an input's `prevout` object.
    VinPrevout,
    /// Awaiting the prevout's `scriptpubkey` string.
    VinPrevoutScriptPubkey,
    /// Awaiting the prevout's `value` number.
    VinPrevoutValue,
    /// Inside an input's `witness` array.
    VinWitness,
    /// Inside the `vout` array or one of its output objects.
    Vout,
    /// Awaiting an output's `scriptpubkey` string.
    VoutScriptPubkey,
    /// Awaiting an output's `value` number.
    VoutValue,
}

/// Event-driven decoder producing a [`Transaction`] and its
/// [`SpentOutputs`].
///
/// Feed it to a [`Tokenizer`], then call [`TxDecoder::finish`].
#[derive(Debug)]
pub struct TxDecoder {
    state: DecodeState,
    builder: TxBuilder,
}

impl TxDecoder {
    /// A decoder ready for the start of a document.
    pub fn new() -> Self {
        Self {
            state: DecodeState::Idle,
            builder: TxBuilder::new(),
        }
    }

    /// Close out the decode.
    ///
    /// Fails if the machine is not back at the top level, which happens
    /// when a recognized field never received the value shape it was
    /// waiting for.
    pub fn finish(self) -> Result<(Transaction, SpentOutputs)> {
        if self.state != DecodeState::Idle {
            return Err(Error::TrailingField);
        }
        Ok(self.builder.finish())
    }

    /// Key lookup: exact byte-for-byte match against the keys recognized
    /// in the current container state. Anything else leaves the state
    /// untouched.
    fn dispatch_key(&mut self, name: &[u8]) {
        self.state = match (self.state, name) {
            (DecodeState::Idle, b"version") => DecodeState::Version,
            (DecodeState::Idle, b"locktime") => DecodeState::LockTime,
            (DecodeState::Idle, b"vin") => DecodeState::Vin,
            (DecodeState::Idle, b"vout") => DecodeState::Vout,
            (DecodeState::Vin, b"sequence") => DecodeState::VinSequence,
            (DecodeState::Vin, b"txid") => DecodeState::VinTxid,
            (DecodeState::Vin, b"vout") => DecodeState::VinVout,
            (DecodeState::Vin, b"scriptsig") => DecodeState::VinScriptSig,
            (DecodeState::Vin, b"prevout") => DecodeState::VinPrevout,
            (DecodeState::Vin, b"witness") => DecodeState::VinWitness,
            (DecodeState::VinPrevout, b"scriptpubkey") => DecodeState::VinPrevoutScriptPubkey,
            (DecodeState::VinPrevout, b"value") => DecodeState::VinPrevoutValue,
            (DecodeState::Vout, b"scriptpubkey") => DecodeState::VoutScriptPubkey,
            (DecodeState::Vout, b"value") => DecodeState::VoutValue,
            (state, _) => state,
        };
    }
}

impl Default for TxDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for TxDecoder {
    fn object_start(&mut self) -> Result<()> {
        // Entering an element of `vin` appends the input and its paired
        // spent output; entering an element of `vout` appends an output.
        match self.state {
            DecodeState::Vin => self.builder.begin_input(),
            DecodeState::Vout => self.builder.begin_output(),
            _ => {}
        }
        Ok(())
    }

    fn object_end(&mut self) -> Result<()> {
        if self.state == DecodeState::VinPrevout {
            self.state = DecodeState::Vin;
        }
        Ok(())
    }

    fn array_start(&mut self) -> Result<()> {
        Ok(())
    }

    fn array_end(&mut self) -> Result<()> {
        match self.state {
            DecodeState::Vin | DecodeState::Vout => self.state = DecodeState::Idle,
            DecodeState::VinWitness => self.state = DecodeState::Vin,
            _ => {}
        }
        Ok(())
    }

    fn key(&mut self, raw: &[u8]) -> Result<()> {
        self.dispatch_key(raw);
        Ok(())
    }

    /// String values.
    ///
    /// Hex handling is deliberately asymmetric: `scriptsig` and output
    /// `scriptpubkey` tolerate bad hex and leave the script empty, while
    /// `txid`, `prevout.scriptpubkey` and witness items reject it. The
    /// tolerated fields are the ones the upstream API serves verbatim
    /// from user data; the strict ones feed verification directly.
    fn string(&mut self, raw: &[u8]) -> Result<()> {
        match self.state {
            DecodeState::VinTxid => {
                let txid = Txid::from_hex(raw)?;
                if let Some(input) = self.builder.input_mut() {
                    input.txid = txid;
                }
                self.state = DecodeState::Vin;
            }
            DecodeState::VinScriptSig => {
                if let Ok(bytes) = hex::decode(raw) {
                    if let Some(input) = self.builder.input_mut() {
                        input.script_sig = bytes;
                    }
                }
                self.state = DecodeState::Vin;
            }
            DecodeState::VinPrevoutScriptPubkey => {
                let bytes = hex::decode(raw).map_err(|_| Error::BadPrevoutScript)?;
                if let Some(spent) = self.builder.spent_output_mut() {
                    spent.script_pubkey = bytes;
                }
                self.state = DecodeState::VinPrevout;
            }
            DecodeState::VinWitness => {
                let bytes = hex::decode(raw).map_err(|_| Error::BadWitnessItem)?;
                if let Some(input) = self.builder.input_mut() {
                    input.witness.push(bytes);
                }
                // Stay put: further witness items may follow before the
                // array closes.
            }
            DecodeState::VoutScriptPubkey => {
                if let Ok(bytes) = hex::decode(raw) {
                    if let Some(output) = self.builder.output_mut() {
                        output.script_pubkey = bytes;
                    }
                }
                self.state = DecodeState::Vout;
            }
            _ => {}
        }
        Ok(())
    }

    fn number(&mut self, raw: &[u8]) -> Result<()> {
        match self.state {
            DecodeState::Version => {
                self.builder.set_version(parse_integer(raw) as u32);
                self.state = DecodeState::Idle;
            }
            DecodeState::LockTime => {
                self.builder.set_lock_time(parse_integer(raw) as u32);
                self.state = DecodeState::Idle;
            }
            DecodeState::VinSequence => {
                if let Some(input) = self.builder.input_mut() {
                    input.sequence = parse_integer(raw) as u32;
                }
                self.state = DecodeState::Vin;
            }
            DecodeState::VinVout => {
                if let Some(input) = self.builder.input_mut() {
                    input.vout = parse_integer(raw) as u32;
                }
                self.state = DecodeState::Vin;
            }
            DecodeState::VinPrevoutValue => {
                if let Some(spent) = self.builder.spent_output_mut() {
                    spent.value = parse_integer(raw);
                }
                self.state = DecodeState::VinPrevout;
            }
            DecodeState::VoutValue => {
                if let Some(output) = self.builder.output_mut() {
                    output.value = parse_integer(raw);
                }
                self.state = DecodeState::Vout;
            }
            _ => {}
        }
        Ok(())
    }
}

/// Decode one mempool-API transaction document with default limits.
pub fn decode_tx(input: &[u8]) -> Result<(Transaction, SpentOutputs)> {
    decode_tx_with_limits(input, Limits::consensus())
}

/// Decode one mempool-API transaction document with caller-chosen limits.
pub fn decode_tx_with_limits(input: &[u8], limits: Limits) -> Result<(Transaction, SpentOutputs)> {
    let mut tokenizer = Tokenizer::new(input, limits)?;
    let mut decoder = TxDecoder::new();
    tokenizer.run(&mut decoder)?;
    decoder.finish()
}

/// C `strtoll`-style read of a number lexeme: optional sign, then digits
/// up to the first non-digit, accumulated with wrapping arithmetic.
///
/// Callers narrow the result to the field's width with `as`, so an
/// out-of-range document value truncates rather than failing the decode.
fn parse_integer(raw: &[u8]) -> u64 {
    let (negative, digits) = match raw.first() {
        Some(b'-') => (true, &raw[1..]),
        _ => (false, raw),
    };
    let mut value: u64 = 0;
    for &b in digits {
        if !b.is_ascii_digit() {
            break;
        }
        value = value.wrapping_mul(10).wrapping_add(u64::from(b - b'0'));
    }
    if negative {
        value.wrapping_neg()
    } else {
        value
    }
}
