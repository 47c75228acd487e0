//! Plain-data transaction records.
//!
//! These mirror the Esplora/mempool REST shape of a transaction: scripts
//! are byte vectors (hex in serialized form), the txid is display-order
//! hex, and each input's spent output lives in a separate, positionally
//! paired list rather than inside the input itself.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};

/// A transaction id: 32 bytes in internal (little-endian) order.
///
/// Hex text, as found in API documents and block explorers, is the
/// byte-reversed display order; [`Txid::from_hex`] and [`Txid::to_hex`]
/// perform the reversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Txid(pub [u8; 32]);

impl Txid {
    /// The all-zero id, used for coinbase previous outputs.
    pub const fn zero() -> Self {
        Self([0u8; 32])
    }

    /// Parse display-order hex (64 hex characters) into internal order.
    pub fn from_hex(raw: &[u8]) -> Result<Self> {
        if raw.len() != 64 {
            return Err(Error::BadTxid);
        }
        let decoded = hex::decode(raw).map_err(|_| Error::BadTxid)?;
        let mut bytes = [0u8; 32];
        for (slot, byte) in bytes.iter_mut().zip(decoded.iter().rev()) {
            *slot = *byte;
        }
        Ok(Self(bytes))
    }

    /// Render as display-order hex.
    pub fn to_hex(&self) -> String {
        let mut reversed = self.0;
        reversed.reverse();
        hex::encode(reversed)
    }

    /// Internal-order bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl Serialize for Txid {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Txid {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Txid::from_hex(s.as_bytes()).map_err(serde::de::Error::custom)
    }
}

/// One transaction input.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TxIn {
    /// Id of the transaction whose output this input spends.
    pub txid: Txid,
    /// Index of the spent output within that transaction.
    pub vout: u32,
    /// Unlocking script.
    #[serde(rename = "scriptsig", with = "hex_bytes")]
    pub script_sig: Vec<u8>,
    /// Input sequence number.
    pub sequence: u32,
    /// Witness stack, outermost item last.
    #[serde(default, with = "hex_witness")]
    pub witness: Vec<Vec<u8>>,
}

/// One transaction output, also used for the spent-output side of an
/// input.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TxOut {
    /// Amount in satoshis.
    pub value: u64,
    /// Locking script.
    #[serde(rename = "scriptpubkey", with = "hex_bytes")]
    pub script_pubkey: Vec<u8>,
}

/// A decoded transaction.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Transaction {
    /// Transaction version.
    pub version: u32,
    /// Lock time (height or timestamp, raw consensus encoding).
    #[serde(rename = "locktime")]
    pub lock_time: u32,
    /// Inputs in document order.
    #[serde(rename = "vin")]
    pub inputs: Vec<TxIn>,
    /// Outputs in document order.
    #[serde(rename = "vout")]
    pub outputs: Vec<TxOut>,
}

/// The outputs being spent, one per input, index-aligned with
/// [`Transaction::inputs`].
pub type SpentOutputs = Vec<TxOut>;

/// Serialize byte vectors as hex strings.
pub(crate) mod hex_bytes {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        bytes: &[u8],
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        hex::decode(&s).map_err(serde::de::Error::custom)
    }
}

/// Serialize a witness stack as a sequence of hex strings.
pub(crate) mod hex_witness {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        items: &[Vec<u8>],
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(items.iter().map(hex::encode))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Vec<Vec<u8>>, D::Error> {
        let items = Vec::<String>::deserialize(deserializer)?;
        items
            .into_iter()
            .map(|s| hex::decode(&s).map_err(serde::de::Error::custom))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_txid_hex_is_byte_reversed() {
        let mut hex = String::new();
        for i in 0..32 {
            hex.push_str(&format!("{:02x}", i));
        }
        // "000102...1f" read back: last hex pair becomes byte 0.
        let txid = Txid::from_hex(hex.as_bytes()).unwrap();
        assert_eq!(txid.0[0], 0x1f);
        assert_eq!(txid.0[31], 0x00);
        assert_eq!(txid.to_hex(), hex);
    }

    #[test]
    fn test_txid_rejects_bad_hex() {
        assert_eq!(Txid::from_hex(b""), Err(Error::BadTxid));
        assert_eq!(Txid::from_hex(&[b'g'; 64]), Err(Error::BadTxid));
        assert_eq!(Txid::from_hex(&[b'0'; 63]), Err(Error::BadTxid));
        assert_eq!(Txid::from_hex(&[b'0'; 65]), Err(Error::BadTxid));
    }

    #[test]
    fn test_txid_accepts_mixed_case() {
        let upper = Txid::from_hex("AB".repeat(32).as_bytes()).unwrap();
        let lower = Txid::from_hex("ab".repeat(32).as_bytes()).unwrap();
        assert_eq!(upper, lower);
    }

    #[test]
    fn test_txin_serde_round_trip() {
        let input = TxIn {
            txid: Txid::from_hex("11".repeat(32).as_bytes()).unwrap(),
            vout: 1,
            script_sig: vec![0x51],
            sequence: 0xffff_fffd,
            witness: vec![vec![0xaa, 0xbb], vec![]],
        };
        let json = serde_json::to_string(&input).unwrap();
        assert!(json.contains("\"scriptsig\":\"51\""));
        assert!(json.contains("\"witness\":[\"aabb\",\"\"]"));
        let back: TxIn = serde_json::from_str(&json).unwrap();
        assert_eq!(back, input);
    }

    #[test]
    fn test_txin_witness_defaults_to_empty() {
        let json = r#"{"txid":"00000000000000000000000000000000000000000000000000000000000000ff","vout":0,"scriptsig":"","sequence":0}"#;
        let input: TxIn = serde_json::from_str(json).unwrap();
        assert!(input.witness.is_empty());
        assert_eq!(input.txid.0[0], 0xff);
    }
}
