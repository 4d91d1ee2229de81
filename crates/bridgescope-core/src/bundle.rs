//! JSON interchange form of an authored transaction.
//!
//! A bundle carries the transaction as consensus-encoded hex next to the
//! bookkeeping fields, so it can be written to a file or passed over a text
//! channel and turned back into an [`AuthoredTransaction`]:
//!
//! ```json
//! { "tx": "0200…", "prevInputValues": [150000], "totalInputValue": 150000, "changeIndex": 1 }
//! ```

use bitcoin::absolute::LockTime;
use bitcoin::consensus::{encode, Decodable};
use bitcoin::hex::FromHex;
use bitcoin::transaction::Version;
use bitcoin::{Transaction, TxIn, TxOut};
use serde::{Deserialize, Serialize};

use crate::amount::MinorAmount;
use crate::error::EncodeError;
use crate::types::AuthoredTransaction;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AuthoredTxBundle {
    /// Consensus-encoded transaction hex; absent when nothing was built yet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tx: Option<String>,
    #[serde(default)]
    pub prev_input_values: Vec<MinorAmount>,
    pub total_input_value: MinorAmount,
    pub change_index: i32,
}

impl AuthoredTxBundle {
    pub fn from_authored(authored: &AuthoredTransaction) -> Self {
        Self {
            tx: authored.tx.as_ref().map(encode::serialize_hex),
            prev_input_values: authored.prev_input_values.clone(),
            total_input_value: authored.total_input,
            change_index: authored.change_index,
        }
    }

    /// Decode the transaction hex, if any, and assemble the authored
    /// transaction. Bookkeeping fields are taken as they are.
    pub fn into_authored(self) -> Result<AuthoredTransaction, EncodeError> {
        let tx = self.tx.as_deref().map(decode_tx_hex).transpose()?;
        Ok(AuthoredTransaction {
            tx,
            prev_input_values: self.prev_input_values,
            total_input: self.total_input_value,
            change_index: self.change_index,
        })
    }
}

/// Decode a consensus-encoded transaction from hex. Surrounding whitespace is
/// ignored; trailing bytes after the transaction are an error.
///
/// Bytes that fail to decode are retried as a legacy (non-witness)
/// transaction: with zero inputs the `00` input count is otherwise taken
/// for the segwit marker.
pub fn decode_tx_hex(hex: &str) -> Result<Transaction, EncodeError> {
    let bytes =
        Vec::<u8>::from_hex(hex.trim()).map_err(|e| EncodeError::InvalidTxHex(e.to_string()))?;
    encode::deserialize(&bytes).or_else(|err| {
        decode_legacy_tx(&bytes).map_err(|_| EncodeError::InvalidTxData(err.to_string()))
    })
}

fn decode_legacy_tx(mut bytes: &[u8]) -> Result<Transaction, encode::Error> {
    let version = Version::consensus_decode(&mut bytes)?;
    let input = Vec::<TxIn>::consensus_decode(&mut bytes)?;
    let output = Vec::<TxOut>::consensus_decode(&mut bytes)?;
    let lock_time = LockTime::consensus_decode(&mut bytes)?;
    if !bytes.is_empty() {
        return Err(encode::Error::ParseFailed("data not consumed entirely"));
    }

    tracing::debug!(outputs = output.len(), "decoded transaction in legacy form");
    Ok(Transaction {
        version,
        lock_time,
        input,
        output,
    })
}
