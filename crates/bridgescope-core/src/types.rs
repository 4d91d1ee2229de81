//! Domain types for bridgescope's transaction snapshots.
//!
//! Contains the authored transaction handed over by the signing layer
//! (`AuthoredTransaction`) and the display projections built from it
//! (`EncodedAuthoredTx`, `EncodedTx`, `EncodedInput`, `EncodedOutput`).

use bitcoin::{Transaction, TxOut};
use serde::Serialize;

use crate::amount::MinorAmount;
use crate::json::HexBytes;

// ==============================================================================
// Authored Transaction
// ==============================================================================

/// `change_index` value meaning the transaction has no change output.
pub const NO_CHANGE_INDEX: i32 = -1;

/// A constructed, possibly unsigned or partially signed transaction plus the
/// bookkeeping its builder produced.
///
/// Inputs carry no value of their own, so the values of the spent outputs
/// travel alongside in `prev_input_values`. That list is expected to line up
/// with `tx.input` index for index, but nothing enforces it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthoredTransaction {
    pub tx: Option<Transaction>,
    pub prev_input_values: Vec<MinorAmount>,
    pub total_input: MinorAmount,
    /// Index of the change output, or [`NO_CHANGE_INDEX`].
    pub change_index: i32,
}

impl AuthoredTransaction {
    pub fn new(tx: Transaction, prev_input_values: Vec<MinorAmount>, change_index: i32) -> Self {
        let total_input = MinorAmount(
            prev_input_values
                .iter()
                .fold(0i64, |acc, value| acc.saturating_add(value.0)),
        );
        Self {
            tx: Some(tx),
            prev_input_values,
            total_input,
            change_index,
        }
    }

    pub fn has_change(&self) -> bool {
        self.change_index >= 0
    }

    /// The change output, if `change_index` points at an existing output.
    pub fn change_output(&self) -> Option<&TxOut> {
        let index = usize::try_from(self.change_index).ok()?;
        self.tx.as_ref()?.output.get(index)
    }

    /// Value of the output spent by input `index`, or zero when the
    /// previous-value list is too short.
    pub fn prev_input_value(&self, index: usize) -> MinorAmount {
        self.prev_input_values
            .get(index)
            .copied()
            .unwrap_or_default()
    }
}

// ==============================================================================
// Encoded Projections
// ==============================================================================

/// Display projection of an [`AuthoredTransaction`]. `tx` is omitted from
/// the JSON when the authored transaction has none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EncodedAuthoredTx {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tx: Option<EncodedTx>,
    pub total_input_value: MinorAmount,
    pub change_index: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EncodedTx {
    pub txid: String,
    pub version: i32,
    pub locktime: u32,
    pub outputs: Vec<EncodedOutput>,
    pub inputs: Vec<EncodedInput>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EncodedOutput {
    pub value: MinorAmount,
    /// Disassembled locking script.
    pub script: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EncodedOutPoint {
    pub hash: String,
    pub index: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EncodedInput {
    pub previous_out_point: EncodedOutPoint,
    /// Disassembled unlocking script.
    pub signature_script: String,
    pub witness: Vec<HexBytes>,
    pub sequence: u32,
    /// Value of the spent output, taken from the authored transaction's
    /// previous-value list.
    pub value: MinorAmount,
}
