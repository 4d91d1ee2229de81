//! Snapshot builder: projects authored transactions into their display form.
//!
//! The caller's value is classified once into [`TxSnapshot::Known`] or
//! [`TxSnapshot::Opaque`]. Known values are walked output by output and input
//! by input, preserving positions; opaque values are encoded as they are.
//! No field-level failure aborts a projection: undecodable scripts become
//! empty strings.

use bitcoin::{Transaction, TxIn, TxOut};
use serde::Serialize;

use crate::amount::MinorAmount;
use crate::bundle::AuthoredTxBundle;
use crate::error::EncodeError;
use crate::json::{to_json, to_json_lossy, HexBytes, JsonStyle};
use crate::script::disasm_string;
use crate::types::{
    AuthoredTransaction, EncodedAuthoredTx, EncodedInput, EncodedOutPoint, EncodedOutput,
    EncodedTx,
};

// ==============================================================================
// Snapshot Variant
// ==============================================================================

/// A value headed for the audit log, classified at the boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum TxSnapshot<T = serde_json::Value> {
    /// An authored transaction, projected field by field.
    Known(AuthoredTransaction),
    /// Anything else; encoded verbatim.
    Opaque(T),
}

impl TxSnapshot<serde_json::Value> {
    /// Classify an untyped JSON document. Documents that parse as an
    /// [`AuthoredTxBundle`] and decode cleanly are `Known`; everything else,
    /// including bundles with undecodable transaction hex, is `Opaque`.
    pub fn from_json_value(value: serde_json::Value) -> Self {
        let decoded = serde_json::from_value::<AuthoredTxBundle>(value.clone())
            .map_err(EncodeError::from)
            .and_then(AuthoredTxBundle::into_authored);

        match decoded {
            Ok(authored) => Self::Known(authored),
            Err(err) => {
                tracing::debug!(error = %err, "value is not an authored transaction bundle");
                Self::Opaque(value)
            }
        }
    }
}

impl<T: Serialize> TxSnapshot<T> {
    pub fn encode(&self, style: JsonStyle) -> Result<String, EncodeError> {
        match self {
            Self::Known(authored) => to_json(&encode_authored_tx(authored), style),
            Self::Opaque(value) => to_json(value, style),
        }
    }

    /// Best-effort [`TxSnapshot::encode`] for log lines: empty on failure.
    #[must_use]
    pub fn to_log_string(&self, style: JsonStyle) -> String {
        match self {
            Self::Known(authored) => to_json_lossy(&encode_authored_tx(authored), style),
            Self::Opaque(value) => to_json_lossy(value, style),
        }
    }
}

impl<T> From<AuthoredTransaction> for TxSnapshot<T> {
    fn from(authored: AuthoredTransaction) -> Self {
        Self::Known(authored)
    }
}

/// Encode an authored transaction straight to a log line.
#[must_use]
pub fn authored_tx_to_string(authored: &AuthoredTransaction, style: JsonStyle) -> String {
    to_json_lossy(&encode_authored_tx(authored), style)
}

// ==============================================================================
// Projection
// ==============================================================================

/// Build the display projection of `authored`.
///
/// Without a transaction only the bookkeeping fields are filled in.
#[must_use]
pub fn encode_authored_tx(authored: &AuthoredTransaction) -> EncodedAuthoredTx {
    EncodedAuthoredTx {
        tx: authored.tx.as_ref().map(|tx| encode_tx(tx, authored)),
        total_input_value: authored.total_input,
        change_index: authored.change_index,
    }
}

fn encode_tx(tx: &Transaction, authored: &AuthoredTransaction) -> EncodedTx {
    if authored.prev_input_values.len() != tx.input.len() {
        tracing::debug!(
            inputs = tx.input.len(),
            prev_input_values = authored.prev_input_values.len(),
            "previous input values do not line up with inputs"
        );
    }

    let outputs = tx
        .output
        .iter()
        .map(encode_output)
        .collect();

    let inputs = tx
        .input
        .iter()
        .enumerate()
        .map(|(index, input)| encode_input(input, authored.prev_input_value(index)))
        .collect();

    EncodedTx {
        txid: tx.compute_txid().to_string(),
        version: tx.version.0,
        locktime: tx.lock_time.to_consensus_u32(),
        outputs,
        inputs,
    }
}

fn encode_output(output: &TxOut) -> EncodedOutput {
    EncodedOutput {
        value: MinorAmount::from(output.value),
        script: disasm_string(&output.script_pubkey),
    }
}

fn encode_input(input: &TxIn, value: MinorAmount) -> EncodedInput {
    EncodedInput {
        previous_out_point: EncodedOutPoint {
            hash: input.previous_output.txid.to_string(),
            index: input.previous_output.vout,
        },
        signature_script: disasm_string(&input.script_sig),
        witness: input.witness.iter().map(HexBytes::from).collect(),
        sequence: input.sequence.0,
        value,
    }
}
