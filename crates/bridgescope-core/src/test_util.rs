//! Shared test helpers for `bridgescope-core` unit tests.
//!
//! Builders for small `bitcoin` transactions so snapshot, bundle and type
//! tests share a single source of truth for dummy data.

use bitcoin::absolute::LockTime;
use bitcoin::hashes::Hash;
use bitcoin::transaction::Version;
use bitcoin::{Amount, OutPoint, ScriptBuf, Sequence, Transaction, TxIn, TxOut, Txid, Witness};

/// Create a deterministic `Txid` from a single distinguishing byte.
pub fn txid_from_byte(b: u8) -> Txid {
    let mut bytes = [0u8; 32];
    bytes[0] = b;
    Txid::from_byte_array(bytes)
}

/// Minimal valid P2WPKH scriptPubKey: OP_0 PUSH20 <20-byte-hash>.
pub fn p2wpkh_script() -> ScriptBuf {
    let script_bytes = [
        0x00, 0x14, // OP_0, PUSH20
        0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e, 0x0f,
        0x10, 0x11, 0x12, 0x13, 0x14,
    ];
    ScriptBuf::from_bytes(script_bytes.to_vec())
}

pub fn p2wpkh_output(sats: u64) -> TxOut {
    TxOut {
        value: Amount::from_sat(sats),
        script_pubkey: p2wpkh_script(),
    }
}

/// An unsigned input spending output `vout` of a txid derived from `vout`.
pub fn spending_input(vout: u32) -> TxIn {
    TxIn {
        previous_output: OutPoint::new(txid_from_byte(vout as u8 + 1), vout),
        script_sig: ScriptBuf::new(),
        sequence: Sequence::MAX,
        witness: Witness::new(),
    }
}

pub fn make_tx(input: Vec<TxIn>, output: Vec<TxOut>) -> Transaction {
    Transaction {
        version: Version::TWO,
        lock_time: LockTime::ZERO,
        input,
        output,
    }
}
