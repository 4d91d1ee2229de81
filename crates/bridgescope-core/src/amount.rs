//! Minor-unit amounts and their display-unit rendering.

use bitcoin::Amount;
use serde::{Deserialize, Serialize};

// ==============================================================================
// Minor-Unit Amount
// ==============================================================================

/// A signed amount in the asset's smallest unit (satoshis for BTC).
///
/// `#[serde(transparent)]` keeps the JSON representation a bare integer, so
/// this newtype is wire-compatible with plain `i64`. Values pass through
/// unchanged; the display unit is chosen by the caller through
/// [`MinorAmount::to_unit_string`].
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct MinorAmount(pub i64);

impl MinorAmount {
    pub const ZERO: Self = Self(0);

    /// Read an output value as the signed 64-bit integer it is on the wire.
    ///
    /// Consensus encoding stores output values as eight little-endian bytes
    /// and `bitcoin::Amount` reads them unsigned; reinterpreting the bits keeps
    /// values above `i64::MAX` visible as the negative numbers they encode.
    #[must_use]
    pub const fn from_wire_sats(sats: u64) -> Self {
        Self(i64::from_le_bytes(sats.to_le_bytes()))
    }

    /// Render the amount in whole units of an asset with `decimals` digits of
    /// precision, e.g. `150000` with 8 decimals is `0.0015`.
    ///
    /// Trailing fractional zeros are trimmed. Works on the decimal digits of
    /// the magnitude, so neither `i64::MIN` nor a large `decimals` overflows.
    #[must_use]
    pub fn to_unit_string(self, decimals: u8) -> String {
        let digits = self.0.unsigned_abs().to_string();
        let sign = if self.0 < 0 { "-" } else { "" };
        let decimals = usize::from(decimals);
        if decimals == 0 {
            return format!("{sign}{digits}");
        }

        // Left-pad so there is always at least one integer digit.
        let padded = format!("{digits:0>width$}", width = decimals + 1);
        let (whole, fraction) = padded.split_at(padded.len() - decimals);
        let fraction = fraction.trim_end_matches('0');

        if fraction.is_empty() {
            format!("{sign}{whole}")
        } else {
            format!("{sign}{whole}.{fraction}")
        }
    }
}

impl From<i64> for MinorAmount {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<MinorAmount> for i64 {
    fn from(amount: MinorAmount) -> Self {
        amount.0
    }
}

impl From<Amount> for MinorAmount {
    fn from(amount: Amount) -> Self {
        Self::from_wire_sats(amount.to_sat())
    }
}

impl std::fmt::Display for MinorAmount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
