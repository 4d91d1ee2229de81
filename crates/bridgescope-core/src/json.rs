//! JSON text encoding for log and audit output.
//!
//! [`to_json`] keeps failures visible to callers that care; [`to_json_lossy`]
//! is the log-line adapter that never fails.

use bitcoin::hex::DisplayHex;
use serde::{Serialize, Serializer};

use crate::error::EncodeError;

/// Output layout for [`to_json`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JsonStyle {
    /// Single line, no inserted whitespace.
    #[default]
    Compact,
    /// Two-space indentation per nesting level.
    Pretty,
}

impl JsonStyle {
    pub fn from_pretty_flag(pretty: bool) -> Self {
        if pretty {
            Self::Pretty
        } else {
            Self::Compact
        }
    }
}

pub fn to_json<T: Serialize + ?Sized>(value: &T, style: JsonStyle) -> Result<String, EncodeError> {
    let text = match style {
        JsonStyle::Compact => serde_json::to_string(value)?,
        JsonStyle::Pretty => serde_json::to_string_pretty(value)?,
    };
    Ok(text)
}

/// Encode `value`, returning an empty string if serialization fails.
#[must_use]
pub fn to_json_lossy<T: Serialize + ?Sized>(value: &T, style: JsonStyle) -> String {
    to_json(value, style).unwrap_or_else(|err| {
        tracing::warn!(error = %err, "JSON encoding failed, emitting empty string");
        String::new()
    })
}

// ==============================================================================
// Hex Byte Strings
// ==============================================================================

/// Raw bytes that serialize as `0x`-prefixed lowercase hex.
///
/// The prefix keeps byte strings distinguishable from other text fields;
/// an empty byte string encodes as `"0x"`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HexBytes(pub Vec<u8>);

impl From<&[u8]> for HexBytes {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl std::fmt::Display for HexBytes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{:x}", self.0.as_hex())
    }
}

impl Serialize for HexBytes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
