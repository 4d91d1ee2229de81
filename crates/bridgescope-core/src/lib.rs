pub mod amount;
pub mod bundle;
pub mod config;
pub mod error;
pub mod json;
pub mod script;
pub mod snapshot;
pub mod types;

#[cfg(test)]
pub(crate) mod test_util;

pub use amount::MinorAmount;
pub use error::EncodeError;
pub use json::JsonStyle;
pub use snapshot::TxSnapshot;
pub use types::AuthoredTransaction;
