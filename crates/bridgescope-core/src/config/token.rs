//! Token section of the server config and its validation.

use serde::{Deserialize, Serialize};

use super::types::ConfigError;

/// Which side of the bridge a token config describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenRole {
    Source,
    Destination,
}

impl std::fmt::Display for TokenRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Source => write!(f, "source"),
            Self::Destination => write!(f, "destination"),
        }
    }
}

/// One bridged token. Swap limits are in whole units (e.g. BTC), not in the
/// token's minor unit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct TokenConfig {
    pub block_chain: String,
    #[serde(rename = "NetID")]
    pub net_id: String,
    #[serde(rename = "ID", skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub name: String,
    pub symbol: String,
    pub decimals: Option<u8>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub dcrm_address: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub contract_address: String,
    pub confirmations: Option<u64>,
    pub maximum_swap: Option<f64>,
    pub minimum_swap: Option<f64>,
    pub swap_fee_rate: Option<f64>,
}

impl TokenConfig {
    /// Validate the token for the given side of the bridge.
    ///
    /// A source token is deposited to the DCRM address, so it needs one; a
    /// destination token is minted by a contract, so it needs the contract
    /// address.
    pub fn check(&self, role: TokenRole) -> Result<(), ConfigError> {
        let invalid = |message: &str| ConfigError::InvalidToken {
            role,
            message: message.to_string(),
        };

        if self.block_chain.is_empty() {
            return Err(invalid("token must config 'BlockChain'"));
        }
        if self.net_id.is_empty() {
            return Err(invalid("token must config 'NetID'"));
        }
        if self.decimals.is_none() {
            return Err(invalid("token must config 'Decimals'"));
        }
        if self.confirmations.is_none() {
            return Err(invalid("token must config 'Confirmations'"));
        }
        let Some(maximum) = self.maximum_swap else {
            return Err(invalid("token must config 'MaximumSwap'"));
        };
        let Some(minimum) = self.minimum_swap else {
            return Err(invalid("token must config 'MinimumSwap'"));
        };
        if minimum > maximum {
            return Err(invalid("wrong token config, MinimumSwap > MaximumSwap"));
        }
        let Some(fee_rate) = self.swap_fee_rate else {
            return Err(invalid("token must config 'SwapFeeRate'"));
        };
        if !(0.0..=1.0).contains(&fee_rate) {
            return Err(invalid("wrong token config, SwapFeeRate must be in [0, 1]"));
        }

        match role {
            TokenRole::Source if self.dcrm_address.is_empty() => {
                Err(invalid("token must config 'DcrmAddress'"))
            }
            TokenRole::Destination if self.contract_address.is_empty() => {
                Err(invalid("token must config 'ContractAddress'"))
            }
            _ => Ok(()),
        }
    }
}
