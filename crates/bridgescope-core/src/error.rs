#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("script disassembly failed: {0}")]
    Script(#[from] bitcoin::script::Error),

    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid transaction hex: {0}")]
    InvalidTxHex(String),

    #[error("invalid transaction data: {0}")]
    InvalidTxData(String),
}
