use thiserror::Error;

#[derive(Error, Debug)]
pub enum FundError {
    #[error("Encoding error: {0}")]
    Encoding(String),

    #[error("Transaction reverted: {reason}")]
    Revert { reason: String },

    #[error("Confirmation timeout: {0}")]
    ConfirmationTimeout(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl FundError {
    /// Shorthand for a missing builder field.
    pub(crate) fn missing(field: &str) -> Self {
        FundError::Encoding(format!("{field} required"))
    }

    pub fn is_revert(&self) -> bool {
        matches!(self, FundError::Revert { .. })
    }
}

impl From<alloy::sol_types::Error> for FundError {
    fn from(e: alloy::sol_types::Error) -> Self {
        FundError::Encoding(e.to_string())
    }
}

impl From<toml::de::Error> for FundError {
    fn from(e: toml::de::Error) -> Self {
        FundError::Config(e.to_string())
    }
}
