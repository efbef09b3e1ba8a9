use fund_runtime::FundError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TestkitError {
    #[error(transparent)]
    Fund(#[from] FundError),

    #[error("Artifact error: {0}")]
    Artifact(String),

    #[error("Deployment failed: {0}")]
    Deploy(String),

    #[error("Test environment error: {0}")]
    Environment(String),
}

impl TestkitError {
    /// Whether the underlying failure is an on-chain rejection.
    pub fn is_revert(&self) -> bool {
        matches!(self, TestkitError::Fund(e) if e.is_revert())
    }
}
