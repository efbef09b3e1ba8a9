//! The signing side of every helper in this crate.
//!
//! Anything that can put calldata on-chain as a fixed account and wait for
//! it to land implements [`FundTransactor`]. [`crate::chain::ChainClient`]
//! is the live implementation; tests substitute recording fakes.

use alloy::primitives::{Address, Bytes};
use async_trait::async_trait;

use crate::error::FundError;

/// Outcome of a confirmed transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionOutcome {
    pub tx_hash: String,
    pub block_number: Option<u64>,
    pub gas_used: Option<u128>,
}

#[async_trait]
pub trait FundTransactor: Send + Sync {
    /// Account whose signature authorizes the transactions sent.
    fn signer(&self) -> Address;

    /// Send `calldata` to `to` and wait until it is confirmed.
    ///
    /// A transaction that lands but reverts is an error
    /// ([`FundError::Revert`]), never an `Ok` outcome.
    async fn send_calldata(&self, to: Address, calldata: Bytes)
    -> Result<TransactionOutcome, FundError>;
}
