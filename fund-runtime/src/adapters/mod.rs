//! Integration adapters: the routines a fund can call through the Integration Manager.

pub mod uniswap_v2;

use alloy::primitives::{Address, Bytes, FixedBytes};
use alloy::sol_types::SolCall;

use crate::contracts::IIntegrationAdapter;
use crate::error::FundError;

/// Common trait for integration adapters
pub trait IntegrationAdapter {
    /// Protocol identifier
    fn protocol_id(&self) -> &str;

    /// Deployed address the Integration Manager routes calls to
    fn address(&self) -> Address;
}

/// An adapter action that knows its own selector and argument encoding.
pub trait AdapterAction {
    /// Reject arguments the adapter could never accept, before anything is sent.
    fn validate(&self) -> Result<(), FundError> {
        Ok(())
    }

    fn selector(&self) -> IntegrationSelector;

    fn encode_call_args(&self) -> EncodedCallArgs;
}

/// Which adapter routine decodes and executes a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntegrationSelector {
    Lend,
    Redeem,
    TakeOrder,
}

impl IntegrationSelector {
    pub fn bytes(self) -> FixedBytes<4> {
        FixedBytes::from(match self {
            IntegrationSelector::Lend => IIntegrationAdapter::lendCall::SELECTOR,
            IntegrationSelector::Redeem => IIntegrationAdapter::redeemCall::SELECTOR,
            IntegrationSelector::TakeOrder => IIntegrationAdapter::takeOrderCall::SELECTOR,
        })
    }

    pub fn from_bytes(selector: FixedBytes<4>) -> Result<Self, FundError> {
        [Self::Lend, Self::Redeem, Self::TakeOrder]
            .into_iter()
            .find(|candidate| candidate.bytes() == selector)
            .ok_or_else(|| FundError::Encoding(format!("Unknown integration selector {selector}")))
    }
}

/// Adapter-specific argument payload. Opaque to everything but the adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedCallArgs(pub Bytes);

impl EncodedCallArgs {
    pub fn as_bytes(&self) -> &Bytes {
        &self.0
    }
}

impl From<Vec<u8>> for EncodedCallArgs {
    fn from(bytes: Vec<u8>) -> Self {
        Self(Bytes::from(bytes))
    }
}

/// Parse a hex address string, reporting failures as encoding errors.
pub fn parse_address(value: &str) -> Result<Address, FundError> {
    value
        .parse::<Address>()
        .map_err(|e| FundError::Encoding(format!("Invalid address '{value}': {e}")))
}
