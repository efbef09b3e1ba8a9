//! Call envelopes for the Integration Manager extension.
//!
//! An envelope bundles the adapter to call, the adapter routine (selector)
//! and that routine's encoded arguments into the single payload carried by
//! `callOnExtension`. The arguments are passed through untouched.

use alloy::primitives::{Address, Bytes, FixedBytes, U256};
use alloy::sol_types::SolValue;

use crate::adapters::{AdapterAction, EncodedCallArgs, IntegrationAdapter, IntegrationSelector};
use crate::error::FundError;

/// Integration Manager action id for `callOnIntegration`.
pub const CALL_ON_INTEGRATION: U256 = U256::ZERO;

/// `(address adapter, bytes4 selector, bytes encodedCallArgs)`
type EnvelopeTuple = (Address, FixedBytes<4>, Bytes);

/// Encode the outer `callOnIntegration` payload.
///
/// Does not check that `selector` is the routine `encoded_call_args` was
/// built for; a mismatch only surfaces as an on-chain revert.
pub fn call_on_integration_args(
    adapter: Address,
    selector: IntegrationSelector,
    encoded_call_args: &EncodedCallArgs,
) -> Bytes {
    let tuple: EnvelopeTuple = (adapter, selector.bytes(), encoded_call_args.0.clone());
    Bytes::from(tuple.abi_encode_params())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallEnvelope {
    pub adapter: Address,
    pub selector: IntegrationSelector,
    pub encoded_call_args: EncodedCallArgs,
}

impl CallEnvelope {
    pub fn new(
        adapter: Address,
        selector: IntegrationSelector,
        encoded_call_args: EncodedCallArgs,
    ) -> Self {
        Self {
            adapter,
            selector,
            encoded_call_args,
        }
    }

    /// Envelope for `action` on `adapter`; the selector comes from the action.
    pub fn for_action(adapter: &dyn IntegrationAdapter, action: &dyn AdapterAction) -> Self {
        Self::new(adapter.address(), action.selector(), action.encode_call_args())
    }

    pub fn encode(&self) -> Bytes {
        call_on_integration_args(self.adapter, self.selector, &self.encoded_call_args)
    }

    pub fn decode(payload: &[u8]) -> Result<Self, FundError> {
        let (adapter, selector, encoded_call_args) = EnvelopeTuple::abi_decode_params(payload)?;
        Ok(Self {
            adapter,
            selector: IntegrationSelector::from_bytes(selector)?,
            encoded_call_args: EncodedCallArgs(encoded_call_args),
        })
    }
}
