//! Policy registration on a fund's policy manager.

use alloy::primitives::{Address, Bytes, FixedBytes};
use alloy::sol_types::SolCall;

use crate::contracts::{IParticipation, IPolicyManager};
use crate::error::FundError;
use crate::transactor::{FundTransactor, TransactionOutcome};

/// Fund functions a policy can be attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyHook {
    RequestInvestment,
}

impl PolicyHook {
    /// Selector of the guarded function, which is how the policy manager
    /// keys its registrations.
    pub fn signature(self) -> FixedBytes<4> {
        match self {
            PolicyHook::RequestInvestment => {
                FixedBytes::from(IParticipation::requestInvestmentCall::SELECTOR)
            }
        }
    }
}

pub fn encode_register(hook: PolicyHook, policy: Address) -> Bytes {
    let call = IPolicyManager::registerCall {
        sign: hook.signature(),
        ofPolicy: policy,
    };
    Bytes::from(call.abi_encode())
}

/// Attach `policy` to `hook`. Only the fund manager may do this.
pub async fn register_policy(
    signer: &dyn FundTransactor,
    policy_manager: Address,
    hook: PolicyHook,
    policy: Address,
) -> Result<TransactionOutcome, FundError> {
    tracing::info!(%policy_manager, ?hook, %policy, "Registering policy");
    signer
        .send_calldata(policy_manager, encode_register(hook, policy))
        .await
}
