//! Integration execution pipeline: adapter argument encoding, envelope
//! building and `callOnExtension` submission behind a single `execute` call.

use alloy::primitives::{Address, Bytes};
use alloy::sol_types::SolCall;

use crate::adapters::{AdapterAction, IntegrationAdapter};
use crate::config::DeploymentConfig;
use crate::contracts::IComptroller;
use crate::error::FundError;
use crate::integration::{CALL_ON_INTEGRATION, CallEnvelope};
use crate::transactor::{FundTransactor, TransactionOutcome};

/// Submits integration calls through a fund's comptroller.
#[derive(Debug, Clone)]
pub struct IntegrationExecutor {
    integration_manager: Address,
}

impl IntegrationExecutor {
    pub fn new(integration_manager: Address) -> Self {
        Self {
            integration_manager,
        }
    }

    pub fn from_config(config: &DeploymentConfig) -> Self {
        Self::new(config.integration_manager)
    }

    pub fn integration_manager(&self) -> Address {
        self.integration_manager
    }

    /// Calldata for `comptroller.callOnExtension(integrationManager, CallOnIntegration, envelope)`.
    pub fn encode_dispatch(&self, envelope: &CallEnvelope) -> Bytes {
        let call = IComptroller::callOnExtensionCall {
            _extension: self.integration_manager,
            _actionId: CALL_ON_INTEGRATION,
            _callArgs: envelope.encode(),
        };
        Bytes::from(call.abi_encode())
    }

    /// Submit `envelope` on `comptroller`, signed by `signer`, and wait for
    /// confirmation. Reverts surface as errors; nothing is retried.
    pub async fn dispatch(
        &self,
        signer: &dyn FundTransactor,
        comptroller: Address,
        envelope: &CallEnvelope,
    ) -> Result<TransactionOutcome, FundError> {
        tracing::info!(
            %comptroller,
            signer = %signer.signer(),
            adapter = %envelope.adapter,
            selector = ?envelope.selector,
            "Dispatching callOnIntegration"
        );

        let calldata = self.encode_dispatch(envelope);
        match signer.send_calldata(comptroller, calldata).await {
            Ok(outcome) => {
                tracing::info!(
                    tx_hash = %outcome.tx_hash,
                    block = ?outcome.block_number,
                    "callOnIntegration confirmed"
                );
                Ok(outcome)
            }
            Err(e) => {
                tracing::warn!(%comptroller, selector = ?envelope.selector, "callOnIntegration failed: {e}");
                Err(e)
            }
        }
    }

    /// Encode `action` for `adapter`, wrap it, and dispatch it.
    ///
    /// Flow:
    /// 1. Validate and encode the action's arguments
    /// 2. Build the envelope with the action's own selector
    /// 3. Submit via `callOnExtension` and wait for the receipt
    pub async fn execute(
        &self,
        signer: &dyn FundTransactor,
        comptroller: Address,
        adapter: &dyn IntegrationAdapter,
        action: &dyn AdapterAction,
    ) -> Result<TransactionOutcome, FundError> {
        action.validate()?;
        let envelope = CallEnvelope::for_action(adapter, action);
        tracing::debug!(protocol = adapter.protocol_id(), "Built integration envelope");
        self.dispatch(signer, comptroller, &envelope).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::uniswap_v2::{RedeemArgs, UniswapV2Adapter};
    use crate::adapters::{EncodedCallArgs, IntegrationSelector};
    use alloy::primitives::U256;
    use async_trait::async_trait;
    use tokio::sync::Mutex;

    const MANAGER: &str = "0x00000000000000000000000000000000000000e1";
    const COMPTROLLER: &str = "0x00000000000000000000000000000000000000c1";
    const ADAPTER: &str = "0x00000000000000000000000000000000000000a1";

    /// Accepts calls only from `owner`, like a comptroller guarding its fund.
    struct FakeComptroller {
        caller: Address,
        owner: Address,
        sent: Mutex<Vec<(Address, Bytes)>>,
    }

    #[async_trait]
    impl FundTransactor for FakeComptroller {
        fn signer(&self) -> Address {
            self.caller
        }

        async fn send_calldata(
            &self,
            to: Address,
            calldata: Bytes,
        ) -> Result<TransactionOutcome, FundError> {
            self.sent.lock().await.push((to, calldata));
            if self.caller != self.owner {
                return Err(FundError::Revert {
                    reason: "Only fund owner callable".into(),
                });
            }
            Ok(TransactionOutcome {
                tx_hash: format!("0x{}", "11".repeat(32)),
                block_number: Some(7),
                gas_used: Some(21_000),
            })
        }
    }

    fn redeem() -> RedeemArgs {
        RedeemArgs::builder()
            .outgoing_asset(Address::repeat_byte(3))
            .liquidity(U256::from(500u64))
            .tokens(Address::repeat_byte(1), Address::repeat_byte(2))
            .amounts_min(U256::ZERO, U256::ZERO)
            .build()
            .unwrap()
    }

    #[test]
    fn test_encode_dispatch() {
        let executor = IntegrationExecutor::new(MANAGER.parse().unwrap());
        let envelope = CallEnvelope::new(
            ADAPTER.parse().unwrap(),
            IntegrationSelector::Lend,
            EncodedCallArgs::from(vec![1, 2, 3]),
        );
        let calldata = executor.encode_dispatch(&envelope);
        assert_eq!(&calldata[..4], IComptroller::callOnExtensionCall::SELECTOR.as_slice());

        let decoded = IComptroller::callOnExtensionCall::abi_decode(&calldata).unwrap();
        assert_eq!(decoded._extension, executor.integration_manager());
        assert_eq!(decoded._actionId, U256::ZERO);
        assert_eq!(CallEnvelope::decode(&decoded._callArgs).unwrap(), envelope);
    }

    #[tokio::test]
    async fn test_execute_targets_comptroller() {
        let owner = Address::repeat_byte(0x0f);
        let signer = FakeComptroller {
            caller: owner,
            owner,
            sent: Mutex::new(Vec::new()),
        };
        let executor = IntegrationExecutor::new(MANAGER.parse().unwrap());
        let adapter = UniswapV2Adapter::new(ADAPTER.parse().unwrap());
        let comptroller: Address = COMPTROLLER.parse().unwrap();

        let action = crate::adapters::uniswap_v2::UniswapV2Action::Redeem(redeem());
        let outcome = executor
            .execute(&signer, comptroller, &adapter, &action)
            .await
            .unwrap();
        assert_eq!(outcome.block_number, Some(7));

        let sent = signer.sent.lock().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, comptroller);
        let call = IComptroller::callOnExtensionCall::abi_decode(&sent[0].1).unwrap();
        let envelope = CallEnvelope::decode(&call._callArgs).unwrap();
        assert_eq!(envelope.selector, IntegrationSelector::Redeem);
        assert_eq!(RedeemArgs::decode(&envelope.encoded_call_args).unwrap(), redeem());
    }

    #[tokio::test]
    async fn test_invalid_action_never_dispatched() {
        use crate::adapters::uniswap_v2::{TakeOrderArgs, UniswapV2Action};

        let owner = Address::repeat_byte(0x0f);
        let signer = FakeComptroller {
            caller: owner,
            owner,
            sent: Mutex::new(Vec::new()),
        };
        let executor = IntegrationExecutor::new(MANAGER.parse().unwrap());
        let adapter = UniswapV2Adapter::new(ADAPTER.parse().unwrap());
        let action = UniswapV2Action::TakeOrder(TakeOrderArgs {
            path: vec![],
            outgoing_asset_amount: U256::from(1u64),
            min_incoming_asset_amount: U256::ZERO,
        });

        let result = executor
            .execute(&signer, COMPTROLLER.parse().unwrap(), &adapter, &action)
            .await;
        assert!(matches!(result, Err(FundError::Encoding(_))));
        assert!(signer.sent.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_unauthorized_signer_is_rejected() {
        let signer = FakeComptroller {
            caller: Address::repeat_byte(0x0e),
            owner: Address::repeat_byte(0x0f),
            sent: Mutex::new(Vec::new()),
        };
        let executor = IntegrationExecutor::new(MANAGER.parse().unwrap());
        let adapter = UniswapV2Adapter::new(ADAPTER.parse().unwrap());

        let action = crate::adapters::uniswap_v2::UniswapV2Action::Redeem(redeem());
        let result = executor
            .execute(&signer, COMPTROLLER.parse().unwrap(), &adapter, &action)
            .await;
        assert!(result.unwrap_err().is_revert());
        // Submitted exactly once, never retried
        assert_eq!(signer.sent.lock().await.len(), 1);
    }
}
