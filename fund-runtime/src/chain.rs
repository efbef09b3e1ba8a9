//! Chain client for submitting fund transactions to an EVM node.
//!
//! Provides a configured provider with a local signer (private key). Each
//! client signs as exactly one account, so "act as another account" means
//! building another client.

use alloy::network::{Ethereum, EthereumWallet};
use alloy::primitives::{Address, Bytes};
use alloy::providers::fillers::{
    BlobGasFiller, ChainIdFiller, FillProvider, GasFiller, JoinFill, NonceFiller, WalletFiller,
};
use alloy::providers::{
    Identity, PendingTransactionError, Provider, ProviderBuilder, RootProvider, WatchTxError,
};
use alloy::rpc::types::TransactionRequest;
use alloy::signers::local::PrivateKeySigner;
use alloy::transports::TransportError;
use async_trait::async_trait;

use crate::config::{DeploymentConfig, TxOptions};
use crate::error::FundError;
use crate::transactor::{FundTransactor, TransactionOutcome};

/// The concrete provider type produced by `ProviderBuilder::new().wallet(...).connect_http(...)`.
///
/// This is a fully-configured provider that fills nonce, gas, chain ID, and
/// signs transactions with the supplied wallet.
pub type HttpProvider = FillProvider<
    JoinFill<
        JoinFill<
            Identity,
            JoinFill<GasFiller, JoinFill<BlobGasFiller, JoinFill<NonceFiller, ChainIdFiller>>>,
        >,
        WalletFiller<EthereumWallet>,
    >,
    RootProvider<Ethereum>,
    Ethereum,
>;

/// A chain client wrapping an alloy provider with a local signer.
pub struct ChainClient {
    pub provider: HttpProvider,
    pub chain_id: u64,
    signer: Address,
    options: TxOptions,
}

impl ChainClient {
    /// Create a new chain client from an RPC URL and hex-encoded private key.
    ///
    /// The private key should be a hex string (with or without "0x" prefix).
    pub fn new(rpc_url: &str, private_key: &str, chain_id: u64) -> Result<Self, FundError> {
        let signer: PrivateKeySigner = private_key
            .parse()
            .map_err(|e| FundError::Config(format!("Invalid private key: {e}")))?;
        Self::from_signer(rpc_url, signer, chain_id)
    }

    pub fn from_signer(
        rpc_url: &str,
        signer: PrivateKeySigner,
        chain_id: u64,
    ) -> Result<Self, FundError> {
        let address = signer.address();
        let wallet = EthereumWallet::from(signer);

        let url: url::Url = rpc_url
            .parse()
            .map_err(|e| FundError::Config(format!("Invalid RPC URL: {e}")))?;

        let provider = ProviderBuilder::new().wallet(wallet).connect_http(url);

        Ok(Self {
            provider,
            chain_id,
            signer: address,
            options: TxOptions::default(),
        })
    }

    /// Client for `signer` against the deployment's node, using its
    /// transaction options.
    pub fn for_deployment(
        config: &DeploymentConfig,
        signer: PrivateKeySigner,
    ) -> Result<Self, FundError> {
        Ok(Self::from_signer(&config.rpc_url, signer, config.chain_id)?
            .with_options(config.tx.clone()))
    }

    pub fn with_options(mut self, options: TxOptions) -> Self {
        self.options = options;
        self
    }

    /// Get a reference to the underlying provider.
    pub fn provider(&self) -> &HttpProvider {
        &self.provider
    }

    pub fn options(&self) -> &TxOptions {
        &self.options
    }

    /// The configured chain id is signed into every request, so a node on
    /// another chain rejects it instead of the filler adopting the node's id.
    fn build_request(&self, to: Address, calldata: Bytes) -> TransactionRequest {
        let mut request = TransactionRequest::default()
            .from(self.signer)
            .to(to)
            .input(calldata.into());
        request.chain_id = Some(self.chain_id);
        if let Some(gas_limit) = self.options.gas_limit {
            request = request.gas_limit(gas_limit);
        }
        if let Some(gas_price) = self.options.gas_price {
            request = request.gas_price(u128::from(gas_price));
        }
        request
    }
}

#[async_trait]
impl FundTransactor for ChainClient {
    fn signer(&self) -> Address {
        self.signer
    }

    async fn send_calldata(
        &self,
        to: Address,
        calldata: Bytes,
    ) -> Result<TransactionOutcome, FundError> {
        let request = self.build_request(to, calldata);

        let pending = self
            .provider
            .send_transaction(request)
            .await
            .map_err(map_send_error)?;

        let tx_hash = format!("0x{}", hex::encode(pending.tx_hash().as_slice()));
        tracing::debug!(from = %self.signer, %to, %tx_hash, "Transaction submitted");

        let receipt = pending
            .with_timeout(self.options.confirmation_timeout())
            .get_receipt()
            .await
            .map_err(|e| map_confirmation_error(&tx_hash, e))?;

        if !receipt.status() {
            tracing::warn!(%tx_hash, "Transaction reverted");
            return Err(FundError::Revert {
                reason: format!("transaction {tx_hash} reverted"),
            });
        }

        Ok(TransactionOutcome {
            tx_hash,
            block_number: receipt.block_number,
            gas_used: Some(receipt.gas_used.into()),
        })
    }
}

/// Nodes reject a reverting transaction during gas estimation, before it is
/// ever mined. Those rejections carry revert data or a "revert" message.
fn map_send_error(e: TransportError) -> FundError {
    if let Some(payload) = e.as_error_resp() {
        if payload.as_revert_data().is_some() || payload.message.contains("revert") {
            return FundError::Revert {
                reason: payload.message.to_string(),
            };
        }
    }
    FundError::Transport(format!("Transaction send failed: {e}"))
}

fn map_confirmation_error(tx_hash: &str, e: PendingTransactionError) -> FundError {
    match e {
        PendingTransactionError::TxWatcher(WatchTxError::Timeout) => {
            FundError::ConfirmationTimeout(format!("transaction {tx_hash} was not confirmed"))
        }
        other => FundError::Transport(format!("Receipt fetch failed for {tx_hash}: {other}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Hardhat/Anvil account #0
    const PRIVATE_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    const ADDRESS: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

    #[test]
    fn test_chain_client_creation() {
        let client = ChainClient::new("http://localhost:8545", PRIVATE_KEY, 31337);
        assert!(client.is_ok());
        let client = client.unwrap();
        assert_eq!(client.chain_id, 31337);
        assert_eq!(client.signer(), ADDRESS.parse::<Address>().unwrap());
    }

    #[test]
    fn test_invalid_private_key() {
        let result = ChainClient::new("http://localhost:8545", "not-a-key", 1);
        assert!(matches!(result, Err(FundError::Config(_))));
    }

    #[test]
    fn test_invalid_rpc_url() {
        let result = ChainClient::new("not a url", PRIVATE_KEY, 1);
        assert!(matches!(result, Err(FundError::Config(_))));
    }

    #[test]
    fn test_request_applies_tx_options() {
        let client = ChainClient::new("http://localhost:8545", PRIVATE_KEY, 31337)
            .unwrap()
            .with_options(TxOptions {
                gas_limit: Some(8_000_000),
                gas_price: Some(1_000_000_000),
                confirmation_timeout_secs: None,
            });
        let to = Address::repeat_byte(0x42);
        let request = client.build_request(to, Bytes::from(vec![0xde, 0xad]));
        assert_eq!(request.from, Some(client.signer()));
        assert_eq!(request.chain_id, Some(31337));
        assert_eq!(request.gas, Some(8_000_000));
        assert_eq!(request.gas_price, Some(1_000_000_000));
        assert_eq!(
            request.input.input().cloned(),
            Some(Bytes::from(vec![0xde, 0xad]))
        );
    }

    #[test]
    fn test_request_without_options_leaves_gas_to_fillers() {
        let client = ChainClient::new("http://localhost:8545", PRIVATE_KEY, 31337).unwrap();
        let request = client.build_request(Address::ZERO, Bytes::new());
        assert_eq!(request.gas, None);
        assert_eq!(request.gas_price, None);
    }

    #[test]
    fn test_request_carries_deployment_chain_id() {
        let mut config = DeploymentConfig::from_toml_str(
            r#"
rpc_url = "http://localhost:8545"
chain_id = 31337
integration_manager = "0x0000000000000000000000000000000000000010"
uniswap_v2_adapter = "0x0000000000000000000000000000000000000011"
"#,
        )
        .unwrap();
        config
            .apply_env_overrides(|key| (key == "CHAIN_ID").then(|| "5".to_string()))
            .unwrap();

        let signer: PrivateKeySigner = PRIVATE_KEY.parse().unwrap();
        let client = ChainClient::for_deployment(&config, signer).unwrap();
        let request = client.build_request(Address::ZERO, Bytes::new());
        assert_eq!(request.chain_id, Some(5));
    }
}
