//! Explicit per-run test context.
//!
//! Built once by a test (or test binary) and passed by reference to
//! everything that needs the deployment or an account to sign with.

use alloy::primitives::Address;
use alloy::signers::local::PrivateKeySigner;
use fund_runtime::adapters::uniswap_v2::UniswapV2Adapter;
use fund_runtime::chain::ChainClient;
use fund_runtime::config::{DeploymentConfig, FundRoutes};
use fund_runtime::executor::IntegrationExecutor;

use crate::error::TestkitError;

/// First accounts of the standard Anvil/Hardhat development mnemonic.
const DEV_PRIVATE_KEYS: &[&str] = &[
    "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80",
    "0x59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d",
    "0x5de4111afa1a4b94908f83103eb1f1706367c2e68ca870fc3fb9d5804403b365",
];

pub struct TestContext {
    pub config: DeploymentConfig,
    accounts: Vec<PrivateKeySigner>,
}

impl TestContext {
    pub fn new(config: DeploymentConfig, accounts: Vec<PrivateKeySigner>) -> Self {
        Self { config, accounts }
    }

    /// Deployment from `FUND_DEPLOYMENT_FILE`; accounts from the
    /// comma-separated `TEST_PRIVATE_KEYS`, or the development accounts.
    pub fn from_env() -> Result<Self, TestkitError> {
        let config = DeploymentConfig::from_env()?;
        let keys = std::env::var("TEST_PRIVATE_KEYS").ok();
        let accounts = parse_accounts(keys.as_deref())?;
        tracing::info!(
            rpc_url = %config.rpc_url,
            accounts = accounts.len(),
            "Test context ready"
        );
        Ok(Self::new(config, accounts))
    }

    pub fn accounts(&self) -> Vec<Address> {
        self.accounts.iter().map(|s| s.address()).collect()
    }

    pub fn account(&self, index: usize) -> Result<Address, TestkitError> {
        self.signer(index).map(|s| s.address())
    }

    /// Client signing as account `index`.
    pub fn client(&self, index: usize) -> Result<ChainClient, TestkitError> {
        let signer = self.signer(index)?.clone();
        Ok(ChainClient::for_deployment(&self.config, signer)?)
    }

    pub fn fund(&self) -> Result<&FundRoutes, TestkitError> {
        Ok(self.config.fund()?)
    }

    pub fn token(&self, symbol: &str) -> Result<Address, TestkitError> {
        Ok(self.config.token(symbol)?)
    }

    pub fn executor(&self) -> IntegrationExecutor {
        IntegrationExecutor::from_config(&self.config)
    }

    pub fn uniswap_v2_adapter(&self) -> UniswapV2Adapter {
        UniswapV2Adapter::from_config(&self.config)
    }

    fn signer(&self, index: usize) -> Result<&PrivateKeySigner, TestkitError> {
        self.accounts.get(index).ok_or_else(|| {
            TestkitError::Environment(format!(
                "No account {index}; context has {}",
                self.accounts.len()
            ))
        })
    }
}

fn parse_accounts(keys: Option<&str>) -> Result<Vec<PrivateKeySigner>, TestkitError> {
    let keys: Vec<&str> = match keys {
        Some(list) => list.split(',').map(str::trim).filter(|k| !k.is_empty()).collect(),
        None => DEV_PRIVATE_KEYS.to_vec(),
    };
    keys.into_iter()
        .enumerate()
        .map(|(i, key)| {
            key.parse::<PrivateKeySigner>()
                .map_err(|e| TestkitError::Environment(format!("Invalid private key #{i}: {e}")))
        })
        .collect()
}
