//! Deployment configuration: where the fund contracts live and how
//! transactions against them are sent.
//!
//! Loaded from a TOML file named by `FUND_DEPLOYMENT_FILE` (a `.env` file is
//! honoured), with individual environment variables taking precedence.

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use alloy::primitives::Address;
use serde::Deserialize;

use crate::error::FundError;

/// Per-transaction options applied by [`crate::chain::ChainClient`].
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct TxOptions {
    #[serde(default)]
    pub gas_limit: Option<u64>,
    /// Legacy gas price in wei. When unset the provider estimates fees.
    #[serde(default)]
    pub gas_price: Option<u64>,
    /// Unset means wait for confirmation indefinitely.
    #[serde(default)]
    pub confirmation_timeout_secs: Option<u64>,
}

impl TxOptions {
    pub fn confirmation_timeout(&self) -> Option<Duration> {
        self.confirmation_timeout_secs.map(Duration::from_secs)
    }
}

/// Addresses of one deployed fund.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct FundRoutes {
    pub comptroller: Address,
    pub vault: Address,
    pub participation: Address,
    pub shares: Address,
    pub policy_manager: Address,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeploymentConfig {
    pub rpc_url: String,
    pub chain_id: u64,
    pub integration_manager: Address,
    pub uniswap_v2_adapter: Address,
    #[serde(default)]
    pub fund: Option<FundRoutes>,
    /// Token addresses keyed by symbol (`WETH`, `MLN`, ...).
    #[serde(default)]
    pub tokens: BTreeMap<String, Address>,
    #[serde(default)]
    pub tx: TxOptions,
}

impl DeploymentConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self, FundError> {
        Ok(toml::from_str(contents)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, FundError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            FundError::Config(format!("Cannot read deployment file {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&contents)
    }

    /// Load the file named by `FUND_DEPLOYMENT_FILE`, then apply
    /// environment overrides.
    pub fn from_env() -> Result<Self, FundError> {
        dotenvy::dotenv().ok();

        let path = std::env::var("FUND_DEPLOYMENT_FILE")
            .map_err(|_| FundError::Config("FUND_DEPLOYMENT_FILE not set".into()))?;
        let mut config = Self::from_file(&path)?;
        config.apply_env_overrides(|key| std::env::var(key).ok())?;

        tracing::debug!(
            rpc_url = %config.rpc_url,
            chain_id = config.chain_id,
            "Loaded deployment config from {path}"
        );
        Ok(config)
    }

    /// Override fields from `RPC_URL`, `CHAIN_ID`, `GAS_LIMIT`, `GAS_PRICE`
    /// and `CONFIRMATION_TIMEOUT_SECS` as returned by `lookup`.
    pub fn apply_env_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), FundError> {
        if let Some(url) = lookup("RPC_URL") {
            self.rpc_url = url;
        }
        if let Some(chain_id) = lookup("CHAIN_ID") {
            self.chain_id = parse_var("CHAIN_ID", &chain_id)?;
        }
        if let Some(gas_limit) = lookup("GAS_LIMIT") {
            self.tx.gas_limit = Some(parse_var("GAS_LIMIT", &gas_limit)?);
        }
        if let Some(gas_price) = lookup("GAS_PRICE") {
            self.tx.gas_price = Some(parse_var("GAS_PRICE", &gas_price)?);
        }
        if let Some(timeout) = lookup("CONFIRMATION_TIMEOUT_SECS") {
            self.tx.confirmation_timeout_secs =
                Some(parse_var("CONFIRMATION_TIMEOUT_SECS", &timeout)?);
        }
        Ok(())
    }

    pub fn token(&self, symbol: &str) -> Result<Address, FundError> {
        self.tokens
            .get(symbol)
            .copied()
            .ok_or_else(|| FundError::Config(format!("No token with symbol {symbol}")))
    }

    pub fn fund(&self) -> Result<&FundRoutes, FundError> {
        self.fund
            .as_ref()
            .ok_or_else(|| FundError::Config("Deployment has no [fund] section".into()))
    }
}

fn parse_var(name: &str, value: &str) -> Result<u64, FundError> {
    value
        .trim()
        .parse()
        .map_err(|e| FundError::Config(format!("Invalid {name} '{value}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const DEPLOYMENT: &str = r#"
rpc_url = "http://localhost:8545"
chain_id = 31337
integration_manager = "0x0000000000000000000000000000000000000010"
uniswap_v2_adapter = "0x0000000000000000000000000000000000000011"

[tx]
gas_limit = 8000000

[tokens]
WETH = "0x0000000000000000000000000000000000000020"
MLN = "0x0000000000000000000000000000000000000021"

[fund]
comptroller = "0x0000000000000000000000000000000000000030"
vault = "0x0000000000000000000000000000000000000031"
participation = "0x0000000000000000000000000000000000000032"
shares = "0x0000000000000000000000000000000000000033"
policy_manager = "0x0000000000000000000000000000000000000034"
"#;

    #[test]
    fn test_parse_deployment() {
        let config = DeploymentConfig::from_toml_str(DEPLOYMENT).unwrap();
        assert_eq!(config.chain_id, 31337);
        assert_eq!(config.tx.gas_limit, Some(8_000_000));
        assert_eq!(config.tx.gas_price, None);
        assert_eq!(config.tx.confirmation_timeout(), None);
        assert_eq!(
            config.token("WETH").unwrap(),
            "0x0000000000000000000000000000000000000020".parse::<Address>().unwrap()
        );
        assert_eq!(
            config.fund().unwrap().vault,
            "0x0000000000000000000000000000000000000031".parse::<Address>().unwrap()
        );
    }

    #[test]
    fn test_unknown_token_symbol() {
        let config = DeploymentConfig::from_toml_str(DEPLOYMENT).unwrap();
        assert!(matches!(config.token("DAI"), Err(FundError::Config(_))));
    }

    #[test]
    fn test_missing_fund_section() {
        let config = DeploymentConfig::from_toml_str(
            r#"
rpc_url = "http://localhost:8545"
chain_id = 1
integration_manager = "0x0000000000000000000000000000000000000010"
uniswap_v2_adapter = "0x0000000000000000000000000000000000000011"
"#,
        )
        .unwrap();
        assert!(config.fund().is_err());
        assert!(config.tokens.is_empty());
        assert_eq!(config.tx, TxOptions::default());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = DeploymentConfig::from_toml_str(DEPLOYMENT).unwrap();
        let env: HashMap<&str, &str> = HashMap::from([
            ("RPC_URL", "http://anvil:8545"),
            ("GAS_PRICE", "2000000000"),
            ("CONFIRMATION_TIMEOUT_SECS", "30"),
        ]);
        config
            .apply_env_overrides(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.rpc_url, "http://anvil:8545");
        assert_eq!(config.chain_id, 31337);
        assert_eq!(config.tx.gas_price, Some(2_000_000_000));
        assert_eq!(config.tx.confirmation_timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_invalid_env_override() {
        let mut config = DeploymentConfig::from_toml_str(DEPLOYMENT).unwrap();
        let result = config.apply_env_overrides(|key| {
            (key == "CHAIN_ID").then(|| "mainnet".to_string())
        });
        assert!(matches!(result, Err(FundError::Config(_))));
    }

    #[test]
    fn test_invalid_address_in_file() {
        let result = DeploymentConfig::from_toml_str(
            r#"
rpc_url = "http://localhost:8545"
chain_id = 1
integration_manager = "not-an-address"
uniswap_v2_adapter = "0x0000000000000000000000000000000000000011"
"#,
        );
        assert!(matches!(result, Err(FundError::Config(_))));
    }
}
