pub mod uniswap_v2;

use alloy::primitives::{Address, U256};
use fund_runtime::FundTransactor;
use fund_runtime::erc20;

use crate::error::TestkitError;

/// Transfer each `(token, amount)` from `holder` into `vault`, in order.
///
/// Simulates a vault that already holds the assets an integration call
/// spends. Each transfer is confirmed before the next is sent.
pub async fn seed_vault(
    holder: &dyn FundTransactor,
    vault: Address,
    assets: &[(Address, U256)],
) -> Result<(), TestkitError> {
    for (token, amount) in assets {
        tracing::info!(%vault, %token, %amount, "Seeding vault");
        erc20::transfer(holder, *token, vault, *amount).await?;
    }
    Ok(())
}
