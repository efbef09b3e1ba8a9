//! Uniswap V2 integration calls as a fund owner would make them, with
//! optional vault seeding.

use alloy::primitives::Address;
use fund_runtime::adapters::uniswap_v2::{
    LendArgs, RedeemArgs, TakeOrderArgs, UniswapV2Action, UniswapV2Adapter,
};
use fund_runtime::adapters::AdapterAction;
use fund_runtime::executor::IntegrationExecutor;
use fund_runtime::{FundTransactor, TransactionOutcome};

use super::seed_vault;
use crate::context::TestContext;
use crate::error::TestkitError;

/// Everything needed to call the Uniswap V2 adapter for one fund.
pub struct UniswapV2Fixture<'a> {
    pub comptroller: Address,
    pub vault: Address,
    pub executor: IntegrationExecutor,
    pub adapter: UniswapV2Adapter,
    /// Signs `callOnExtension`; must be authorized on `comptroller`.
    pub fund_owner: &'a dyn FundTransactor,
    /// Source of tokens when seeding the vault.
    pub token_holder: &'a dyn FundTransactor,
}

impl<'a> UniswapV2Fixture<'a> {
    /// Fixture for the context's fund, with the same account owning the
    /// fund and funding the seeding transfers.
    pub fn for_context(
        ctx: &TestContext,
        fund_owner: &'a dyn FundTransactor,
    ) -> Result<Self, TestkitError> {
        let fund = ctx.fund()?;
        Ok(Self {
            comptroller: fund.comptroller,
            vault: fund.vault,
            executor: ctx.executor(),
            adapter: ctx.uniswap_v2_adapter(),
            fund_owner,
            token_holder: fund_owner,
        })
    }

    pub fn with_token_holder(mut self, token_holder: &'a dyn FundTransactor) -> Self {
        self.token_holder = token_holder;
        self
    }

    async fn execute(&self, action: &UniswapV2Action) -> Result<TransactionOutcome, TestkitError> {
        Ok(self
            .executor
            .execute(self.fund_owner, self.comptroller, &self.adapter, action)
            .await?)
    }
}

/// Lend into a Uniswap V2 pool. With `seed_fund`, the vault first receives
/// `amount_a_desired` of `token_a` and `amount_b_desired` of `token_b`.
pub async fn uniswap_v2_lend(
    fixture: &UniswapV2Fixture<'_>,
    args: &LendArgs,
    seed_fund: bool,
) -> Result<TransactionOutcome, TestkitError> {
    if seed_fund {
        seed_vault(
            fixture.token_holder,
            fixture.vault,
            &[
                (args.token_a, args.amount_a_desired),
                (args.token_b, args.amount_b_desired),
            ],
        )
        .await?;
    }
    fixture.execute(&UniswapV2Action::Lend(args.clone())).await
}

/// Redeem pool tokens the vault already holds.
pub async fn uniswap_v2_redeem(
    fixture: &UniswapV2Fixture<'_>,
    args: &RedeemArgs,
) -> Result<TransactionOutcome, TestkitError> {
    fixture.execute(&UniswapV2Action::Redeem(args.clone())).await
}

/// Swap along `args.path`. With `seed_fund`, the vault first receives
/// `outgoing_asset_amount` of the first token in the path.
pub async fn uniswap_v2_take_order(
    fixture: &UniswapV2Fixture<'_>,
    args: &TakeOrderArgs,
    seed_fund: bool,
) -> Result<TransactionOutcome, TestkitError> {
    let action = UniswapV2Action::TakeOrder(args.clone());
    // Reject a bad path before any seeding transfer goes out.
    action.validate()?;

    if seed_fund {
        if let Some(outgoing_asset) = args.outgoing_asset() {
            seed_vault(
                fixture.token_holder,
                fixture.vault,
                &[(outgoing_asset, args.outgoing_asset_amount)],
            )
            .await?;
        }
    }
    fixture.execute(&action).await
}
