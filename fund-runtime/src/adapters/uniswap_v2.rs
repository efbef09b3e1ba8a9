//! Uniswap V2 adapter: lend, redeem and take-order argument encoding.

use alloy::primitives::{Address, U256};
use alloy::sol_types::SolValue;

use super::{AdapterAction, EncodedCallArgs, IntegrationAdapter, IntegrationSelector};
use crate::config::DeploymentConfig;
use crate::error::FundError;

/// Minimum number of tokens in a swap path (outgoing and incoming asset).
const MIN_PATH_LEN: usize = 2;

/// ABI layout of lend args:
/// `(tokenA, tokenB, amountADesired, amountBDesired, amountAMin, amountBMin, incomingAsset, minIncomingAssetAmount)`
type LendTuple = (Address, Address, U256, U256, U256, U256, Address, U256);

/// ABI layout of redeem args:
/// `(outgoingAsset, liquidity, tokenA, tokenB, amountAMin, amountBMin)`
type RedeemTuple = (Address, U256, Address, Address, U256, U256);

/// ABI layout of take-order args: `(path, outgoingAssetAmount, minIncomingAssetAmount)`
type TakeOrderTuple = (Vec<Address>, U256, U256);

pub struct UniswapV2Adapter {
    address: Address,
}

impl UniswapV2Adapter {
    pub fn new(address: Address) -> Self {
        Self { address }
    }

    pub fn from_config(config: &DeploymentConfig) -> Self {
        Self::new(config.uniswap_v2_adapter)
    }
}

impl IntegrationAdapter for UniswapV2Adapter {
    fn protocol_id(&self) -> &str {
        "uniswap_v2"
    }

    fn address(&self) -> Address {
        self.address
    }
}

/// Provide liquidity to a token pair, receiving pool tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LendArgs {
    pub token_a: Address,
    pub token_b: Address,
    pub amount_a_desired: U256,
    pub amount_b_desired: U256,
    pub amount_a_min: U256,
    pub amount_b_min: U256,
    pub incoming_asset: Address,
    pub min_incoming_asset_amount: U256,
}

impl LendArgs {
    pub fn builder() -> LendArgsBuilder {
        LendArgsBuilder::default()
    }

    pub fn encode(&self) -> EncodedCallArgs {
        let tuple: LendTuple = (
            self.token_a,
            self.token_b,
            self.amount_a_desired,
            self.amount_b_desired,
            self.amount_a_min,
            self.amount_b_min,
            self.incoming_asset,
            self.min_incoming_asset_amount,
        );
        tuple.abi_encode_params().into()
    }

    pub fn decode(encoded: &EncodedCallArgs) -> Result<Self, FundError> {
        let (
            token_a,
            token_b,
            amount_a_desired,
            amount_b_desired,
            amount_a_min,
            amount_b_min,
            incoming_asset,
            min_incoming_asset_amount,
        ) = LendTuple::abi_decode_params(&encoded.0[..])?;
        Ok(Self {
            token_a,
            token_b,
            amount_a_desired,
            amount_b_desired,
            amount_a_min,
            amount_b_min,
            incoming_asset,
            min_incoming_asset_amount,
        })
    }
}

#[derive(Debug, Default)]
pub struct LendArgsBuilder {
    token_a: Option<Address>,
    token_b: Option<Address>,
    amount_a_desired: Option<U256>,
    amount_b_desired: Option<U256>,
    amount_a_min: Option<U256>,
    amount_b_min: Option<U256>,
    incoming_asset: Option<Address>,
    min_incoming_asset_amount: Option<U256>,
}

impl LendArgsBuilder {
    pub fn token_a(mut self, token: Address) -> Self {
        self.token_a = Some(token);
        self
    }

    pub fn token_b(mut self, token: Address) -> Self {
        self.token_b = Some(token);
        self
    }

    pub fn amounts_desired(mut self, amount_a: U256, amount_b: U256) -> Self {
        self.amount_a_desired = Some(amount_a);
        self.amount_b_desired = Some(amount_b);
        self
    }

    pub fn amounts_min(mut self, amount_a: U256, amount_b: U256) -> Self {
        self.amount_a_min = Some(amount_a);
        self.amount_b_min = Some(amount_b);
        self
    }

    pub fn incoming_asset(mut self, asset: Address) -> Self {
        self.incoming_asset = Some(asset);
        self
    }

    pub fn min_incoming_asset_amount(mut self, amount: U256) -> Self {
        self.min_incoming_asset_amount = Some(amount);
        self
    }

    pub fn build(self) -> Result<LendArgs, FundError> {
        Ok(LendArgs {
            token_a: self.token_a.ok_or_else(|| FundError::missing("token_a"))?,
            token_b: self.token_b.ok_or_else(|| FundError::missing("token_b"))?,
            amount_a_desired: self
                .amount_a_desired
                .ok_or_else(|| FundError::missing("amount_a_desired"))?,
            amount_b_desired: self
                .amount_b_desired
                .ok_or_else(|| FundError::missing("amount_b_desired"))?,
            amount_a_min: self
                .amount_a_min
                .ok_or_else(|| FundError::missing("amount_a_min"))?,
            amount_b_min: self
                .amount_b_min
                .ok_or_else(|| FundError::missing("amount_b_min"))?,
            incoming_asset: self
                .incoming_asset
                .ok_or_else(|| FundError::missing("incoming_asset"))?,
            min_incoming_asset_amount: self
                .min_incoming_asset_amount
                .ok_or_else(|| FundError::missing("min_incoming_asset_amount"))?,
        })
    }
}

/// Burn pool tokens, receiving both underlying tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedeemArgs {
    pub outgoing_asset: Address,
    pub liquidity: U256,
    pub token_a: Address,
    pub token_b: Address,
    pub amount_a_min: U256,
    pub amount_b_min: U256,
}

impl RedeemArgs {
    pub fn builder() -> RedeemArgsBuilder {
        RedeemArgsBuilder::default()
    }

    pub fn encode(&self) -> EncodedCallArgs {
        let tuple: RedeemTuple = (
            self.outgoing_asset,
            self.liquidity,
            self.token_a,
            self.token_b,
            self.amount_a_min,
            self.amount_b_min,
        );
        tuple.abi_encode_params().into()
    }

    pub fn decode(encoded: &EncodedCallArgs) -> Result<Self, FundError> {
        let (outgoing_asset, liquidity, token_a, token_b, amount_a_min, amount_b_min) =
            RedeemTuple::abi_decode_params(&encoded.0[..])?;
        Ok(Self {
            outgoing_asset,
            liquidity,
            token_a,
            token_b,
            amount_a_min,
            amount_b_min,
        })
    }
}

#[derive(Debug, Default)]
pub struct RedeemArgsBuilder {
    outgoing_asset: Option<Address>,
    liquidity: Option<U256>,
    token_a: Option<Address>,
    token_b: Option<Address>,
    amount_a_min: Option<U256>,
    amount_b_min: Option<U256>,
}

impl RedeemArgsBuilder {
    /// The pool token being redeemed.
    pub fn outgoing_asset(mut self, asset: Address) -> Self {
        self.outgoing_asset = Some(asset);
        self
    }

    pub fn liquidity(mut self, amount: U256) -> Self {
        self.liquidity = Some(amount);
        self
    }

    pub fn tokens(mut self, token_a: Address, token_b: Address) -> Self {
        self.token_a = Some(token_a);
        self.token_b = Some(token_b);
        self
    }

    pub fn amounts_min(mut self, amount_a: U256, amount_b: U256) -> Self {
        self.amount_a_min = Some(amount_a);
        self.amount_b_min = Some(amount_b);
        self
    }

    pub fn build(self) -> Result<RedeemArgs, FundError> {
        Ok(RedeemArgs {
            outgoing_asset: self
                .outgoing_asset
                .ok_or_else(|| FundError::missing("outgoing_asset"))?,
            liquidity: self.liquidity.ok_or_else(|| FundError::missing("liquidity"))?,
            token_a: self.token_a.ok_or_else(|| FundError::missing("token_a"))?,
            token_b: self.token_b.ok_or_else(|| FundError::missing("token_b"))?,
            amount_a_min: self
                .amount_a_min
                .ok_or_else(|| FundError::missing("amount_a_min"))?,
            amount_b_min: self
                .amount_b_min
                .ok_or_else(|| FundError::missing("amount_b_min"))?,
        })
    }
}

/// Swap along `path`, spending `path[0]` and receiving the last token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TakeOrderArgs {
    pub path: Vec<Address>,
    pub outgoing_asset_amount: U256,
    pub min_incoming_asset_amount: U256,
}

impl TakeOrderArgs {
    pub fn builder() -> TakeOrderArgsBuilder {
        TakeOrderArgsBuilder::default()
    }

    pub fn outgoing_asset(&self) -> Option<Address> {
        self.path.first().copied()
    }

    pub fn incoming_asset(&self) -> Option<Address> {
        self.path.last().copied()
    }

    /// Re-check a record that was not built through the builder.
    pub fn validate(&self) -> Result<(), FundError> {
        validate_path(&self.path)
    }

    pub fn encode(&self) -> EncodedCallArgs {
        let tuple: TakeOrderTuple = (
            self.path.clone(),
            self.outgoing_asset_amount,
            self.min_incoming_asset_amount,
        );
        tuple.abi_encode_params().into()
    }

    pub fn decode(encoded: &EncodedCallArgs) -> Result<Self, FundError> {
        let (path, outgoing_asset_amount, min_incoming_asset_amount) =
            TakeOrderTuple::abi_decode_params(&encoded.0[..])?;
        validate_path(&path)?;
        Ok(Self {
            path,
            outgoing_asset_amount,
            min_incoming_asset_amount,
        })
    }
}

#[derive(Debug, Default)]
pub struct TakeOrderArgsBuilder {
    path: Option<Vec<Address>>,
    outgoing_asset_amount: Option<U256>,
    min_incoming_asset_amount: Option<U256>,
}

impl TakeOrderArgsBuilder {
    pub fn path(mut self, path: Vec<Address>) -> Self {
        self.path = Some(path);
        self
    }

    pub fn outgoing_asset_amount(mut self, amount: U256) -> Self {
        self.outgoing_asset_amount = Some(amount);
        self
    }

    pub fn min_incoming_asset_amount(mut self, amount: U256) -> Self {
        self.min_incoming_asset_amount = Some(amount);
        self
    }

    pub fn build(self) -> Result<TakeOrderArgs, FundError> {
        let path = self.path.ok_or_else(|| FundError::missing("path"))?;
        validate_path(&path)?;
        Ok(TakeOrderArgs {
            path,
            outgoing_asset_amount: self
                .outgoing_asset_amount
                .ok_or_else(|| FundError::missing("outgoing_asset_amount"))?,
            min_incoming_asset_amount: self
                .min_incoming_asset_amount
                .ok_or_else(|| FundError::missing("min_incoming_asset_amount"))?,
        })
    }
}

fn validate_path(path: &[Address]) -> Result<(), FundError> {
    if path.len() < MIN_PATH_LEN {
        return Err(FundError::Encoding(format!(
            "path needs at least {MIN_PATH_LEN} tokens, got {}",
            path.len()
        )));
    }
    Ok(())
}

/// Any Uniswap V2 adapter action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UniswapV2Action {
    Lend(LendArgs),
    Redeem(RedeemArgs),
    TakeOrder(TakeOrderArgs),
}

impl AdapterAction for UniswapV2Action {
    fn validate(&self) -> Result<(), FundError> {
        match self {
            UniswapV2Action::TakeOrder(args) => args.validate(),
            UniswapV2Action::Lend(_) | UniswapV2Action::Redeem(_) => Ok(()),
        }
    }

    fn selector(&self) -> IntegrationSelector {
        match self {
            UniswapV2Action::Lend(_) => IntegrationSelector::Lend,
            UniswapV2Action::Redeem(_) => IntegrationSelector::Redeem,
            UniswapV2Action::TakeOrder(_) => IntegrationSelector::TakeOrder,
        }
    }

    fn encode_call_args(&self) -> EncodedCallArgs {
        match self {
            UniswapV2Action::Lend(args) => args.encode(),
            UniswapV2Action::Redeem(args) => args.encode(),
            UniswapV2Action::TakeOrder(args) => args.encode(),
        }
    }
}

impl From<LendArgs> for UniswapV2Action {
    fn from(args: LendArgs) -> Self {
        UniswapV2Action::Lend(args)
    }
}

impl From<RedeemArgs> for UniswapV2Action {
    fn from(args: RedeemArgs) -> Self {
        UniswapV2Action::Redeem(args)
    }
}

impl From<TakeOrderArgs> for UniswapV2Action {
    fn from(args: TakeOrderArgs) -> Self {
        UniswapV2Action::TakeOrder(args)
    }
}
