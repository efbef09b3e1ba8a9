//! Investment requests against a fund's participation contract.

use alloy::primitives::{Address, Bytes, U256};
use alloy::sol_types::SolCall;

use crate::contracts::IParticipation;
use crate::error::FundError;
use crate::transactor::{FundTransactor, TransactionOutcome};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvestmentRequest {
    pub requested_shares: U256,
    pub investment_amount: U256,
    pub investment_asset: Address,
}

impl InvestmentRequest {
    pub fn encode(&self) -> Bytes {
        let call = IParticipation::requestInvestmentCall {
            requestedShares: self.requested_shares,
            investmentAmount: self.investment_amount,
            investmentAsset: self.investment_asset,
        };
        Bytes::from(call.abi_encode())
    }
}

/// Request shares in exchange for `investment_amount`. The signer must have
/// approved the participation contract for at least that amount; policies
/// registered on `requestInvestment` may reject the request.
pub async fn request_investment(
    signer: &dyn FundTransactor,
    participation: Address,
    request: &InvestmentRequest,
) -> Result<TransactionOutcome, FundError> {
    tracing::info!(
        investor = %signer.signer(),
        %participation,
        shares = %request.requested_shares,
        amount = %request.investment_amount,
        "Requesting investment"
    );
    signer.send_calldata(participation, request.encode()).await
}
