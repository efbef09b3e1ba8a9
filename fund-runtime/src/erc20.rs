//! Fungible-token transactions sent through a [`FundTransactor`].

use alloy::primitives::{Address, Bytes, U256};
use alloy::sol_types::SolCall;

use crate::contracts::IERC20;
use crate::error::FundError;
use crate::transactor::{FundTransactor, TransactionOutcome};

/// Encode `transfer(address,uint256)`.
pub fn encode_transfer(to: Address, amount: U256) -> Bytes {
    Bytes::from(IERC20::transferCall { to, amount }.abi_encode())
}

/// Encode `approve(address,uint256)`.
pub fn encode_approve(spender: Address, amount: U256) -> Bytes {
    Bytes::from(IERC20::approveCall { spender, amount }.abi_encode())
}

/// Move `amount` of `token` from the signer to `to`.
pub async fn transfer(
    signer: &dyn FundTransactor,
    token: Address,
    to: Address,
    amount: U256,
) -> Result<TransactionOutcome, FundError> {
    tracing::debug!(%token, from = %signer.signer(), %to, %amount, "ERC20 transfer");
    signer.send_calldata(token, encode_transfer(to, amount)).await
}

/// Allow `spender` to pull up to `amount` of `token` from the signer.
pub async fn approve(
    signer: &dyn FundTransactor,
    token: Address,
    spender: Address,
    amount: U256,
) -> Result<TransactionOutcome, FundError> {
    tracing::debug!(%token, owner = %signer.signer(), %spender, %amount, "ERC20 approve");
    signer.send_calldata(token, encode_approve(spender, amount)).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_transfer() {
        let to = Address::repeat_byte(0x22);
        let data = encode_transfer(to, U256::from(5u64));
        let call = IERC20::transferCall::abi_decode(&data).unwrap();
        assert_eq!(call.to, to);
        assert_eq!(call.amount, U256::from(5u64));
    }

    #[test]
    fn test_transfer_and_approve_differ() {
        let who = Address::repeat_byte(0x22);
        let amount = U256::from(1u64);
        assert_ne!(encode_transfer(who, amount), encode_approve(who, amount));
        assert_eq!(&encode_approve(who, amount)[..4], IERC20::approveCall::SELECTOR.as_slice());
    }
}
