//! Shared Solidity contract bindings for all on-chain interactions.
//!
//! Uses alloy's `sol!` macro to generate type-safe ABI encoders/decoders
//! for the fund contracts and the tokens they hold.

use alloy::sol;

sol! {
    #[sol(rpc)]
    interface IComptroller {
        function callOnExtension(address _extension, uint256 _actionId, bytes calldata _callArgs) external;
    }

    /// Entry points every integration adapter exposes. Only their selectors
    /// are used off-chain: the Integration Manager invokes them.
    interface IIntegrationAdapter {
        function lend(address _vaultProxy, bytes calldata _encodedCallArgs, bytes calldata _encodedAssetTransferArgs) external;
        function redeem(address _vaultProxy, bytes calldata _encodedCallArgs, bytes calldata _encodedAssetTransferArgs) external;
        function takeOrder(address _vaultProxy, bytes calldata _encodedCallArgs, bytes calldata _encodedAssetTransferArgs) external;
    }

    #[sol(rpc)]
    interface IERC20 {
        function transfer(address to, uint256 amount) external returns (bool);
        function approve(address spender, uint256 amount) external returns (bool);
        function allowance(address owner, address spender) external view returns (uint256);
    }

    #[sol(rpc)]
    interface IParticipation {
        function requestInvestment(uint256 requestedShares, uint256 investmentAmount, address investmentAsset) external payable;
        function hasRequest(address owner) external view returns (bool);
    }

    #[sol(rpc)]
    interface IPolicyManager {
        function register(bytes4 sign, address ofPolicy) external;
    }

    #[sol(rpc)]
    interface IUserWhitelist {
        function whitelisted(address user) external view returns (bool);
    }
}
