use alloy::primitives::{address, Address};
use alloy::sol;

/// Celo core contracts registry, deployed at the same address on every Celo network.
pub const CELO_REGISTRY: Address = address!("000000000000000000000000000000000000ce10");

/// Registry identifier of the native token's ERC-20 facade.
pub const GOLD_TOKEN_ID: &str = "GoldToken";

/// Registry identifier of the cUSD stable token.
pub const STABLE_TOKEN_ID: &str = "StableToken";

sol! {
    #[allow(missing_docs)]
    interface IERC20 {
        function approve(address spender, uint256 amount) external returns (bool success);
        function allowance(address owner, address spender) external view returns (uint256 remaining);
        function balanceOf(address account) external view returns (uint256 balance);
        function symbol() external view returns (string symbol);
        function decimals() external view returns (uint8 decimals);
    }

    #[allow(missing_docs)]
    interface IVault {
        function lockTokens(address token, address withdrawer, uint256 amount, uint256 unlockTime)
            external
            returns (uint256 id);
        function withdrawTokens(uint256 id) external;
        function getVaultsByWithdrawer(address withdrawer) external view returns (uint256[] ids);
        function getVaultById(uint256 id)
            external
            view
            returns (
                address token,
                address withdrawer,
                uint256 amount,
                uint256 unlockTime,
                bool withdrawn,
                bool deposited
            );
        function getTokenTotalLockedBalance(address token) external view returns (uint256 balance);
    }

    #[allow(missing_docs)]
    interface IRegistry {
        function getAddressForString(string identifier) external view returns (address addr);
    }
}
