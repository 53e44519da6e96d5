//! Contract bindings for the exchange and its paired ERC-20
//!
//! The exchange contract is referenced only through its ABI; its source is
//! not part of this repository. The surface below is the V1-style single
//! pool: LP shares are the contract's own ERC-20 balance, the base asset is
//! the chain's native currency, and `getReserve` reports the paired token
//! side (the native side is simply the contract's balance).

use ethers::prelude::abigen;

abigen!(
    Exchange,
    r#"[
        function addLiquidity(uint256 amount) external payable returns (uint256)
        function removeLiquidity(uint256 amount) external returns (uint256, uint256)
        function getReserve() external view returns (uint256)
        function getAmountOfTokens(uint256 inputAmount, uint256 inputReserve, uint256 outputReserve) external pure returns (uint256)
        function ethToToken(uint256 minTokens) external payable
        function tokenToEth(uint256 tokensSold, uint256 minEth) external
        function totalSupply() external view returns (uint256)
        function balanceOf(address owner) external view returns (uint256)
    ]"#
);

abigen!(
    Erc20,
    r#"[
        function approve(address spender, uint256 amount) external returns (bool)
        function allowance(address owner, address spender) external view returns (uint256)
        function balanceOf(address owner) external view returns (uint256)
        function decimals() external view returns (uint8)
    ]"#
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exchange_abi_exposes_pool_surface() {
        let abi = EXCHANGE_ABI.clone();
        for name in [
            "addLiquidity",
            "removeLiquidity",
            "getReserve",
            "getAmountOfTokens",
            "ethToToken",
            "tokenToEth",
            "totalSupply",
            "balanceOf",
        ] {
            assert!(abi.function(name).is_ok(), "missing function {}", name);
        }
    }

    #[test]
    fn approve_selector_matches_erc20() {
        // keccak256("approve(address,uint256)")[..4]
        let selector = ERC20_ABI.function("approve").unwrap().short_signature();
        assert_eq!(selector, [0x09, 0x5e, 0xa7, 0xb3]);
    }
}
