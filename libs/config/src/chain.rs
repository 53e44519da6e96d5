//! Chain constants and deployment defaults
//!
//! Single canonical source for the addresses and parameters the client and
//! scripts fall back to when no configuration file overrides them.

/// Default values for a local or testnet deployment
pub mod defaults {
    /// Primary JSON-RPC endpoint
    pub const RPC_URL: &str = "http://127.0.0.1:8545";

    /// Sepolia chain id; a local hardhat node reports 31337
    pub const CHAIN_ID: u64 = 11155111;

    /// Deterministic first-deploy address of the paired ERC-20 on a fresh
    /// local node
    pub const TOKEN_ADDRESS: &str = "0x5FbDB2315678afecb367f032d93F642f64180aa3";

    /// Deterministic second-deploy address of the exchange contract
    pub const EXCHANGE_ADDRESS: &str = "0xe7f1725E7734CE288F8367e1Bb143E90bb3F0512";

    /// Fee retained by the exchange contract on every swap, in basis points
    pub const POOL_FEE_BPS: u32 = 100;

    /// Decimals of the chain's native currency (and of LP shares)
    pub const NATIVE_DECIMALS: u8 = 18;

    /// Decimals of the paired token
    pub const TOKEN_DECIMALS: u8 = 18;

    /// Environment variable holding the signing key. Keys never live in
    /// configuration files.
    pub const PRIVATE_KEY_ENV: &str = "TIDEPOOL_PRIVATE_KEY";

    /// Prefix for environment-variable configuration overrides,
    /// e.g. `TIDEPOOL__CHAIN__RPC_URL`
    pub const ENV_PREFIX: &str = "TIDEPOOL";

    /// Seconds to wait for a single RPC request
    pub const REQUEST_TIMEOUT_SECS: u64 = 30;

    /// Seconds to wait for a submitted transaction to be mined
    pub const CONFIRMATION_TIMEOUT_SECS: u64 = 300;

    /// Receipt polling interval while awaiting confirmation
    pub const POLL_INTERVAL_MS: u64 = 500;

    /// Refuse to submit above this gas price
    pub const MAX_GAS_PRICE_GWEI: u64 = 100;
}
