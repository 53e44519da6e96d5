//! Client Configuration Module
//!
//! Provides configuration loading for the exchange client and deployment
//! scripts. Supports loading from TOML files with environment-variable
//! overrides (`TIDEPOOL__<SECTION>__<KEY>`).

use std::path::Path;
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use config_crate::{Config, Environment, File};
use ethereum_types::H160;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::chain::defaults;

/// Top-level configuration for the exchange client
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct ClientConfig {
    /// Chain connectivity settings
    pub chain: ChainConfig,

    /// Deployed contract settings
    pub exchange: ExchangeConfig,

    /// Signing key source
    pub wallet: WalletConfig,
}

/// Chain connectivity settings
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct ChainConfig {
    /// Primary JSON-RPC endpoint
    pub rpc_url: String,

    /// Fallback endpoints tried in order when the primary fails
    pub backup_rpc_urls: Vec<String>,

    pub chain_id: u64,
    pub request_timeout_secs: u64,
    pub confirmation_timeout_secs: u64,
    pub poll_interval_ms: u64,

    /// Refuse to submit transactions above this gas price
    pub max_gas_price_gwei: u64,
}

/// Deployed contract settings
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct ExchangeConfig {
    /// Address of the exchange (pool) contract
    pub exchange_address: String,

    /// Address of the paired ERC-20 token
    pub token_address: String,

    /// Fee the contract retains on every swap, in basis points. Pinned per
    /// deployment; the client never guesses this.
    pub fee_bps: u32,

    /// Decimals of the paired token
    pub token_decimals: u8,
}

/// Signing key source. Only the *name* of an environment variable is
/// configurable; the key material itself never appears in files.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct WalletConfig {
    pub private_key_env: String,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            rpc_url: defaults::RPC_URL.to_string(),
            backup_rpc_urls: Vec::new(),
            chain_id: defaults::CHAIN_ID,
            request_timeout_secs: defaults::REQUEST_TIMEOUT_SECS,
            confirmation_timeout_secs: defaults::CONFIRMATION_TIMEOUT_SECS,
            poll_interval_ms: defaults::POLL_INTERVAL_MS,
            max_gas_price_gwei: defaults::MAX_GAS_PRICE_GWEI,
        }
    }
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            exchange_address: defaults::EXCHANGE_ADDRESS.to_string(),
            token_address: defaults::TOKEN_ADDRESS.to_string(),
            fee_bps: defaults::POOL_FEE_BPS,
            token_decimals: defaults::TOKEN_DECIMALS,
        }
    }
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            private_key_env: defaults::PRIVATE_KEY_ENV.to_string(),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            chain: ChainConfig::default(),
            exchange: ExchangeConfig::default(),
            wallet: WalletConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from an optional TOML file with environment
    /// overrides applied on top. With no file present the defaults are used.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(path) = path {
            info!("Loading client config from {:?}", path);
            builder = builder.add_source(File::from(path).required(true));
        } else {
            let default_path = Path::new("config/client.toml");
            if default_path.exists() {
                debug!("Loading client config from {:?}", default_path);
                builder = builder.add_source(File::from(default_path).required(false));
            }
        }

        // TIDEPOOL__CHAIN__RPC_URL=... style overrides
        builder = builder.add_source(
            Environment::with_prefix(defaults::ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );

        let config: Self = builder
            .build()
            .context("Failed to assemble configuration sources")?
            .try_deserialize()
            .context("Failed to deserialize client configuration")?;

        config.validate()?;
        Ok(config)
    }

    /// Validate addresses and bounds before any RPC is attempted.
    pub fn validate(&self) -> Result<()> {
        parse_address(&self.exchange.exchange_address)
            .context("exchange.exchange_address is not a valid address")?;
        parse_address(&self.exchange.token_address)
            .context("exchange.token_address is not a valid address")?;

        if self.exchange.fee_bps > 10_000 {
            bail!(
                "exchange.fee_bps {} exceeds the basis-point denominator",
                self.exchange.fee_bps
            );
        }
        if self.chain.rpc_url.is_empty() {
            bail!("chain.rpc_url must not be empty");
        }
        if self.chain.poll_interval_ms == 0 {
            bail!("chain.poll_interval_ms must be nonzero");
        }
        Ok(())
    }

    /// Read the signing key from the configured environment variable.
    pub fn private_key(&self) -> Result<String> {
        std::env::var(&self.wallet.private_key_env).with_context(|| {
            format!(
                "signing key not found in environment variable {}",
                self.wallet.private_key_env
            )
        })
    }
}

/// Parse a `0x`-prefixed 20-byte hex address.
pub fn parse_address(s: &str) -> Result<H160> {
    let trimmed = s.strip_prefix("0x").unwrap_or(s);
    if trimmed.len() != 40 {
        bail!("address {} has wrong length", s);
    }
    H160::from_str(trimmed).with_context(|| format!("address {} is not valid hex", s))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_validate() {
        ClientConfig::default().validate().unwrap();
    }

    #[test]
    fn rejects_bad_address() {
        let mut config = ClientConfig::default();
        config.exchange.exchange_address = "0xnothex".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_fee_above_denominator() {
        let mut config = ClientConfig::default();
        config.exchange.fee_bps = 10_001;
        assert!(config.validate().is_err());
    }

    #[test]
    fn loads_partial_toml_over_defaults() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        writeln!(
            file,
            r#"
[chain]
rpc_url = "https://rpc.sepolia.org"

[exchange]
fee_bps = 30
"#
        )
        .unwrap();

        let config = ClientConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.chain.rpc_url, "https://rpc.sepolia.org");
        assert_eq!(config.exchange.fee_bps, 30);
        // Untouched sections keep their defaults
        assert_eq!(config.exchange.token_decimals, defaults::TOKEN_DECIMALS);
    }

    #[test]
    fn parse_address_roundtrip() {
        let addr = parse_address(defaults::EXCHANGE_ADDRESS).unwrap();
        assert_eq!(
            format!("{:#x}", addr),
            defaults::EXCHANGE_ADDRESS.to_lowercase()
        );
    }
}
