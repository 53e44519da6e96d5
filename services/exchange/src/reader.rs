//! Ledger reader: balances, reserves, and share supply
//!
//! Read-only view of the pool over JSON-RPC. Every accessor performs a fresh
//! read and reserves are never cached, so a quote computed from a
//! [`PoolSnapshot`] reflects the ledger at the moment it was assembled.

use std::sync::Arc;
use std::time::Duration;

use amm::PoolSnapshot;
use anyhow::{Context, Result};
use ethers::prelude::*;
use ethers::providers::Http;
use tracing::debug;
use url::Url;

use config::ClientConfig;

use crate::abi::{Erc20, Exchange};

/// Read-only handle on the exchange pool and its paired token
pub struct LedgerReader {
    provider: Arc<Provider<Http>>,
    exchange: Exchange<Provider<Http>>,
    token: Erc20<Provider<Http>>,
    exchange_address: Address,
    fee_bps: u32,
}

impl LedgerReader {
    /// Build a reader over a connection-pooled HTTP provider.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let provider = build_provider(config)?;

        let exchange_address: Address = config
            .exchange
            .exchange_address
            .parse()
            .context("Invalid exchange contract address")?;
        let token_address: Address = config
            .exchange
            .token_address
            .parse()
            .context("Invalid token contract address")?;

        let exchange = Exchange::new(exchange_address, provider.clone());
        let token = Erc20::new(token_address, provider.clone());

        Ok(Self {
            provider,
            exchange,
            token,
            exchange_address,
            fee_bps: config.exchange.fee_bps,
        })
    }

    /// Native-currency balance of `address`, or of the exchange contract
    /// itself when no address is given (the pool's base reserve).
    pub async fn native_balance(&self, address: Option<Address>) -> Result<U256> {
        let target = address.unwrap_or(self.exchange_address);
        self.provider
            .get_balance(target, None)
            .await
            .with_context(|| format!("Failed to read native balance of {:#x}", target))
    }

    /// Paired-token balance of `address`.
    pub async fn token_balance(&self, address: Address) -> Result<U256> {
        self.token
            .balance_of(address)
            .call()
            .await
            .with_context(|| format!("Failed to read token balance of {:#x}", address))
    }

    /// LP-share balance of `address`.
    pub async fn lp_balance(&self, address: Address) -> Result<U256> {
        self.exchange
            .balance_of(address)
            .call()
            .await
            .with_context(|| format!("Failed to read LP balance of {:#x}", address))
    }

    /// The pool's paired-token reserve.
    pub async fn token_reserve(&self) -> Result<U256> {
        self.exchange
            .get_reserve()
            .call()
            .await
            .context("Failed to read token reserve")
    }

    /// Total outstanding LP shares.
    pub async fn lp_total_supply(&self) -> Result<U256> {
        self.exchange
            .total_supply()
            .call()
            .await
            .context("Failed to read LP total supply")
    }

    /// Assemble a fresh pool snapshot: base reserve (contract's native
    /// balance), paired reserve, and share supply, with the configured fee.
    pub async fn pool_snapshot(&self) -> Result<PoolSnapshot> {
        let (base_reserve, paired_reserve, lp_total_supply) = tokio::try_join!(
            self.native_balance(None),
            self.token_reserve(),
            self.lp_total_supply(),
        )?;

        debug!(
            %base_reserve, %paired_reserve, %lp_total_supply,
            "assembled pool snapshot"
        );

        Ok(PoolSnapshot {
            base_reserve,
            paired_reserve,
            lp_total_supply,
            fee_bps: self.fee_bps,
        })
    }
}

/// Build an HTTP provider backed by a pooled reqwest client.
pub(crate) fn build_provider(config: &ClientConfig) -> Result<Arc<Provider<Http>>> {
    let http_client = reqwest::Client::builder()
        .pool_idle_timeout(Duration::from_secs(60))
        .pool_max_idle_per_host(5)
        .timeout(Duration::from_secs(config.chain.request_timeout_secs))
        .tcp_keepalive(Duration::from_secs(60))
        .tcp_nodelay(true)
        .build()
        .context("Failed to create HTTP client")?;

    let url: Url = config
        .chain
        .rpc_url
        .parse()
        .context("Invalid primary RPC URL")?;
    let transport = Http::new_with_client(url, http_client);
    let provider = Provider::<Http>::new(transport)
        .interval(Duration::from_millis(config.chain.poll_interval_ms));

    Ok(Arc::new(provider))
}
