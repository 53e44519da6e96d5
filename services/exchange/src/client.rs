//! Transaction orchestrator for the exchange contract
//!
//! Quotes every operation locally through the pure math engine against a
//! fresh reserve snapshot, then submits the transaction and waits for
//! confirmation. ERC-20 approvals are always confirmed before the dependent
//! swap or deposit is sent; the contract itself re-derives every amount on
//! chain, so a local quote is a preview and a slippage bound, never the
//! source of truth.

use std::sync::Arc;
use std::time::Duration;

use amm::{PoolSnapshot, U256};
use anyhow::{anyhow, bail, Context, Result};
use ethers::prelude::*;
use ethers::providers::Http;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use config::ClientConfig;

use crate::abi::{Erc20, Exchange};
use crate::reader::{build_provider, LedgerReader};

type SignerClient = SignerMiddleware<Provider<Http>, LocalWallet>;

/// Which asset is being sold in a swap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapDirection {
    /// Sell native currency, receive paired tokens
    NativeForToken,
    /// Sell paired tokens, receive native currency
    TokenForNative,
}

/// Local pre-transaction estimate for a swap
#[derive(Debug, Clone, Copy)]
pub struct SwapQuote {
    pub direction: SwapDirection,
    pub amount_in: U256,
    /// Exact output the contract would produce against the snapshot
    pub amount_out: U256,
    /// Output floor after the slippage tolerance, submitted on chain
    pub min_amount_out: U256,
}

/// Result of a confirmed transaction
#[derive(Debug, Clone)]
pub struct TxOutcome {
    pub tx_hash: H256,
    pub block_number: Option<U64>,
    pub gas_used: Option<U256>,
}

/// Signing client for the exchange pool
pub struct ExchangeClient {
    config: ClientConfig,
    reader: LedgerReader,
    signer: Arc<SignerClient>,
    exchange: Exchange<SignerClient>,
    token: Erc20<SignerClient>,
    exchange_address: Address,
}

impl ExchangeClient {
    /// Connect a wallet to the configured exchange deployment.
    pub async fn connect(config: ClientConfig) -> Result<Self> {
        let provider = build_provider(&config)?;

        let wallet = config
            .private_key()?
            .parse::<LocalWallet>()
            .context("Invalid private key format")?
            .with_chain_id(config.chain.chain_id);
        let address = wallet.address();

        let signer = Arc::new(SignerMiddleware::new((*provider).clone(), wallet));

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

        let exchange = Exchange::new(exchange_address, signer.clone());
        let token = Erc20::new(token_address, signer.clone());
        let reader = LedgerReader::new(&config)?;

        info!("Connected wallet {:#x} to exchange {:#x}", address, exchange_address);

        Ok(Self {
            config,
            reader,
            signer,
            exchange,
            token,
            exchange_address,
        })
    }

    /// The connected wallet address.
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// Read-only access to the underlying ledger reader.
    pub fn reader(&self) -> &LedgerReader {
        &self.reader
    }

    /// Quote a swap against a fresh reserve snapshot.
    pub async fn quote_swap(
        &self,
        direction: SwapDirection,
        amount_in: U256,
        slippage_bps: u32,
    ) -> Result<SwapQuote> {
        let snapshot = self.reader.pool_snapshot().await?;
        quote_swap_against(&snapshot, direction, amount_in, slippage_bps)
    }

    /// Sell native currency for paired tokens.
    pub async fn swap_native_for_token(
        &self,
        amount_in: U256,
        slippage_bps: u32,
    ) -> Result<(SwapQuote, TxOutcome)> {
        let quote = self
            .quote_swap(SwapDirection::NativeForToken, amount_in, slippage_bps)
            .await?;
        self.check_gas_price().await?;

        info!(
            "Swapping {} native for >= {} tokens",
            quote.amount_in, quote.min_amount_out
        );
        let call = self.exchange.eth_to_token(quote.min_amount_out).value(amount_in);
        let outcome = self.send_and_confirm(call, "ethToToken").await?;
        Ok((quote, outcome))
    }

    /// Sell paired tokens for native currency. Approves the exchange to
    /// spend the tokens first and waits for that approval to confirm.
    pub async fn swap_token_for_native(
        &self,
        amount_in: U256,
        slippage_bps: u32,
    ) -> Result<(SwapQuote, TxOutcome)> {
        let quote = self
            .quote_swap(SwapDirection::TokenForNative, amount_in, slippage_bps)
            .await?;
        self.check_gas_price().await?;
        self.ensure_allowance(amount_in).await?;

        info!(
            "Swapping {} tokens for >= {} native",
            quote.amount_in, quote.min_amount_out
        );
        let call = self.exchange.token_to_eth(amount_in, quote.min_amount_out);
        let outcome = self.send_and_confirm(call, "tokenToEth").await?;
        Ok((quote, outcome))
    }

    /// Deposit liquidity. For a seeded pool the paired amount is sized from
    /// the current ratio and `paired_amount` must be `None`; the first
    /// liquidity event has no ratio to preserve, so the caller supplies the
    /// paired amount explicitly.
    pub async fn add_liquidity(
        &self,
        base_amount: U256,
        paired_amount: Option<U256>,
    ) -> Result<TxOutcome> {
        let snapshot = self.reader.pool_snapshot().await?;

        let paired = if snapshot.is_uninitialized() {
            paired_amount.ok_or_else(|| {
                anyhow!("first liquidity event: supply the paired token amount explicitly")
            })?
        } else {
            if paired_amount.is_some() {
                bail!("pool already seeded: the paired amount is sized from the pool ratio");
            }
            snapshot
                .required_paired_deposit(base_amount)
                .context("Failed to size paired deposit")?
        };

        self.check_gas_price().await?;
        self.ensure_allowance(paired).await?;

        info!(
            "Adding liquidity: {} native + {} tokens",
            base_amount, paired
        );
        let call = self.exchange.add_liquidity(paired).value(base_amount);
        self.send_and_confirm(call, "addLiquidity").await
    }

    /// Burn `lp_amount` shares. Returns the previewed (base, paired)
    /// withdrawal alongside the confirmed transaction.
    pub async fn remove_liquidity(&self, lp_amount: U256) -> Result<((U256, U256), TxOutcome)> {
        let snapshot = self.reader.pool_snapshot().await?;
        let preview = snapshot
            .quote_withdrawal(lp_amount)
            .context("Failed to preview withdrawal")?;

        self.check_gas_price().await?;

        info!(
            "Removing {} LP shares for ~({} native, {} tokens)",
            lp_amount, preview.0, preview.1
        );
        let call = self.exchange.remove_liquidity(lp_amount);
        let outcome = self.send_and_confirm(call, "removeLiquidity").await?;
        Ok((preview, outcome))
    }

    /// Approve the exchange to spend `amount` of the paired token if the
    /// current allowance is insufficient, and wait for the approval to be
    /// mined before returning. The dependent transaction must not be
    /// submitted until this one is confirmed.
    async fn ensure_allowance(&self, amount: U256) -> Result<()> {
        let current = self
            .token
            .allowance(self.signer.address(), self.exchange_address)
            .call()
            .await
            .context("Failed to read allowance")?;

        if current >= amount {
            debug!("Existing allowance {} covers {}", current, amount);
            return Ok(());
        }

        info!("Approving exchange to spend {} tokens", amount);
        let call = self.token.approve(self.exchange_address, amount);
        self.send_and_confirm(call, "approve").await?;
        Ok(())
    }

    /// Submit a contract call and poll until it is mined or the
    /// confirmation timeout elapses.
    async fn send_and_confirm<D: ethers::abi::Detokenize>(
        &self,
        call: ContractCall<SignerClient, D>,
        label: &str,
    ) -> Result<TxOutcome> {
        let pending = call
            .send()
            .await
            .with_context(|| format!("Failed to submit {} transaction", label))?;
        let tx_hash = pending.tx_hash();
        info!("Submitted {}: {:#x}", label, tx_hash);

        let confirmation = timeout(
            Duration::from_secs(self.config.chain.confirmation_timeout_secs),
            pending,
        )
        .await
        .with_context(|| format!("{} confirmation timed out", label))?
        .with_context(|| format!("Failed while awaiting {} receipt", label))?;

        let receipt = confirmation
            .ok_or_else(|| anyhow!("{} transaction {:#x} was dropped", label, tx_hash))?;

        if receipt.status != Some(U64::from(1)) {
            bail!("{} transaction {:#x} reverted", label, tx_hash);
        }

        info!(
            "Confirmed {} in block {}",
            label,
            receipt.block_number.unwrap_or_default()
        );

        Ok(TxOutcome {
            tx_hash,
            block_number: receipt.block_number,
            gas_used: receipt.gas_used,
        })
    }

    /// Refuse to submit when the network gas price exceeds the configured cap.
    async fn check_gas_price(&self) -> Result<U256> {
        let gas_price = self
            .signer
            .get_gas_price()
            .await
            .context("Failed to read gas price")?;
        let max_gas_price = U256::from(self.config.chain.max_gas_price_gwei) * U256::exp10(9);

        if gas_price > max_gas_price {
            bail!(
                "Current gas price {} gwei exceeds maximum {} gwei",
                gas_price / U256::exp10(9),
                self.config.chain.max_gas_price_gwei
            );
        }

        Ok(gas_price)
    }
}

/// Quote a swap against a given snapshot and apply the slippage tolerance.
pub fn quote_swap_against(
    snapshot: &PoolSnapshot,
    direction: SwapDirection,
    amount_in: U256,
    slippage_bps: u32,
) -> Result<SwapQuote> {
    if slippage_bps > 10_000 {
        bail!("slippage {} bps exceeds 100%", slippage_bps);
    }

    let amount_out = match direction {
        SwapDirection::NativeForToken => snapshot.quote_base_for_paired(amount_in),
        SwapDirection::TokenForNative => snapshot.quote_paired_for_base(amount_in),
    }
    .context("Swap cannot be priced against the current pool state")?;

    let min_amount_out = apply_slippage(amount_out, slippage_bps);

    if amount_out > U256::zero() && min_amount_out.is_zero() {
        warn!(
            "slippage tolerance {} bps floors the minimum output to zero",
            slippage_bps
        );
    }

    Ok(SwapQuote {
        direction,
        amount_in,
        amount_out,
        min_amount_out,
    })
}

/// Floor of `amount * (10000 - slippage_bps) / 10000`.
fn apply_slippage(amount: U256, slippage_bps: u32) -> U256 {
    let keep = U256::from(10_000 - slippage_bps);
    let scaled = amount.full_mul(keep) / ethers::types::U512::from(10_000u64);
    // amount * keep / 10000 <= amount, so the narrowing cannot fail
    U256::try_from(scaled).unwrap_or(amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded_snapshot() -> PoolSnapshot {
        PoolSnapshot {
            base_reserve: U256::from(1000u64),
            paired_reserve: U256::from(1000u64),
            lp_total_supply: U256::from(1000u64),
            fee_bps: 100,
        }
    }

    #[test]
    fn quote_applies_fee_then_slippage() {
        let quote = quote_swap_against(
            &seeded_snapshot(),
            SwapDirection::NativeForToken,
            U256::from(100u64),
            100,
        )
        .unwrap();
        assert_eq!(quote.amount_out, U256::from(90u64));
        // 1% tolerance on 90 floors to 89
        assert_eq!(quote.min_amount_out, U256::from(89u64));
    }

    #[test]
    fn quote_direction_swaps_reserves() {
        let snapshot = PoolSnapshot {
            base_reserve: U256::from(1000u64),
            paired_reserve: U256::from(4000u64),
            lp_total_supply: U256::from(1000u64),
            fee_bps: 100,
        };
        let forward = quote_swap_against(
            &snapshot,
            SwapDirection::NativeForToken,
            U256::from(100u64),
            0,
        )
        .unwrap();
        let backward = quote_swap_against(
            &snapshot,
            SwapDirection::TokenForNative,
            U256::from(100u64),
            0,
        )
        .unwrap();
        assert!(forward.amount_out > backward.amount_out);
    }

    #[test]
    fn quote_rejects_unseeded_pool() {
        let empty = PoolSnapshot::new(U256::zero(), U256::zero(), U256::zero());
        let result = quote_swap_against(
            &empty,
            SwapDirection::NativeForToken,
            U256::from(1u64),
            100,
        );
        assert!(result.is_err());
    }

    #[test]
    fn quote_rejects_absurd_slippage() {
        let result = quote_swap_against(
            &seeded_snapshot(),
            SwapDirection::NativeForToken,
            U256::from(1u64),
            10_001,
        );
        assert!(result.is_err());
    }

    #[test]
    fn zero_slippage_keeps_full_output() {
        let quote = quote_swap_against(
            &seeded_snapshot(),
            SwapDirection::NativeForToken,
            U256::from(100u64),
            0,
        )
        .unwrap();
        assert_eq!(quote.min_amount_out, quote.amount_out);
    }
}
