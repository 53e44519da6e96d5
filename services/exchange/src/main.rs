//! Exchange CLI: quote, swap, and manage liquidity from the command line

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use ethers::types::Address;
use tracing::info;

use config::{defaults, ClientConfig};
use exchange_client::{units, ExchangeClient, LedgerReader, SwapDirection};

#[derive(Parser)]
#[command(name = "exchange", about = "Client for the Tidepool constant-product exchange")]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the pool's reserves and share supply
    Pool,

    /// Show native, token, and LP balances of an address
    Balances {
        #[arg(long)]
        address: String,
    },

    /// Price a swap without submitting anything
    Quote {
        #[arg(long, value_enum)]
        direction: Direction,
        /// Input amount as a decimal string
        #[arg(long)]
        amount: String,
        #[arg(long, default_value_t = 100)]
        slippage_bps: u32,
    },

    /// Execute a swap
    Swap {
        #[arg(long, value_enum)]
        direction: Direction,
        #[arg(long)]
        amount: String,
        #[arg(long, default_value_t = 100)]
        slippage_bps: u32,
    },

    /// Deposit liquidity. For the first liquidity event pass --paired;
    /// afterwards the paired amount is sized from the pool ratio.
    AddLiquidity {
        /// Native-currency amount as a decimal string
        #[arg(long)]
        base: String,
        /// Paired-token amount, only valid on an unseeded pool
        #[arg(long)]
        paired: Option<String>,
    },

    /// Burn LP shares and withdraw both assets
    RemoveLiquidity {
        /// Share amount as a decimal string
        #[arg(long)]
        shares: String,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Direction {
    /// Sell native currency for tokens
    NativeToToken,
    /// Sell tokens for native currency
    TokenToNative,
}

impl From<Direction> for SwapDirection {
    fn from(d: Direction) -> Self {
        match d {
            Direction::NativeToToken => SwapDirection::NativeForToken,
            Direction::TokenToNative => SwapDirection::TokenForNative,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = ClientConfig::load(cli.config.as_deref())?;
    let token_decimals = config.exchange.token_decimals;

    match cli.command {
        Command::Pool => {
            let reader = LedgerReader::new(&config)?;
            let snapshot = reader.pool_snapshot().await?;
            println!(
                "base reserve:   {}",
                units::format_amount(snapshot.base_reserve, defaults::NATIVE_DECIMALS)?
            );
            println!(
                "paired reserve: {}",
                units::format_amount(snapshot.paired_reserve, token_decimals)?
            );
            println!(
                "LP supply:      {}",
                units::format_amount(snapshot.lp_total_supply, defaults::NATIVE_DECIMALS)?
            );
            println!("fee:            {} bps", snapshot.fee_bps);
        }

        Command::Balances { address } => {
            let address: Address = address.parse().context("Invalid address")?;
            let reader = LedgerReader::new(&config)?;
            let (native, token, lp) = tokio::try_join!(
                reader.native_balance(Some(address)),
                reader.token_balance(address),
                reader.lp_balance(address),
            )?;
            println!(
                "native: {}",
                units::format_amount(native, defaults::NATIVE_DECIMALS)?
            );
            println!("token:  {}", units::format_amount(token, token_decimals)?);
            println!(
                "LP:     {}",
                units::format_amount(lp, defaults::NATIVE_DECIMALS)?
            );
        }

        Command::Quote {
            direction,
            amount,
            slippage_bps,
        } => {
            let (in_decimals, out_decimals) = decimals_for(direction, token_decimals);
            let amount_in = units::parse_amount(&amount, in_decimals)?;

            let reader = LedgerReader::new(&config)?;
            let snapshot = reader.pool_snapshot().await?;
            let quote = exchange_client::client::quote_swap_against(
                &snapshot,
                direction.into(),
                amount_in,
                slippage_bps,
            )?;
            println!(
                "output:     {}",
                units::format_amount(quote.amount_out, out_decimals)?
            );
            println!(
                "min output: {} ({} bps tolerance)",
                units::format_amount(quote.min_amount_out, out_decimals)?,
                slippage_bps
            );
        }

        Command::Swap {
            direction,
            amount,
            slippage_bps,
        } => {
            let (in_decimals, out_decimals) = decimals_for(direction, token_decimals);
            let amount_in = units::parse_amount(&amount, in_decimals)?;

            let client = ExchangeClient::connect(config).await?;
            let swap_direction: SwapDirection = direction.into();
            let (quote, outcome) = match swap_direction {
                SwapDirection::NativeForToken => {
                    client.swap_native_for_token(amount_in, slippage_bps).await?
                }
                SwapDirection::TokenForNative => {
                    client.swap_token_for_native(amount_in, slippage_bps).await?
                }
            };
            info!("Swap confirmed: {:#x}", outcome.tx_hash);
            println!(
                "swapped {} for >= {} (tx {:#x})",
                units::format_amount(quote.amount_in, in_decimals)?,
                units::format_amount(quote.min_amount_out, out_decimals)?,
                outcome.tx_hash
            );
        }

        Command::AddLiquidity { base, paired } => {
            let base_amount = units::parse_amount(&base, defaults::NATIVE_DECIMALS)?;
            let paired_amount = paired
                .map(|p| units::parse_amount(&p, token_decimals))
                .transpose()?;

            let client = ExchangeClient::connect(config).await?;
            let outcome = client.add_liquidity(base_amount, paired_amount).await?;
            println!("liquidity added (tx {:#x})", outcome.tx_hash);
        }

        Command::RemoveLiquidity { shares } => {
            let lp_amount = units::parse_amount(&shares, defaults::NATIVE_DECIMALS)?;

            let client = ExchangeClient::connect(config).await?;
            let ((base, paired), outcome) = client.remove_liquidity(lp_amount).await?;
            println!(
                "withdrew {} native and {} tokens (tx {:#x})",
                units::format_amount(base, defaults::NATIVE_DECIMALS)?,
                units::format_amount(paired, token_decimals)?,
                outcome.tx_hash
            );
        }
    }

    Ok(())
}

/// (input, output) decimals for a swap direction. The native side is always
/// 18; the token side follows configuration.
fn decimals_for(direction: Direction, token_decimals: u8) -> (u8, u8) {
    match direction {
        Direction::NativeToToken => (defaults::NATIVE_DECIMALS, token_decimals),
        Direction::TokenToNative => (token_decimals, defaults::NATIVE_DECIMALS),
    }
}
