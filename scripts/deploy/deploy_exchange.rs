//! Deploy the exchange contract
//!
//! Reads a compiled contract artifact (solc/hardhat JSON with `abi` and
//! `bytecode`), deploys it with the paired token address as the constructor
//! argument, and prints the deployed address. The signing key comes from the
//! environment variable named in the wallet configuration.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use ethers::abi::Abi;
use ethers::contract::ContractFactory;
use ethers::prelude::*;
use ethers::providers::Http;
use serde::Deserialize;
use tracing::info;

use config::ClientConfig;

#[derive(Parser)]
#[command(name = "deploy_exchange", about = "Deploy the exchange contract")]
struct Args {
    /// Path to the compiled contract artifact (JSON with abi + bytecode)
    #[arg(long)]
    artifact: PathBuf,

    /// Paired token address; defaults to the configured one
    #[arg(long)]
    token: Option<String>,

    /// Path to a TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,
}

/// The subset of a hardhat/solc artifact the deployment needs. `bytecode`
/// is either a hex string or an object with an `object` field depending on
/// the compiler that produced it.
#[derive(Deserialize)]
struct Artifact {
    abi: Abi,
    bytecode: BytecodeField,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum BytecodeField {
    Plain(String),
    Solc { object: String },
}

impl BytecodeField {
    fn into_bytes(self) -> Result<Bytes> {
        let hex = match self {
            BytecodeField::Plain(s) => s,
            BytecodeField::Solc { object } => object,
        };
        hex.parse::<Bytes>()
            .map_err(|e| anyhow!("artifact bytecode is not valid hex: {}", e))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let config = ClientConfig::load(args.config.as_deref())?;

    let raw = std::fs::read_to_string(&args.artifact)
        .with_context(|| format!("Failed to read artifact {:?}", args.artifact))?;
    let artifact: Artifact =
        serde_json::from_str(&raw).context("Artifact is not a valid contract JSON")?;
    let bytecode = artifact.bytecode.into_bytes()?;
    if bytecode.is_empty() {
        bail!("artifact contains empty bytecode; was the contract compiled?");
    }

    let token_address: Address = args
        .token
        .as_deref()
        .unwrap_or(&config.exchange.token_address)
        .parse()
        .context("Invalid token address")?;

    let provider = Provider::<Http>::try_from(config.chain.rpc_url.as_str())
        .context("Invalid RPC URL")?
        .interval(Duration::from_millis(config.chain.poll_interval_ms));
    let wallet = config
        .private_key()?
        .parse::<LocalWallet>()
        .context("Invalid private key format")?
        .with_chain_id(config.chain.chain_id);
    let client = Arc::new(SignerMiddleware::new(provider, wallet));

    info!(
        "Deploying exchange with token {:#x} via {}",
        token_address, config.chain.rpc_url
    );

    let factory = ContractFactory::new(artifact.abi, bytecode, client);
    let contract = factory
        .deploy(token_address)
        .context("Failed to encode constructor arguments")?
        .send()
        .await
        .context("Deployment transaction failed")?;

    info!("Deployment confirmed");
    println!("Exchange Contract Address: {:#x}", contract.address());

    Ok(())
}
