//! # Tidepool Centralized Configuration
//!
//! This crate provides configuration management and chain constants for the
//! exchange client and deployment scripts, so addresses, fees, and endpoints
//! live in one place instead of being duplicated per binary.
//!
//! ## Features
//!
//! - **Chain Constants**: default RPC endpoints, deployed contract addresses,
//!   decimals, and the pool fee the targeted contract charges
//! - **Client Configuration**: TOML file loading with environment-variable
//!   overrides and validation
//! - **Wallet Handling**: signing keys are sourced from the environment only,
//!   never from configuration files
//!
//! ## Usage
//!
//! ```rust,no_run
//! use config::ClientConfig;
//!
//! let cfg = ClientConfig::load(None).unwrap();
//! println!("exchange at {}", cfg.exchange.exchange_address);
//! ```

pub mod chain;
pub mod client_config;

pub use chain::defaults;
pub use client_config::{ChainConfig, ClientConfig, ExchangeConfig, WalletConfig};
