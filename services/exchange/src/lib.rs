//! # Tidepool Exchange Client - Transaction Orchestrator
//!
//! ## Purpose
//!
//! Client-side glue between a user and the on-chain constant-product
//! exchange contract: reads reserves, balances, and share supply from the
//! ledger, prices operations locally through the pure [`amm`] engine before
//! anything is signed, and submits approve/swap/add/remove transactions with
//! confirmation tracking.
//!
//! ## Integration Points
//!
//! - **Input Sources**: JSON-RPC endpoints (primary plus fallbacks), user
//!   amounts as decimal strings converted at the boundary
//! - **Output Destinations**: Exchange and ERC-20 contracts via signed
//!   transactions; quotes and balances to the CLI
//! - **Ordering**: ERC-20 approvals are confirmed before the dependent
//!   swap or deposit is submitted; reserves are re-read fresh per operation
//!
//! ## Architecture Role
//!
//! ```text
//! User amounts → [units] → [LedgerReader snapshot] → [amm quotes] → [ExchangeClient]
//!                                                                        ↓
//!                                                       approve → confirm → swap/deposit → confirm
//! ```
//!
//! The pricing math itself lives in `libs/amm`; this crate owns everything
//! stateful: providers, wallets, contract handles, and transaction
//! lifecycles.

pub mod abi;
pub mod client;
pub mod reader;
pub mod units;

pub use client::{ExchangeClient, SwapDirection, SwapQuote, TxOutcome};
pub use reader::LedgerReader;
