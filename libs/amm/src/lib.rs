//! # Tidepool AMM Library - Constant-Product Pricing Engine
//!
//! ## Purpose
//!
//! Pure mathematical library for constant-product (`x * y = k`) pool
//! calculations: swap output pricing with fee application, proportional
//! liquidity-add sizing, and proportional liquidity-remove sizing. All
//! arithmetic is integer-only over 256-bit ledger units with 512-bit
//! intermediates, so a quote computed here matches the truncating integer
//! arithmetic of the on-chain exchange contract exactly.
//!
//! ## Integration Points
//!
//! - **Input Sources**: Fresh reserve/supply snapshots from the ledger reader
//! - **Output Destinations**: Exchange client for pre-transaction estimates,
//!   slippage bounds, and UI display
//! - **Precision**: Smallest-unit integers end to end; no floating point and
//!   no decimal rounding anywhere in the quote path
//!
//! ## Architecture Role
//!
//! The engine holds no state and performs no I/O. Every quote is a pure
//! function of caller-supplied reserves, so calls may run concurrently with
//! no coordination. Pool lifecycle (uninitialized, seeded, active) is owned
//! by the ledger; this crate only reports when a quote is impossible for the
//! snapshot it was handed.

pub mod error;
pub mod pool_math;
pub mod snapshot;

pub use error::AmmError;
pub use pool_math::{PoolMath, DEFAULT_FEE_BPS, FEE_DENOMINATOR_BPS};
pub use snapshot::PoolSnapshot;

/// Ledger amount type shared across the quote boundary
pub use ethereum_types::U256;
