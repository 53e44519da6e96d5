//! Quote failure taxonomy
//!
//! Every failure is surfaced as a typed error distinct from a legitimate
//! zero-valued quote: an empty-pool withdrawal previews as `(0, 0)` and is a
//! success, while a swap against an unseeded pool is an error, never a zero.

use thiserror::Error;

/// Errors returned by the pricing engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AmmError {
    /// A swap was quoted against a pool with an empty reserve. The ledger
    /// considers the pool uninitialized until both reserves are nonzero.
    #[error("pool uninitialized: swap requires both reserves to be nonzero")]
    UninitializedPool,

    /// Liquidity-add sizing was asked to preserve a ratio against a zero
    /// base reserve. The first-liquidity case is the caller's to handle;
    /// reaching this function with an empty base reserve is a precondition
    /// violation, not a zero-valued answer.
    #[error("division by zero: base reserve is empty")]
    DivisionByZero,

    /// The quoted amount does not fit in 256 bits after widening.
    #[error("quoted amount overflows 256 bits")]
    Overflow,

    /// Fee exceeds the basis-point denominator.
    #[error("invalid fee: {0} bps exceeds {max} bps", max = crate::FEE_DENOMINATOR_BPS)]
    InvalidFee(u32),
}
