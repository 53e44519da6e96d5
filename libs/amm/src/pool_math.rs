//! Constant-product pool math with exact integer arithmetic
//!
//! All quotes reproduce the exchange contract's `x * y = k` arithmetic
//! bit-for-bit: amounts are 256-bit smallest-unit integers, products widen to
//! 512 bits, and every division truncates toward zero. Truncation always
//! rounds in the pool's favor (the caller receives the floor).

use ethereum_types::{U256, U512};

use crate::error::AmmError;

/// Basis-point denominator for fee math
pub const FEE_DENOMINATOR_BPS: u32 = 10_000;

/// Fee retained by the targeted exchange contract: 100 bps (1%), i.e. 99%
/// of the input is treated as effective input. Pin this per deployment via
/// configuration rather than assuming the default matches your contract.
pub const DEFAULT_FEE_BPS: u32 = 100;

/// Stateless constant-product pricing functions
pub struct PoolMath;

impl PoolMath {
    /// Quote the output amount of a swap using the `x * y = k` formula.
    ///
    /// The fee is applied to the input before the invariant is solved, in
    /// the scaled form the contract itself uses (single truncation):
    ///
    /// ```text
    /// out = (in * (10000 - fee_bps) * reserve_out)
    ///       / (reserve_in * 10000 + in * (10000 - fee_bps))
    /// ```
    ///
    /// # Arguments
    /// * `amount_in` - Input amount in smallest units
    /// * `reserve_in` - Pool reserve of the asset being deposited
    /// * `reserve_out` - Pool reserve of the asset being withdrawn
    /// * `fee_bps` - Fee in basis points (100 = 1%)
    ///
    /// # Returns
    /// Output amount, guaranteed strictly less than `reserve_out`. A swap
    /// can never fully drain the pool.
    ///
    /// # Errors
    /// `UninitializedPool` when either reserve is zero; `InvalidFee` when
    /// `fee_bps` exceeds the basis-point denominator.
    pub fn quote_swap_output(
        amount_in: U256,
        reserve_in: U256,
        reserve_out: U256,
        fee_bps: u32,
    ) -> Result<U256, AmmError> {
        if fee_bps > FEE_DENOMINATOR_BPS {
            return Err(AmmError::InvalidFee(fee_bps));
        }
        if reserve_in.is_zero() || reserve_out.is_zero() {
            return Err(AmmError::UninitializedPool);
        }

        let keep = U256::from(FEE_DENOMINATOR_BPS - fee_bps);
        let denominator_bps = U256::from(FEE_DENOMINATOR_BPS);

        // in * keep fits 512 bits; multiplying by reserve_out can exceed
        // them, so that step stays checked.
        let amount_in_scaled = amount_in.full_mul(keep);
        let numerator = amount_in_scaled
            .checked_mul(U512::from(reserve_out))
            .ok_or(AmmError::Overflow)?;
        let denominator = reserve_in.full_mul(denominator_bps) + amount_in_scaled;

        // denominator > 0 since reserve_in > 0, and the quotient is bounded
        // by reserve_out, so narrowing cannot fail.
        let output = numerator / denominator;
        U256::try_from(output).map_err(|_| AmmError::Overflow)
    }

    /// Size the paired-asset deposit that preserves the pool ratio for a
    /// given base-asset deposit: `floor(base_amount * paired_reserve / base_reserve)`.
    ///
    /// The first-liquidity case (`base_reserve == 0` on a fresh pool) has no
    /// ratio to preserve and must be handled by the caller, who supplies
    /// both amounts directly; reaching this function with an empty base
    /// reserve fails with `DivisionByZero` rather than silently quoting 0.
    pub fn quote_liquidity_add(
        base_amount: U256,
        base_reserve: U256,
        paired_reserve: U256,
    ) -> Result<U256, AmmError> {
        if base_reserve.is_zero() {
            return Err(AmmError::DivisionByZero);
        }

        let paired = base_amount.full_mul(paired_reserve) / U512::from(base_reserve);
        U256::try_from(paired).map_err(|_| AmmError::Overflow)
    }

    /// Size the withdrawal for burning `lp_amount` shares:
    /// `(floor(lp * base_reserve / supply), floor(lp * paired_reserve / supply))`.
    ///
    /// An empty pool (`lp_total_supply == 0`) previews as `(0, 0)`: there
    /// is nothing to withdraw, which is a valid state, not an error. The
    /// ledger enforces `lp_amount <= lp_total_supply`; this function does
    /// not re-check share ownership.
    pub fn quote_liquidity_remove(
        lp_amount: U256,
        base_reserve: U256,
        paired_reserve: U256,
        lp_total_supply: U256,
    ) -> Result<(U256, U256), AmmError> {
        if lp_total_supply.is_zero() {
            return Ok((U256::zero(), U256::zero()));
        }

        let supply = U512::from(lp_total_supply);
        let base = lp_amount.full_mul(base_reserve) / supply;
        let paired = lp_amount.full_mul(paired_reserve) / supply;

        Ok((
            U256::try_from(base).map_err(|_| AmmError::Overflow)?,
            U256::try_from(paired).map_err(|_| AmmError::Overflow)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn u(v: u64) -> U256 {
        U256::from(v)
    }

    #[test]
    fn swap_output_matches_contract_arithmetic() {
        // 100 in against 1000:1000 reserves, 1% fee -> effective input 99,
        // floor(99 * 1000 / 1099) = 90
        let out = PoolMath::quote_swap_output(u(100), u(1000), u(1000), 100).unwrap();
        assert_eq!(out, u(90));
    }

    #[test]
    fn swap_output_zero_input_is_zero() {
        let out = PoolMath::quote_swap_output(u(0), u(1000), u(2000), 100).unwrap();
        assert_eq!(out, U256::zero());
    }

    #[test]
    fn swap_never_drains_reserve() {
        // Absurdly large input still leaves the out reserve nonzero
        let out = PoolMath::quote_swap_output(U256::MAX, u(1), u(7), 100).unwrap();
        assert!(out < u(7));
    }

    #[test]
    fn swap_zero_reserve_is_uninitialized() {
        assert_eq!(
            PoolMath::quote_swap_output(u(10), u(0), u(1000), 100),
            Err(AmmError::UninitializedPool)
        );
        assert_eq!(
            PoolMath::quote_swap_output(u(10), u(1000), u(0), 100),
            Err(AmmError::UninitializedPool)
        );
    }

    #[test]
    fn swap_rejects_fee_above_denominator() {
        assert_eq!(
            PoolMath::quote_swap_output(u(10), u(1000), u(1000), 10_001),
            Err(AmmError::InvalidFee(10_001))
        );
    }

    #[test]
    fn swap_full_fee_quotes_zero() {
        let out = PoolMath::quote_swap_output(u(100), u(1000), u(1000), 10_000).unwrap();
        assert_eq!(out, U256::zero());
    }

    #[test]
    fn liquidity_add_preserves_ratio() {
        // 5 base against 100:200 reserves -> floor(5 * 200 / 100) = 10
        let paired = PoolMath::quote_liquidity_add(u(5), u(100), u(200)).unwrap();
        assert_eq!(paired, u(10));
    }

    #[test]
    fn liquidity_add_zero_amount_is_zero() {
        let paired = PoolMath::quote_liquidity_add(u(0), u(100), u(200)).unwrap();
        assert_eq!(paired, U256::zero());
    }

    #[test]
    fn liquidity_add_truncates_toward_zero() {
        // floor(7 * 100 / 3) = 233
        let paired = PoolMath::quote_liquidity_add(u(7), u(3), u(100)).unwrap();
        assert_eq!(paired, u(233));
    }

    #[test]
    fn liquidity_add_empty_base_reserve_fails() {
        assert_eq!(
            PoolMath::quote_liquidity_add(u(5), u(0), u(200)),
            Err(AmmError::DivisionByZero)
        );
    }

    #[test]
    fn liquidity_add_can_overflow() {
        assert_eq!(
            PoolMath::quote_liquidity_add(U256::MAX, u(1), U256::MAX),
            Err(AmmError::Overflow)
        );
    }

    #[test]
    fn liquidity_remove_is_proportional() {
        // 50 of 200 shares against 1000:2000 reserves -> (250, 500)
        let (base, paired) =
            PoolMath::quote_liquidity_remove(u(50), u(1000), u(2000), u(200)).unwrap();
        assert_eq!(base, u(250));
        assert_eq!(paired, u(500));
    }

    #[test]
    fn liquidity_remove_empty_pool_is_zero_not_error() {
        let (base, paired) =
            PoolMath::quote_liquidity_remove(u(50), u(1000), u(2000), u(0)).unwrap();
        assert_eq!((base, paired), (U256::zero(), U256::zero()));
    }

    #[test]
    fn liquidity_remove_all_shares_returns_all_reserves() {
        let (base, paired) =
            PoolMath::quote_liquidity_remove(u(200), u(1000), u(2000), u(200)).unwrap();
        assert_eq!((base, paired), (u(1000), u(2000)));
    }

    #[test]
    fn liquidity_remove_handles_max_reserves() {
        let (base, paired) =
            PoolMath::quote_liquidity_remove(u(1), U256::MAX, U256::MAX, u(2)).unwrap();
        assert_eq!(base, U256::MAX / 2);
        assert_eq!(paired, U256::MAX / 2);
    }
}
