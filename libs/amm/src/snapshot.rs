//! Pool snapshot type carried across the quote boundary

use ethereum_types::U256;
use serde::{Deserialize, Serialize};

use crate::error::AmmError;
use crate::pool_math::{PoolMath, DEFAULT_FEE_BPS};

/// Point-in-time view of a pool's reserves and share supply.
///
/// The ledger reader assembles one of these fresh per call; the engine never
/// caches reserves, so a stale snapshot is the caller's bug, not this
/// crate's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolSnapshot {
    /// Reserve of the base asset (the chain's native currency)
    pub base_reserve: U256,
    /// Reserve of the paired ERC-20 asset
    pub paired_reserve: U256,
    /// Total outstanding LP shares
    pub lp_total_supply: U256,
    /// Fee in basis points retained by the contract on every swap
    pub fee_bps: u32,
}

impl PoolSnapshot {
    pub fn new(base_reserve: U256, paired_reserve: U256, lp_total_supply: U256) -> Self {
        Self {
            base_reserve,
            paired_reserve,
            lp_total_supply,
            fee_bps: DEFAULT_FEE_BPS,
        }
    }

    /// A pool with no liquidity on either side has never been seeded.
    pub fn is_uninitialized(&self) -> bool {
        self.base_reserve.is_zero() && self.paired_reserve.is_zero()
    }

    /// Output of swapping `base_in` of the base asset for the paired asset.
    pub fn quote_base_for_paired(&self, base_in: U256) -> Result<U256, AmmError> {
        PoolMath::quote_swap_output(base_in, self.base_reserve, self.paired_reserve, self.fee_bps)
    }

    /// Output of swapping `paired_in` of the paired asset for the base asset.
    pub fn quote_paired_for_base(&self, paired_in: U256) -> Result<U256, AmmError> {
        PoolMath::quote_swap_output(paired_in, self.paired_reserve, self.base_reserve, self.fee_bps)
    }

    /// Paired-asset deposit required alongside `base_amount` to keep the
    /// pool ratio unchanged. Not meaningful for the first liquidity event.
    pub fn required_paired_deposit(&self, base_amount: U256) -> Result<U256, AmmError> {
        PoolMath::quote_liquidity_add(base_amount, self.base_reserve, self.paired_reserve)
    }

    /// Amounts of (base, paired) returned for burning `lp_amount` shares.
    pub fn quote_withdrawal(&self, lp_amount: U256) -> Result<(U256, U256), AmmError> {
        PoolMath::quote_liquidity_remove(
            lp_amount,
            self.base_reserve,
            self.paired_reserve,
            self.lp_total_supply,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_quotes_both_swap_directions() {
        let snap = PoolSnapshot::new(U256::from(1000), U256::from(1000), U256::from(1000));
        assert_eq!(
            snap.quote_base_for_paired(U256::from(100)).unwrap(),
            U256::from(90)
        );
        assert_eq!(
            snap.quote_paired_for_base(U256::from(100)).unwrap(),
            U256::from(90)
        );
    }

    #[test]
    fn fresh_pool_is_uninitialized() {
        let snap = PoolSnapshot::new(U256::zero(), U256::zero(), U256::zero());
        assert!(snap.is_uninitialized());
        assert_eq!(
            snap.quote_base_for_paired(U256::from(1)),
            Err(AmmError::UninitializedPool)
        );
        assert_eq!(snap.quote_withdrawal(U256::from(1)).unwrap(), (U256::zero(), U256::zero()));
    }
}
