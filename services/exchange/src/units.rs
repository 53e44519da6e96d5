//! Decimal boundary conversions
//!
//! User-facing amounts arrive as decimal strings and leave as smallest-unit
//! integers before any quote or transaction is constructed. This is the only
//! place decimals exist; everything past this module is exact `U256`
//! arithmetic, so binary floating point can never leak into a quote.

use anyhow::{bail, Context, Result};
use ethers::types::U256;
use ethers::utils::{format_units, parse_units, ParseUnits};

/// Parse a non-negative decimal amount into smallest units.
///
/// Rejects negative values, malformed numbers, and fractional parts finer
/// than `decimals`. Those are caller mistakes, not values to round.
pub fn parse_amount(amount: &str, decimals: u8) -> Result<U256> {
    let trimmed = amount.trim();
    if trimmed.starts_with('-') {
        bail!("amount {} is negative; amounts must be non-negative", amount);
    }

    match parse_units(trimmed, u32::from(decimals))
        .with_context(|| format!("amount {:?} is not a valid decimal", amount))?
    {
        ParseUnits::U256(value) => Ok(value),
        ParseUnits::I256(_) => bail!("amount {} is negative", amount),
    }
}

/// Render a smallest-unit amount as a decimal string for display.
pub fn format_amount(amount: U256, decimals: u8) -> Result<String> {
    format_units(amount, u32::from(decimals))
        .with_context(|| format!("cannot format {} with {} decimals", amount, decimals))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_whole_and_fractional() {
        assert_eq!(
            parse_amount("1.5", 18).unwrap(),
            U256::from(1_500_000_000_000_000_000u128)
        );
        assert_eq!(parse_amount("42", 6).unwrap(), U256::from(42_000_000u64));
    }

    #[test]
    fn parses_zero() {
        assert_eq!(parse_amount("0", 18).unwrap(), U256::zero());
        assert_eq!(parse_amount("0.0", 18).unwrap(), U256::zero());
    }

    #[test]
    fn rejects_negative() {
        assert!(parse_amount("-1", 18).is_err());
        assert!(parse_amount(" -0.5", 18).is_err());
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_amount("abc", 18).is_err());
        assert!(parse_amount("1.2.3", 18).is_err());
        assert!(parse_amount("", 18).is_err());
    }

    #[test]
    fn rejects_excess_precision() {
        // 19 fractional digits against 18 decimals
        assert!(parse_amount("0.0000000000000000001", 18).is_err());
    }

    #[test]
    fn formats_back_to_decimal() {
        let formatted = format_amount(U256::from(1_500_000_000_000_000_000u128), 18).unwrap();
        assert_eq!(formatted, "1.500000000000000000");
    }
}
