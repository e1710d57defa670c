//! Rounding rules applied at every arithmetic step of the walk.
//!
//! Anything the seller receives is rounded down; anything the seller pays
//! or must sell is rounded up. Totals therefore never overstate what the
//! book can deliver.

use bigdecimal::{BigDecimal, RoundingMode};

/// Decimal places for crypto assets (BTC, XRP).
pub const CRYPTO_DP: i64 = 8;
/// Decimal places for fiat quote currencies (ZAR).
pub const FIAT_DP: i64 = 2;

/// Round `value` to `dp` places, away from zero.
pub fn round_up(value: &BigDecimal, dp: i64) -> BigDecimal {
    value.with_scale_round(dp, RoundingMode::Up)
}

/// Round `value` to `dp` places, towards zero.
pub fn round_down(value: &BigDecimal, dp: i64) -> BigDecimal {
    value.with_scale_round(dp, RoundingMode::Down)
}

/// Fixed-point rendering with exactly `dp` fractional digits.
pub fn to_fixed(value: &BigDecimal, dp: i64, mode: RoundingMode) -> String {
    let dp = dp.max(0);
    let (digits, _) = value.with_scale_round(dp, mode).as_bigint_and_exponent();
    let raw = digits.to_string();
    let (sign, magnitude) = match raw.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", raw.as_str()),
    };
    if dp == 0 {
        return format!("{sign}{magnitude}");
    }
    let width = dp as usize + 1;
    let padded = format!("{magnitude:0>width$}");
    let (int_part, frac_part) = padded.split_at(padded.len() - dp as usize);
    format!("{sign}{int_part}.{frac_part}")
}

/// Precision of a currency pair: base is the asset being sold, quote the
/// asset received.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Precision {
    pub base: i64,
    pub quote: i64,
}

impl Precision {
    pub const fn new(base: i64, quote: i64) -> Self {
        Self { base, quote }
    }

    /// Target-driven partial sale amount.
    pub fn sold(&self, value: &BigDecimal) -> BigDecimal {
        round_up(value, self.base)
    }

    pub fn fee(&self, value: &BigDecimal) -> BigDecimal {
        round_up(value, self.quote)
    }

    /// Proceeds after the taker fee.
    pub fn received(&self, value: &BigDecimal) -> BigDecimal {
        round_down(value, self.quote)
    }

    pub fn running_sold(&self, value: &BigDecimal) -> BigDecimal {
        round_up(value, self.base)
    }

    pub fn running_received(&self, value: &BigDecimal) -> BigDecimal {
        round_down(value, self.quote)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn d(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    #[test]
    fn rounding_directions() {
        assert_eq!(round_up(&d("1.001"), 2), d("1.01"));
        assert_eq!(round_down(&d("1.009"), 2), d("1.00"));
        assert_eq!(round_up(&d("1.00"), 2), d("1"));
        assert_eq!(round_up(&d("0.000000001"), 8), d("0.00000001"));
        assert_eq!(round_down(&d("0.000000009"), 8), d("0"));
    }

    #[test]
    fn pair_roles_round_to_their_side() {
        let p = Precision::new(CRYPTO_DP, FIAT_DP);
        assert_eq!(p.sold(&d("0.123456781")), d("0.12345679"));
        assert_eq!(p.fee(&d("10.001")), d("10.01"));
        assert_eq!(p.received(&d("989.999")), d("989.99"));
        assert_eq!(p.running_sold(&d("1.000000001")), d("1.00000001"));
        assert_eq!(p.running_received(&d("12.349")), d("12.34"));
    }

    #[test]
    fn fixed_rendering() {
        assert_eq!(to_fixed(&d("500"), 2, RoundingMode::Down), "500.00");
        assert_eq!(to_fixed(&d("0.5"), 8, RoundingMode::Down), "0.50000000");
        assert_eq!(to_fixed(&d("0.00002"), 8, RoundingMode::Up), "0.00002000");
        assert_eq!(to_fixed(&d("1.239"), 2, RoundingMode::Up), "1.24");
        assert_eq!(to_fixed(&d("-1.5"), 1, RoundingMode::Down), "-1.5");
        assert_eq!(to_fixed(&d("7.9"), 0, RoundingMode::Down), "7");
    }
}
