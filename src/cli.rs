//! Positional command-line arguments: `[amount] [slippage]`.

use std::str::FromStr;

use bigdecimal::BigDecimal;
use num_traits::Signed;

use crate::errors::{AppError, Result};

const DEFAULT_AMOUNT: &str = "500000";
const DEFAULT_SLIPPAGE: &str = "1";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    /// Quote amount to withdraw at the end of the chain.
    pub amount: BigDecimal,
    /// Multiplier applied to `amount` to leave headroom for price moves.
    pub slippage: BigDecimal,
}

impl CliArgs {
    /// Parse the arguments following the program name.
    pub fn parse<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut args = args.into_iter();
        let raw_amount = args.next();
        let raw_slippage = args.next();
        let amount = decimal_arg("amount", raw_amount.as_ref().map(|s| s.as_ref()), DEFAULT_AMOUNT)?;
        let slippage = decimal_arg(
            "slippage",
            raw_slippage.as_ref().map(|s| s.as_ref()),
            DEFAULT_SLIPPAGE,
        )?;
        let parsed = Self { amount, slippage };
        if !parsed.target().is_positive() {
            return Err(AppError::InvalidInput(format!(
                "amount x slippage must be positive, got {}",
                parsed.target()
            )));
        }
        Ok(parsed)
    }

    /// Top-level funding target.
    pub fn target(&self) -> BigDecimal {
        &self.amount * &self.slippage
    }
}

fn decimal_arg(name: &str, raw: Option<&str>, default: &str) -> Result<BigDecimal> {
    let raw = raw.unwrap_or(default);
    BigDecimal::from_str(raw.trim())
        .map_err(|_| AppError::InvalidInput(format!("{name} must be a number, got {raw:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    #[test]
    fn defaults_when_no_args() {
        let args = CliArgs::parse(Vec::<String>::new()).unwrap();
        assert_eq!(args.amount, d("500000"));
        assert_eq!(args.slippage, d("1"));
        assert_eq!(args.target(), d("500000"));
    }

    #[test]
    fn target_is_amount_times_slippage() {
        let args = CliArgs::parse(["1000", "1.05"]).unwrap();
        assert_eq!(args.target(), d("1050"));
    }

    #[test]
    fn rejects_non_numeric_and_non_positive() {
        assert!(matches!(
            CliArgs::parse(["lots"]),
            Err(AppError::InvalidInput(_))
        ));
        assert!(matches!(
            CliArgs::parse(["100", "x"]),
            Err(AppError::InvalidInput(_))
        ));
        assert!(matches!(CliArgs::parse(["0"]), Err(AppError::InvalidInput(_))));
        assert!(matches!(
            CliArgs::parse(["100", "-1"]),
            Err(AppError::InvalidInput(_))
        ));
    }
}
