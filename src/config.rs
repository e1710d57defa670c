//! Configuration loader and application settings.
//!
//! Every fee can be overridden from the environment (or a `.env` file).
//! Unset or empty variables fall back to the defaults below; values that are
//! set but malformed are rejected.

use std::str::FromStr;
use std::time::Duration;

use bigdecimal::BigDecimal;
use num_traits::{One, Signed};
use url::Url;

use crate::errors::{AppError, Result};
use crate::planner::PlannerConfig;
use crate::planner::policy::{CRYPTO_DP, FIAT_DP, Precision};

const LUNO_ORDER_BOOK_URL: &str = "https://api.mybitx.com/api/1/orderbook?pair=XBTZAR";
const BITSTAMP_ORDER_BOOK_URL: &str = "https://www.bitstamp.net/api/v2/order_book/xrpbtc/";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// Consolidated application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// First hop: sell BTC for ZAR.
    pub luno: VenueConfig,
    /// Second hop: sell XRP for the BTC the first hop needs.
    pub bitstamp: VenueConfig,
    pub http_timeout: Duration,
}

/// Fees, precision and endpoint for one venue/pair.
#[derive(Debug, Clone)]
pub struct VenueConfig {
    pub name: &'static str,
    pub pair: &'static str,
    /// Asset being sold.
    pub base_asset: &'static str,
    /// Asset being bought and later withdrawn.
    pub quote_asset: &'static str,
    pub precision: Precision,
    /// Decimal places of the "Received" running-total column.
    pub summary_dp: i64,
    pub taker_fee: BigDecimal,
    /// Charged in quote units.
    pub withdrawal_fee: BigDecimal,
    /// Charged in base units.
    pub receive_fee: BigDecimal,
    pub order_book_url: Url,
}

impl VenueConfig {
    pub fn planner_config(&self) -> PlannerConfig {
        PlannerConfig {
            precision: self.precision,
            taker_fee: self.taker_fee.clone(),
            withdrawal_fee: self.withdrawal_fee.clone(),
            receive_fee: self.receive_fee.clone(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        Self::from_lookup(non_empty_var)
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let luno = VenueConfig {
            name: "Luno",
            pair: "XBTZAR",
            base_asset: "BTC",
            quote_asset: "ZAR",
            precision: Precision::new(CRYPTO_DP, FIAT_DP),
            summary_dp: FIAT_DP,
            taker_fee: fee_var(&lookup, "LUNO_TAKER_FEE", "0.01")?,
            withdrawal_fee: fee_var(&lookup, "LUNO_ZAR_WITHDRAW_FEE", "8.50")?,
            receive_fee: fee_var(&lookup, "LUNO_BTC_RECEIVE_FEE", "0.00002")?,
            order_book_url: url_var(&lookup, "LUNO_ORDER_BOOK_URL", LUNO_ORDER_BOOK_URL)?,
        };
        let bitstamp = VenueConfig {
            name: "Bitstamp",
            pair: "XRPBTC",
            base_asset: "XRP",
            quote_asset: "BTC",
            precision: Precision::new(CRYPTO_DP, CRYPTO_DP),
            summary_dp: CRYPTO_DP,
            taker_fee: fee_var(&lookup, "BITSTAMP_TAKER_FEE", "0.0025")?,
            withdrawal_fee: fee_var(&lookup, "BITSTAMP_BTC_WITHDRAW_FEE", "0")?,
            receive_fee: fee_var(&lookup, "BITSTAMP_XRP_RECEIVE_FEE", "0")?,
            order_book_url: url_var(&lookup, "BITSTAMP_ORDER_BOOK_URL", BITSTAMP_ORDER_BOOK_URL)?,
        };
        for venue in [&luno, &bitstamp] {
            if venue.taker_fee >= BigDecimal::one() {
                return Err(AppError::Config(format!(
                    "{} taker fee must be below 1, got {}",
                    venue.name, venue.taker_fee
                )));
            }
        }

        let http_timeout = match lookup("HTTP_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|e| {
                AppError::Config(format!("HTTP_TIMEOUT_SECS must be whole seconds: {e}"))
            })?,
            None => DEFAULT_HTTP_TIMEOUT_SECS,
        };

        Ok(Self {
            luno,
            bitstamp,
            http_timeout: Duration::from_secs(http_timeout),
        })
    }
}

/// Returns the value of an environment variable if it exists and is non-empty.
fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

fn fee_var<F>(lookup: &F, name: &str, default: &str) -> Result<BigDecimal>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(name).unwrap_or_else(|| default.to_string());
    let value = BigDecimal::from_str(raw.trim())
        .map_err(|e| AppError::Config(format!("{name} must be a decimal: {e}")))?;
    if value.is_negative() {
        return Err(AppError::Config(format!("{name} must not be negative")));
    }
    Ok(value)
}

fn url_var<F>(lookup: &F, name: &str, default: &str) -> Result<Url>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(name).unwrap_or_else(|| default.to_string());
    Ok(Url::parse(raw.trim())?)
}
