use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::info;
use url::Url;

use super::{OrderBookSource, get_json, parse_level};
use crate::errors::{AppError, Result};
use crate::models::OrderBook;

#[derive(Debug, Deserialize)]
struct BitstampBook {
    /// Seconds since the epoch, as a string.
    timestamp: String,
    #[serde(default)]
    microtimestamp: Option<String>,
    bids: Vec<[String; 2]>,
}

/// Bitstamp public order book (`/api/v2/order_book/{pair}/`).
#[derive(Debug, Clone)]
pub struct Bitstamp {
    client: Client,
    url: Url,
}

impl Bitstamp {
    pub fn new(client: Client, url: Url) -> Self {
        Self { client, url }
    }
}

impl OrderBookSource for Bitstamp {
    fn name(&self) -> &str {
        "Bitstamp"
    }

    async fn fetch_order_book(&self) -> Result<OrderBook> {
        info!(url = %self.url, "[CEX] Bitstamp: getting order book");
        let book = parse_order_book(get_json(&self.client, &self.url).await?)?;
        info!(
            timestamp = book.timestamp,
            bids = book.bids.len(),
            "[CEX] Bitstamp: got order book"
        );
        Ok(book)
    }
}

/// Convert a Bitstamp order book payload. Levels are `[price, amount]`.
pub fn parse_order_book(value: Value) -> Result<OrderBook> {
    let raw: BitstampBook = serde_json::from_value(value)?;
    let timestamp = match raw.microtimestamp.as_deref() {
        Some(micros) => parse_u64(micros)? / 1_000,
        None => parse_u64(&raw.timestamp)?.checked_mul(1_000).ok_or_else(|| {
            AppError::Parse(format!("timestamp {:?} out of range", raw.timestamp))
        })?,
    };
    let bids = raw
        .bids
        .iter()
        .map(|lvl| parse_level(&lvl[0], &lvl[1]))
        .collect::<Result<Vec<_>>>()?;
    Ok(OrderBook { timestamp, bids })
}

fn parse_u64(raw: &str) -> Result<u64> {
    raw.trim()
        .parse()
        .map_err(|e| AppError::Parse(format!("bad timestamp {raw:?}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bigdecimal::BigDecimal;
    use std::str::FromStr;

    #[test]
    fn parses_array_levels() {
        let raw = r#"{
            "timestamp": "1528702276",
            "bids": [["0.00007412", "1520.50000000"], ["0.00007411", "300"]],
            "asks": [["0.00007420", "10"]]
        }"#;
        let book = parse_order_book(serde_json::from_str(raw).unwrap()).unwrap();
        assert_eq!(book.timestamp, 1_528_702_276_000);
        assert_eq!(book.bids.len(), 2);
        assert_eq!(book.bids[0].price, BigDecimal::from_str("0.00007412").unwrap());
        assert_eq!(book.bids[0].volume, BigDecimal::from_str("1520.5").unwrap());
    }

    #[test]
    fn prefers_microtimestamp() {
        let raw = r#"{
            "timestamp": "1528702276",
            "microtimestamp": "1528702276123456",
            "bids": []
        }"#;
        let book = parse_order_book(serde_json::from_str(raw).unwrap()).unwrap();
        assert_eq!(book.timestamp, 1_528_702_276_123);
        assert!(book.bids.is_empty());
    }

    #[test]
    fn oversized_timestamp_is_parse_error() {
        let raw = r#"{"timestamp": "18446744073709552", "bids": []}"#;
        assert!(matches!(
            parse_order_book(serde_json::from_str(raw).unwrap()),
            Err(AppError::Parse(_))
        ));
    }

    #[test]
    fn rejects_bad_timestamp_and_short_levels() {
        let raw = r#"{"timestamp": "soon", "bids": []}"#;
        assert!(matches!(
            parse_order_book(serde_json::from_str(raw).unwrap()),
            Err(AppError::Parse(_))
        ));

        let raw = r#"{"timestamp": "1", "bids": [["0.1"]]}"#;
        assert!(matches!(
            parse_order_book(serde_json::from_str(raw).unwrap()),
            Err(AppError::Parse(_))
        ));
    }
}
