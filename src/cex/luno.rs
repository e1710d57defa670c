use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::info;
use url::Url;

use super::{OrderBookSource, get_json, parse_level};
use crate::errors::Result;
use crate::models::OrderBook;

#[derive(Debug, Deserialize)]
struct LunoBook {
    /// Milliseconds since the epoch.
    timestamp: u64,
    bids: Vec<LunoLevel>,
}

#[derive(Debug, Deserialize)]
struct LunoLevel {
    price: String,
    volume: String,
}

/// Luno public order book (`/api/1/orderbook?pair=...`).
#[derive(Debug, Clone)]
pub struct Luno {
    client: Client,
    url: Url,
}

impl Luno {
    pub fn new(client: Client, url: Url) -> Self {
        Self { client, url }
    }
}

impl OrderBookSource for Luno {
    fn name(&self) -> &str {
        "Luno"
    }

    async fn fetch_order_book(&self) -> Result<OrderBook> {
        info!(url = %self.url, "[CEX] Luno: getting order book");
        let book = parse_order_book(get_json(&self.client, &self.url).await?)?;
        info!(
            timestamp = book.timestamp,
            bids = book.bids.len(),
            "[CEX] Luno: got order book"
        );
        Ok(book)
    }
}

/// Convert a Luno order book payload.
pub fn parse_order_book(value: Value) -> Result<OrderBook> {
    let raw: LunoBook = serde_json::from_value(value)?;
    let bids = raw
        .bids
        .iter()
        .map(|lvl| parse_level(&lvl.price, &lvl.volume))
        .collect::<Result<Vec<_>>>()?;
    Ok(OrderBook {
        timestamp: raw.timestamp,
        bids,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;
    use bigdecimal::BigDecimal;
    use std::str::FromStr;

    #[test]
    fn parses_bids_in_payload_order() {
        let raw = r#"{
            "timestamp": 1528702276223,
            "bids": [
                {"price": "101000.00", "volume": "0.25"},
                {"price": "100999.00", "volume": "1.051"}
            ],
            "asks": [{"price": "101500.00", "volume": "0.1"}]
        }"#;
        let book = parse_order_book(serde_json::from_str(raw).unwrap()).unwrap();
        assert_eq!(book.timestamp, 1528702276223);
        assert_eq!(book.bids.len(), 2);
        assert_eq!(book.bids[0].price, BigDecimal::from_str("101000").unwrap());
        assert_eq!(book.bids[1].volume, BigDecimal::from_str("1.051").unwrap());
    }

    #[test]
    fn bad_level_fails_whole_book() {
        let raw = r#"{"timestamp": 1, "bids": [{"price": "x", "volume": "1"}]}"#;
        let err = parse_order_book(serde_json::from_str(raw).unwrap()).unwrap_err();
        assert!(matches!(err, AppError::Parse(_)));
    }

    #[test]
    fn missing_bids_is_parse_error() {
        let raw = r#"{"timestamp": 1}"#;
        let err = parse_order_book(serde_json::from_str(raw).unwrap()).unwrap_err();
        assert!(matches!(err, AppError::Parse(_)));
    }
}
