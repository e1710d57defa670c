//! CEX order-book sources.
//!
//! Responsibilities:
//! • Fetch a single order book snapshot over HTTPS.
//! • Reject non-success responses and venue-reported errors.
//! • Turn the venue payload into `BidLevel`s without reordering them.

use std::future::Future;
use std::str::FromStr;
use std::time::Duration;

use bigdecimal::BigDecimal;
use num_traits::Signed;
use reqwest::{Client, header};
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::errors::{AppError, Result};
use crate::models::{BidLevel, OrderBook};

pub mod bitstamp;
pub mod luno;

pub use bitstamp::Bitstamp;
pub use luno::Luno;

/// Anything that can hand out an order book snapshot.
pub trait OrderBookSource {
    fn name(&self) -> &str;

    fn fetch_order_book(&self) -> impl Future<Output = Result<OrderBook>> + Send;
}

/// Build the HTTP client shared by all venues.
pub fn http_client(timeout: Duration) -> Result<Client> {
    let mut headers = header::HeaderMap::new();
    headers.insert(
        header::ACCEPT,
        header::HeaderValue::from_static("application/json"),
    );
    headers.insert(
        header::ACCEPT_CHARSET,
        header::HeaderValue::from_static("utf-8"),
    );
    Ok(Client::builder()
        .timeout(timeout)
        .default_headers(headers)
        .build()?)
}

/// GET `url` and return the JSON body.
pub async fn get_json(client: &Client, url: &Url) -> Result<Value> {
    debug!(%url, "[CEX] GET");
    let response = client.get(url.clone()).send().await?;
    let status = response.status();
    let body = response.text().await?;
    decode_body(status.as_u16(), &body)
}

/// Check the status and payload of a venue response.
pub fn decode_body(status: u16, body: &str) -> Result<Value> {
    if !(200..300).contains(&status) {
        return Err(AppError::Fetch {
            status,
            body: body.to_string(),
        });
    }
    let value: Value = serde_json::from_str(body)?;
    if let Some(err) = venue_error(&value) {
        return Err(AppError::Venue(err));
    }
    Ok(value)
}

fn venue_error(value: &Value) -> Option<String> {
    match value.get("error") {
        Some(Value::Null) | Some(Value::Bool(false)) | None => {}
        Some(Value::String(msg)) if msg.is_empty() => {}
        Some(Value::String(msg)) => return Some(msg.clone()),
        Some(other) => return Some(other.to_string()),
    }
    if value.get("status").and_then(Value::as_str) == Some("error") {
        let reason = value
            .get("reason")
            .map(|r| r.to_string())
            .unwrap_or_else(|| "unknown error".to_string());
        return Some(reason);
    }
    None
}

/// Parse one bid from its string price and volume.
pub fn parse_level(price: &str, volume: &str) -> Result<BidLevel> {
    let price = BigDecimal::from_str(price.trim())?;
    let volume = BigDecimal::from_str(volume.trim())?;
    if price.is_negative() || volume.is_negative() {
        return Err(AppError::InvalidInput(format!(
            "negative bid level {volume} @ {price}"
        )));
    }
    Ok(BidLevel::new(price, volume))
}
