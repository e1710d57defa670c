use bigdecimal::BigDecimal;
use thiserror::Error;

use crate::models::WalkResult;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Non-success HTTP status from an order-book endpoint.
    #[error("Fetch error {status}: {body}")]
    Fetch { status: u16, body: String },

    /// The venue answered 2xx but reported an error in the payload.
    #[error("Venue error: {0}")]
    Venue(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Every bid was consumed without reaching the target. Carries the
    /// partial walk so the caller can show how far it got.
    #[error(
        "Order book exhausted: {} of {required} realised",
        .walk.total_received_after_fee
    )]
    BookExhausted {
        required: BigDecimal,
        walk: Box<WalkResult>,
    },
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Parse(e.to_string())
    }
}

impl From<bigdecimal::ParseBigDecimalError> for AppError {
    fn from(e: bigdecimal::ParseBigDecimalError) -> Self {
        AppError::Parse(e.to_string())
    }
}
