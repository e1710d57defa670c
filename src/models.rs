//! Shared data structures used throughout the application.

use bigdecimal::BigDecimal;

/// One resting bid in an order book snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BidLevel {
    pub price: BigDecimal,
    pub volume: BigDecimal,
}

impl BidLevel {
    pub fn new(price: BigDecimal, volume: BigDecimal) -> Self {
        Self { price, volume }
    }
}

/// Static order book snapshot. Bids are ordered best (highest) price first,
/// exactly as the venue returned them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderBook {
    /// Venue timestamp of the snapshot, in milliseconds since the epoch.
    pub timestamp: u64,
    pub bids: Vec<BidLevel>,
}

/// A single simulated sale against one (possibly partial) bid level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FillRecord {
    /// Base asset sold into the level.
    pub sold: BigDecimal,
    /// Level price, in quote units per base unit.
    pub rate: BigDecimal,
    /// Taker fee charged on the fill, in quote units.
    pub fee: BigDecimal,
    /// Quote proceeds after the taker fee.
    pub received: BigDecimal,
    /// Amount committed to the running received total. Equals `received` for
    /// whole-level fills; for the closing partial fill it is the exact
    /// remainder that was still needed.
    pub credited: BigDecimal,
    pub running_sold: BigDecimal,
    pub running_received_after_fee: BigDecimal,
    pub partial: bool,
}

/// Outcome of walking an order book towards a funding target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkResult {
    pub fills: Vec<FillRecord>,
    /// Target plus withdrawal fee: what the walk had to realise.
    pub target_with_fee: BigDecimal,
    pub total_sold: BigDecimal,
    pub total_received_after_fee: BigDecimal,
    /// Base asset to deposit so that `total_sold` remains after the receive fee.
    pub required_deposit: BigDecimal,
}

impl WalkResult {
    /// Quote amount still missing; zero when the target was met.
    pub fn shortfall(&self) -> BigDecimal {
        if self.total_received_after_fee >= self.target_with_fee {
            BigDecimal::from(0)
        } else {
            &self.target_with_fee - &self.total_received_after_fee
        }
    }
}
