//! Two-hop conversion: the deposit one venue needs becomes the withdrawal
//! target of the venue before it.

use bigdecimal::BigDecimal;
use tracing::info;

use crate::cex::OrderBookSource;
use crate::config::VenueConfig;
use crate::errors::Result;
use crate::models::{OrderBook, WalkResult};
use crate::planner::FillPlanner;

/// One planned hop of the chain.
#[derive(Debug, Clone)]
pub struct HopPlan<'a> {
    pub venue: &'a VenueConfig,
    /// Quote amount to withdraw from this venue.
    pub target: BigDecimal,
    pub walk: WalkResult,
}

impl HopPlan<'_> {
    /// Base amount to deposit here, which the next hop must produce.
    pub fn next_target(&self) -> BigDecimal {
        self.walk.required_deposit.clone()
    }
}

/// Fetch both snapshots concurrently. Fails as soon as either fetch fails.
pub async fn fetch_books<A, B>(first: &A, second: &B) -> Result<(OrderBook, OrderBook)>
where
    A: OrderBookSource + Sync,
    B: OrderBookSource + Sync,
{
    info!(first = first.name(), second = second.name(), "[CHAIN] fetching order books");
    futures::try_join!(first.fetch_order_book(), second.fetch_order_book())
}

/// Walk `book` for `target` using the venue's fees.
pub fn plan_hop<'a>(
    venue: &'a VenueConfig,
    book: &OrderBook,
    target: &BigDecimal,
) -> Result<HopPlan<'a>> {
    let walk = FillPlanner::new(venue.planner_config()).plan(book, target)?;
    info!(
        venue = venue.name,
        pair = venue.pair,
        fills = walk.fills.len(),
        total_sold = %walk.total_sold,
        received = %walk.total_received_after_fee,
        deposit = %walk.required_deposit,
        "[CHAIN] walk complete"
    );
    Ok(HopPlan {
        venue,
        target: target.clone(),
        walk,
    })
}
