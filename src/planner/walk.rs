use bigdecimal::BigDecimal;
use num_traits::{Signed, Zero};
use tracing::debug;

use super::types::PlannerConfig;
use crate::errors::{AppError, Result};
use crate::models::{BidLevel, FillRecord, OrderBook, WalkResult};

/// Walks bids best price first, selling into each level until the proceeds
/// net of taker fees cover the target plus the withdrawal fee.
#[derive(Debug, Clone)]
pub struct FillPlanner {
    config: PlannerConfig,
}

impl FillPlanner {
    pub fn new(config: PlannerConfig) -> Self {
        Self { config }
    }

    /// Plan the sale needed to withdraw `target` quote units.
    ///
    /// Bids are consumed in the order given. If the book runs out first,
    /// returns [`AppError::BookExhausted`] carrying the fills made so far.
    pub fn plan(&self, book: &OrderBook, target: &BigDecimal) -> Result<WalkResult> {
        if target.is_negative() {
            return Err(AppError::InvalidInput(format!(
                "target must not be negative, got {target}"
            )));
        }
        validate_bids(&book.bids)?;

        if target.is_zero() {
            let zero = BigDecimal::zero();
            return Ok(self.finish(Vec::new(), zero.clone(), zero.clone(), zero));
        }

        let target_with_fee = target + &self.config.withdrawal_fee;
        let mut fills: Vec<FillRecord> = Vec::new();
        let mut total_sold = BigDecimal::zero();
        let mut total_received = BigDecimal::zero();

        for level in &book.bids {
            if total_received >= target_with_fee {
                break;
            }
            let still_required = &target_with_fee - &total_received;
            let fill = self.consume(level, &still_required, &total_sold, &total_received);
            total_sold = fill.running_sold.clone();
            total_received = fill.running_received_after_fee.clone();
            debug!(
                sold = %fill.sold,
                rate = %fill.rate,
                fee = %fill.fee,
                received = %fill.received,
                partial = fill.partial,
                "[WALK] fill"
            );
            fills.push(fill);
        }

        let walk = self.finish(fills, target_with_fee.clone(), total_sold, total_received);
        if walk.total_received_after_fee < target_with_fee {
            return Err(AppError::BookExhausted {
                required: target_with_fee,
                walk: Box::new(walk),
            });
        }
        Ok(walk)
    }

    /// Sell into one level, whole or in part, given what is still required.
    fn consume(
        &self,
        level: &BidLevel,
        still_required: &BigDecimal,
        total_sold: &BigDecimal,
        total_received: &BigDecimal,
    ) -> FillRecord {
        let p = &self.config.precision;
        let taker = &self.config.taker_fee;

        let level_gross = &level.price * &level.volume;
        let level_fee = p.fee(&(&level_gross * taker));
        let level_net = p.received(&(&level_gross - &level_fee));

        if still_required < &level_net && level_net.is_positive() {
            let ratio = still_required / &level_net;
            let sold = p.sold(&(&ratio * &level.volume)).min(level.volume.clone());
            let gross = &level.price * &sold;
            let fee = p.fee(&(&gross * taker));
            let received = p.received(&(&gross - &fee));
            // Rounding may leave `received` a hair short of what was needed.
            // Credit the exact remainder so the walk closes on this level.
            FillRecord {
                running_sold: p.running_sold(&(total_sold + &sold)),
                running_received_after_fee: total_received + still_required,
                sold,
                rate: level.price.clone(),
                fee,
                received,
                credited: still_required.clone(),
                partial: true,
            }
        } else {
            FillRecord {
                running_sold: p.running_sold(&(total_sold + &level.volume)),
                running_received_after_fee: p.running_received(&(total_received + &level_net)),
                sold: level.volume.clone(),
                rate: level.price.clone(),
                fee: level_fee,
                received: level_net.clone(),
                credited: level_net,
                partial: false,
            }
        }
    }

    fn finish(
        &self,
        fills: Vec<FillRecord>,
        target_with_fee: BigDecimal,
        total_sold: BigDecimal,
        total_received_after_fee: BigDecimal,
    ) -> WalkResult {
        let required_deposit = &total_sold + &self.config.receive_fee;
        WalkResult {
            fills,
            target_with_fee,
            total_sold,
            total_received_after_fee,
            required_deposit,
        }
    }
}

fn validate_bids(bids: &[BidLevel]) -> Result<()> {
    for (i, level) in bids.iter().enumerate() {
        if level.price.is_negative() || level.volume.is_negative() {
            return Err(AppError::InvalidInput(format!(
                "bid {i} has negative price or volume ({} @ {})",
                level.volume, level.price
            )));
        }
    }
    Ok(())
}
