//! Plain-text ledger of a walk and the deposit/withdrawal instructions that
//! follow from it.

use bigdecimal::{BigDecimal, RoundingMode};

use crate::config::VenueConfig;
use crate::models::{FillRecord, WalkResult};
use crate::planner::to_fixed;

const HEADERS: [&str; 6] = ["Sell", "Rate", "Fee", "To Receive", "Sold", "Received"];
const MIN_WIDTHS: [usize; 6] = [10, 8, 8, 10, 12, 12];

/// Line shown before the walk.
pub fn render_preamble(target: &BigDecimal, venue: &VenueConfig) -> String {
    let dp = venue.precision.quote;
    let quote = venue.quote_asset;
    let target_with_fee = target + &venue.withdrawal_fee;
    format!(
        "To withdraw {} {quote}, {} {quote} must be earned to accommodate {} {quote} withdrawal fee.",
        to_fixed(target, dp, RoundingMode::Up),
        to_fixed(&target_with_fee, dp, RoundingMode::Up),
        to_fixed(&venue.withdrawal_fee, dp, RoundingMode::Up),
    )
}

/// Six-column fill table, right aligned.
pub fn render_table(walk: &WalkResult, venue: &VenueConfig) -> String {
    let mut rows: Vec<[String; 6]> = vec![HEADERS.map(str::to_string)];
    rows.extend(walk.fills.iter().map(|fill| fill_row(fill, venue)));

    let mut widths = MIN_WIDTHS;
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let border = widths
        .iter()
        .map(|w| "-".repeat(w + 2))
        .collect::<Vec<_>>()
        .join("+");
    let border = format!("+{border}+");

    let mut out = String::new();
    out.push_str(&border);
    out.push('\n');
    for (i, row) in rows.iter().enumerate() {
        let cells = row
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!(" {cell:>width$} "))
            .collect::<Vec<_>>()
            .join("|");
        out.push_str(&format!("|{cells}|\n"));
        if i == 0 {
            out.push_str(&border);
            out.push('\n');
        }
    }
    out.push_str(&border);
    out
}

fn fill_row(fill: &FillRecord, venue: &VenueConfig) -> [String; 6] {
    let base = venue.base_asset;
    let quote = venue.quote_asset;
    let p = venue.precision;
    [
        format!("{} {base}", to_fixed(&fill.sold, p.base, RoundingMode::Down)),
        format!("{} {quote}", to_fixed(&fill.rate, p.quote, RoundingMode::Down)),
        format!("{} {quote}", to_fixed(&fill.fee, p.quote, RoundingMode::Up)),
        format!("{} {quote}", to_fixed(&fill.received, p.quote, RoundingMode::Up)),
        format!("{} {base}", to_fixed(&fill.running_sold, p.base, RoundingMode::Up)),
        format!(
            "{} {quote}",
            to_fixed(&fill.running_received_after_fee, venue.summary_dp, RoundingMode::Down)
        ),
    ]
}

/// Deposit and withdrawal instructions for a completed walk.
pub fn render_summary(target: &BigDecimal, walk: &WalkResult, venue: &VenueConfig) -> String {
    let base = venue.base_asset;
    let quote = venue.quote_asset;
    let p = venue.precision;
    [
        format!(
            "A DEPOSIT of {} {base} is required.",
            to_fixed(&walk.required_deposit, p.base, RoundingMode::Up)
        ),
        format!(
            " - A fee of {} {base} will be deducted leaving {} {base} to sell",
            to_fixed(&venue.receive_fee, p.base, RoundingMode::Up),
            to_fixed(&walk.total_sold, p.base, RoundingMode::Up)
        ),
        format!(
            " - This will earn {} {quote} after paying a fee of {} per tx.",
            to_fixed(&walk.total_received_after_fee, p.quote, RoundingMode::Down),
            venue.taker_fee
        ),
        format!(
            "A WITHDRAWAL of {} {quote} can then be made after the withdrawal fee",
            to_fixed(target, p.quote, RoundingMode::Down)
        ),
    ]
    .join("\n")
}

/// Explanation for a walk that ran out of bids.
pub fn render_exhausted(walk: &WalkResult, venue: &VenueConfig) -> String {
    let quote = venue.quote_asset;
    let dp = venue.precision.quote;
    format!(
        "The {} {} book ran out after {} bids: {} {quote} of {} {quote} realised, {} {quote} short.",
        venue.name,
        venue.pair,
        walk.fills.len(),
        to_fixed(&walk.total_received_after_fee, dp, RoundingMode::Down),
        to_fixed(&walk.target_with_fee, dp, RoundingMode::Up),
        to_fixed(&walk.shortfall(), dp, RoundingMode::Up),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::models::{BidLevel, OrderBook};
    use crate::planner::FillPlanner;
    use std::str::FromStr;

    fn d(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    fn luno() -> VenueConfig {
        AppConfig::from_lookup(|_| None).unwrap().luno
    }

    fn walk(venue: &VenueConfig, target: &str) -> WalkResult {
        let book = OrderBook {
            timestamp: 0,
            bids: vec![
                BidLevel::new(d("100000"), d("0.01")),
                BidLevel::new(d("99000"), d("1")),
            ],
        };
        FillPlanner::new(venue.planner_config())
            .plan(&book, &d(target))
            .unwrap()
    }

    #[test]
    fn table_has_header_and_one_row_per_fill() {
        let venue = luno();
        let walk = walk(&venue, "2000");
        let table = render_table(&walk, &venue);
        let lines: Vec<&str> = table.lines().collect();

        // border, header, border, 2 rows, border
        assert_eq!(lines.len(), 6);
        assert!(lines[1].contains("To Receive"));
        assert!(lines[3].contains("0.01000000 BTC"));
        assert!(lines[3].contains("100000.00 ZAR"));
        assert!(lines[3].contains("10.00 ZAR"));
        assert!(lines[3].contains("990.00 ZAR"));
        assert!(lines[4].ends_with("2008.50 ZAR |"));
        let widths: Vec<usize> = lines.iter().map(|l| l.chars().count()).collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn summary_lines() {
        let venue = luno();
        let target = d("2000");
        let walk = walk(&venue, "2000");
        let summary = render_summary(&target, &walk, &venue);

        assert!(summary.starts_with(&format!(
            "A DEPOSIT of {} BTC is required.",
            to_fixed(&walk.required_deposit, 8, RoundingMode::Up)
        )));
        assert!(summary.contains("A fee of 0.00002000 BTC will be deducted"));
        assert!(summary.contains("This will earn 2008.50 ZAR"));
        assert!(summary.contains("A WITHDRAWAL of 2000.00 ZAR"));
    }

    #[test]
    fn preamble_includes_withdrawal_fee() {
        let line = render_preamble(&d("500000"), &luno());
        assert_eq!(
            line,
            "To withdraw 500000.00 ZAR, 500008.50 ZAR must be earned to accommodate 8.50 ZAR withdrawal fee."
        );
    }

    #[test]
    fn exhausted_line_reports_shortfall() {
        let venue = luno();
        let walk = WalkResult {
            fills: Vec::new(),
            target_with_fee: d("1008.50"),
            total_sold: d("0"),
            total_received_after_fee: d("990"),
            required_deposit: d("0.00002"),
        };
        let line = render_exhausted(&walk, &venue);
        assert!(line.contains("990.00 ZAR of 1008.50 ZAR realised, 18.50 ZAR short"));
    }
}
