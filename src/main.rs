use anyhow::Result;
use bigdecimal::{BigDecimal, RoundingMode};
use deposit_planner::{
    cex::{self, Bitstamp, Luno},
    chain::{self, HopPlan},
    cli::CliArgs,
    config::{AppConfig, VenueConfig},
    errors::AppError,
    models::OrderBook,
    planner::to_fixed,
    report, utils,
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    utils::init_logging();

    if let Err(e) = run().await {
        tracing::error!(error = %e, "[EXIT] planning failed");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> Result<()> {
    let config = AppConfig::load()?;
    let args = CliArgs::parse(std::env::args().skip(1))?;
    let target = args.target();
    tracing::info!(
        amount = %args.amount,
        slippage = %args.slippage,
        %target,
        "[INIT] deposit-planner starting"
    );

    let client = cex::http_client(config.http_timeout)?;
    let luno = Luno::new(client.clone(), config.luno.order_book_url.clone());
    let bitstamp = Bitstamp::new(client, config.bitstamp.order_book_url.clone());
    let (luno_book, bitstamp_book) = chain::fetch_books(&luno, &bitstamp).await?;

    // ZAR at Luno is funded by BTC, and that BTC by XRP sold at Bitstamp.
    let first = run_hop(&config.luno, &luno_book, &target)?;
    println!();
    let second = run_hop(&config.bitstamp, &bitstamp_book, &first.next_target())?;

    println!();
    println!(
        "Deposit {} {} at {} to withdraw {} {} at {}.",
        to_fixed(
            &second.walk.required_deposit,
            second.venue.precision.base,
            RoundingMode::Up
        ),
        second.venue.base_asset,
        second.venue.name,
        to_fixed(&first.target, first.venue.precision.quote, RoundingMode::Down),
        first.venue.quote_asset,
        first.venue.name,
    );
    Ok(())
}

/// Plan one hop and print its report. An exhausted book still gets its
/// partial ledger printed before the error is returned.
fn run_hop<'a>(
    venue: &'a VenueConfig,
    book: &OrderBook,
    target: &BigDecimal,
) -> std::result::Result<HopPlan<'a>, AppError> {
    println!("{}", report::render_preamble(target, venue));
    match chain::plan_hop(venue, book, target) {
        Ok(hop) => {
            println!("{}", report::render_table(&hop.walk, venue));
            println!("{}", report::render_summary(target, &hop.walk, venue));
            Ok(hop)
        }
        Err(AppError::BookExhausted { required, walk }) => {
            tracing::warn!(venue = venue.name, %required, "[WALK] order book exhausted");
            println!("{}", report::render_table(&walk, venue));
            println!("{}", report::render_exhausted(&walk, venue));
            Err(AppError::BookExhausted { required, walk })
        }
        Err(e) => Err(e),
    }
}
