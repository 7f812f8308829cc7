//! crypto-buddy
//!
//! Terminal chat front-end for `crypto-advisor`. Prints a market snapshot,
//! then answers questions until the user types `exit`, `quit` or `bye`.

mod args;
mod display;
mod session;

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crypto_advisor::{
    AdvisorConfig, CryptoAdvisor, MetricsTable,
    exchange::{CoinGeckoClient, MockPriceProvider, PriceProvider},
};

use crate::args::Args;
use crate::session::Session;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment
    dotenvy::dotenv().ok();

    // Initialize tracing; stderr keeps log lines out of the chat transcript
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    if args.no_color {
        colored::control::set_override(false);
    }

    let mut config = AdvisorConfig::from_env()?;
    args.apply(&mut config);
    config.validate()?;

    let provider: Arc<dyn PriceProvider> = if args.offline {
        tracing::info!("using built-in sample prices");
        Arc::new(MockPriceProvider::new())
    } else {
        tracing::info!(api_url = %config.api_url, "using CoinGecko prices");
        Arc::new(CoinGeckoClient::new(&config)?)
    };

    let advisor = Arc::new(CryptoAdvisor::with_config(MetricsTable::seed(), provider, &config)?);
    tracing::info!(
        coins = advisor.table().len(),
        provider = advisor.provider_name(),
        timeout_secs = config.timeout_secs,
        "advisor ready"
    );

    let session = Session::new(Arc::clone(&advisor));

    // One-shot mode: answer and leave
    if let Some(query) = args.one_shot_query() {
        println!("{}", session.answer(query).await?);
        return Ok(());
    }

    println!("{}", display::banner(advisor.name()));

    if !args.no_summary {
        println!("{}", display::fetching());
        match advisor.market_snapshot().await {
            Ok(snapshot) => println!("{}\n", display::market_table(&snapshot)),
            Err(e) => {
                tracing::warn!(error = %e, "startup snapshot unavailable");
                println!("{}", display::market_unavailable());
            }
        }
    }

    println!("{}", display::sample_questions());

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    session.run(stdin, &mut std::io::stdout()).await
}
