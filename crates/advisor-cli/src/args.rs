//! Command-line arguments

use clap::Parser;
use crypto_advisor::AdvisorConfig;

#[derive(Debug, Parser)]
#[command(
    name = "crypto-buddy",
    version,
    about = "Ask plain-English questions about crypto sustainability, tech and price trends"
)]
pub struct Args {
    /// Ask a single question and exit (e.g. `crypto-buddy tell me about cardano`)
    pub query: Vec<String>,

    /// Use built-in sample prices instead of calling CoinGecko
    #[arg(long)]
    pub offline: bool,

    /// CoinGecko API base URL (overrides COINGECKO_API_URL)
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// Seconds to wait for prices before answering in degraded mode
    #[arg(long, value_name = "SECS")]
    pub timeout_secs: Option<u64>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Skip the market snapshot printed at startup
    #[arg(long)]
    pub no_summary: bool,
}

impl Args {
    /// One-shot question, if any words were given
    pub fn one_shot_query(&self) -> Option<String> {
        let query = self.query.join(" ");
        let query = query.trim();
        (!query.is_empty()).then(|| query.to_string())
    }

    /// Flags win over environment configuration
    pub fn apply(&self, config: &mut AdvisorConfig) {
        if let Some(url) = &self.api_url {
            config.api_url.clone_from(url);
        }
        if let Some(secs) = self.timeout_secs {
            config.timeout_secs = secs;
        }
    }
}
