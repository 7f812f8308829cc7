//! Terminal output: banner, market snapshot and chat lines.

use colored::{Color, Colorize};
use crypto_advisor::{
    MarketSnapshot, SAMPLE_QUESTIONS, TrendLabel,
    format::{format_change, format_usd},
};

const RULE_WIDTH: usize = 60;

pub fn banner(name: &str) -> String {
    format!(
        "{}\n{}\n",
        format!("Welcome to {name}! 🤖 Your AI-Powered Crypto Investment Advisor!").as_str().cyan(),
        "Disclaimer: This is for educational purposes only. Always do your own research!".yellow()
    )
}

fn trend_color(trend: TrendLabel) -> Color {
    if trend.is_rising() {
        Color::Green
    } else if trend.is_falling() {
        Color::Red
    } else {
        Color::White
    }
}

/// Color-coded price table followed by the top sustainable pick
pub fn market_table(snapshot: &MarketSnapshot) -> String {
    let mut lines = vec![
        "--- Crypto Market Snapshot ---".yellow().to_string(),
        format!("{:<12} | {:<15} | {:<12} | Trend", "Coin", "Price (USD)", "24h Change"),
        "-".repeat(RULE_WIDTH),
    ];

    for row in &snapshot.rows {
        let color = trend_color(row.trend);
        let price = row.price_usd.map_or_else(|| "N/A".to_string(), format_usd);
        // pad before coloring so escape codes don't skew the columns
        let change = format!("{:<12}", format_change(row.change_24h_pct, 1)).as_str().color(color);
        let trend = row.trend.as_str().color(color);
        lines.push(format!("{:<12} | {price:<15} | {change} | {trend}", row.name));
    }

    lines.push("-".repeat(RULE_WIDTH));
    lines.push(format!(
        "🌱 {} {}",
        "Top Sustainable Pick:".cyan(),
        snapshot.top_sustainable
    ));
    lines.push(
        format!("Prices as of {} UTC", snapshot.fetched_at.format("%Y-%m-%d %H:%M"))
            .as_str()
            .dimmed()
            .to_string(),
    );

    lines.join("\n")
}

pub fn market_unavailable() -> String {
    "Could not fetch live market data. Please check your connection."
        .yellow()
        .to_string()
}

pub fn fetching() -> String {
    "Fetching initial market data...".cyan().to_string()
}

pub fn sample_questions() -> String {
    let mut out = String::from("How can I help you today? Try asking one of these questions:");
    for question in SAMPLE_QUESTIONS {
        out.push('\n');
        out.push_str(&format!("- '{question}'").as_str().yellow().to_string());
    }
    out.push_str("\n (Type 'exit' to quit)");
    out
}

pub fn prompt() -> String {
    format!("\n{} ", "You:".green())
}

pub fn reply(name: &str, response: &str) -> String {
    format!("\n{} {response}", format!("{name}:").as_str().blue())
}

pub fn goodbye(name: &str) -> String {
    format!("{name}: Goodbye! Happy investing! 👋").as_str().cyan().to_string()
}

pub fn turn_error(error: &str) -> String {
    format!("{}\nPlease try again!", format!("An error occurred: {error}").as_str().red())
}
