//! Response Formatting
//!
//! Plain-text answers for each intent. Nothing here fetches or ranks; the
//! caller hands in the picks and the price snapshot.

use std::fmt::Write as _;

use rust_decimal::Decimal;

use crate::metrics::MetricsTable;
use crate::model::{CoinMetrics, MarketCapTier, PriceSnapshot};
use crate::strategy::LongTermPick;

/// Returned for every query while live prices cannot be fetched
pub const DEGRADED_MESSAGE: &str = "I'm having trouble getting current market data. \
Let me provide advice based on historical analysis.";

pub const HELP_MESSAGE: &str = r#"I can help you with:
1. Cryptocurrency price trends ("Show me trending coins")
2. Sustainability analysis ("Which crypto is most sustainable?")
3. Long-term investment potential ("Best coin for long-term?")
4. Profitability analysis ("Which coins are profitable?")
5. Technology scores ("Which coin has the best tech?")
6. Low-energy coins ("Show me low-energy coins")
7. Specific coin details ("Tell me about Bitcoin")
8. Current prices ("Show me current prices")"#;

pub const UNRECOGNIZED_MESSAGE: &str = "I'm not sure what you're asking. Try asking about:
- Price trends
- Sustainability
- Long-term potential
- Profitability
- Technology
- Low-energy coins
- Specific coin details
Or type 'help' for more options!";

pub const NO_PROFITABLE_MESSAGE: &str =
    "No coins are currently meeting the criteria for high profitability (rising trend + high market cap).";

/// Human name for a provider id without table metadata: drops a trailing
/// numeric suffix and title-cases the words ("avalanche-2" → "Avalanche").
pub fn display_id(id: &str) -> String {
    let base = match id.rsplit_once('-') {
        Some((head, tail)) if !head.is_empty() && tail.chars().all(|c| c.is_ascii_digit()) => head,
        _ => id,
    };
    base.split(['-', '_', ' '])
        .filter(|w| !w.is_empty())
        .map(title_case)
        .collect::<Vec<_>>()
        .join(" ")
}

/// "very low" → "Very Low"
pub fn title_case(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// `$97,500.00`
pub fn format_usd(price: Decimal) -> String {
    let rounded = normalize_zero(price.round_dp(2));
    let text = format!("{rounded:.2}");
    let (sign, digits) = text.strip_prefix('-').map_or(("", text.as_str()), |rest| ("-", rest));
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits, "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{sign}${grouped}.{frac_part}")
}

/// `+2.5%` / `-6.25%` with the given number of decimals.
/// Changes that round to zero print as `+0.0%`, never `-0.0%`.
pub fn format_change(change: Decimal, decimals: u32) -> String {
    let rounded = normalize_zero(change.round_dp(decimals));
    format!("{rounded:+.prec$}%", prec = decimals as usize)
}

fn normalize_zero(value: Decimal) -> Decimal {
    if value.is_zero() { Decimal::ZERO } else { value }
}

/// Full card for one coin; missing price renders as `N/A`, missing change as 0
pub fn coin_details(coin: &CoinMetrics, prices: &PriceSnapshot) -> String {
    let quote = prices.get(&coin.id).cloned().unwrap_or_default();
    let price = quote.usd_price.map_or_else(|| "N/A".to_string(), format_usd);
    let change = quote.change_or_zero();

    let mut out = String::new();
    let _ = writeln!(out, "--- Details for {} ---", coin.name);
    let _ = writeln!(out, "Price: {price}");
    let _ = writeln!(out, "24h Trend: {} ({})", quote.trend(), format_change(change, 1));
    let _ = writeln!(out, "Market Cap: {}", title_case(coin.market_cap.label()));
    let _ = writeln!(out, "Energy Use: {}", title_case(coin.energy_use.label()));
    let _ = writeln!(out, "Sustainability Score: {}/10", coin.sustainability_score);
    let _ = writeln!(out, "Tech Score: {}/10", coin.tech_score);
    let _ = write!(out, "Long-term Viability: {}/10", coin.long_term_viability);
    out
}

pub fn most_sustainable(coin: &CoinMetrics) -> String {
    format!(
        "Based on sustainability metrics, {} is your best bet! 🌱\n\
         It has a sustainability score of {}/10 and {} energy usage.",
        coin.name,
        coin.sustainability_score,
        coin.energy_use.label()
    )
}

pub fn best_tech(coin: &CoinMetrics) -> String {
    format!(
        "For the best technology, look at {}! 💻 It has a tech score of {}/10.",
        coin.name, coin.tech_score
    )
}

pub fn low_energy(coins: &[&CoinMetrics]) -> String {
    let names: Vec<&str> = coins.iter().map(|c| c.name.as_str()).collect();
    format!("Looking for low energy consumption? Check these out: 🌱\n- {}", names.join(", "))
}

pub fn best_long_term(pick: &LongTermPick<'_>) -> String {
    let coin = pick.coin;
    format!(
        "For long-term investment potential, I recommend {}! 📈\n\
         It scores well in sustainability ({}/10), long-term viability ({}/10), \
         and technical fundamentals ({}/10), for a composite score of {:.2}/10.",
        coin.name, coin.sustainability_score, coin.long_term_viability, coin.tech_score, pick.score
    )
}

/// Quoted coins that are rising and have a high market cap, in table order
pub fn profitable_coins<'a>(table: &'a MetricsTable, prices: &PriceSnapshot) -> Vec<&'a CoinMetrics> {
    table
        .iter()
        .filter(|coin| {
            prices
                .get(&coin.id)
                .is_some_and(|q| q.trend().is_rising() && coin.market_cap == MarketCapTier::High)
        })
        .collect()
}

pub fn profitability(coins: &[&CoinMetrics]) -> String {
    if coins.is_empty() {
        return NO_PROFITABLE_MESSAGE.into();
    }
    let names: Vec<&str> = coins.iter().map(|c| c.name.as_str()).collect();
    format!(
        "Based on current trends and market cap, these coins look profitable: 🚀\n- {}",
        names.join(", ")
    )
}

/// One line per quoted coin, in table order
pub fn trend_overview(table: &MetricsTable, prices: &PriceSnapshot) -> String {
    let mut out = String::from("Here are the current price trends:");
    for coin in table.iter() {
        let Some(quote) = prices.get(&coin.id) else {
            continue;
        };
        let price = quote.usd_price.map_or_else(|| "N/A".to_string(), format_usd);
        let _ = write!(
            out,
            "\n{}: {} ({} - {})",
            coin.name,
            price,
            format_change(quote.change_or_zero(), 2),
            quote.trend()
        );
    }
    out
}
