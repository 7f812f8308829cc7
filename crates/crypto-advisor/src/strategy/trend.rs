//! Trend Classifier
//!
//! Buckets a 24h percent change into a [`TrendLabel`]. The strong/sharp
//! thresholds are strict, so exactly +5 is `Rising` and exactly -5 is `Falling`.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::model::TrendLabel;

const STRONG_MOVE: Decimal = dec!(5);
const MOVE: Decimal = dec!(2);

pub fn classify_trend(change_24h_pct: Decimal) -> TrendLabel {
    if change_24h_pct > STRONG_MOVE {
        TrendLabel::RisingStrongly
    } else if change_24h_pct > MOVE {
        TrendLabel::Rising
    } else if change_24h_pct < -STRONG_MOVE {
        TrendLabel::FallingSharply
    } else if change_24h_pct < -MOVE {
        TrendLabel::Falling
    } else {
        TrendLabel::Stable
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trend_buckets() {
        assert_eq!(classify_trend(dec!(6)), TrendLabel::RisingStrongly);
        assert_eq!(classify_trend(dec!(3)), TrendLabel::Rising);
        assert_eq!(classify_trend(dec!(1)), TrendLabel::Stable);
        assert_eq!(classify_trend(dec!(0)), TrendLabel::Stable);
        assert_eq!(classify_trend(dec!(-3)), TrendLabel::Falling);
        assert_eq!(classify_trend(dec!(-6)), TrendLabel::FallingSharply);
    }

    #[test]
    fn test_trend_boundaries() {
        assert_eq!(classify_trend(dec!(5)), TrendLabel::Rising);
        assert_eq!(classify_trend(dec!(5.0001)), TrendLabel::RisingStrongly);
        assert_eq!(classify_trend(dec!(2)), TrendLabel::Stable);
        assert_eq!(classify_trend(dec!(2.01)), TrendLabel::Rising);
        assert_eq!(classify_trend(dec!(-2)), TrendLabel::Stable);
        assert_eq!(classify_trend(dec!(-2.01)), TrendLabel::Falling);
        assert_eq!(classify_trend(dec!(-5)), TrendLabel::Falling);
        assert_eq!(classify_trend(dec!(-5.0001)), TrendLabel::FallingSharply);
    }

    #[test]
    fn test_trend_labels() {
        assert_eq!(classify_trend(dec!(6)).to_string(), "rising strongly");
        assert_eq!(classify_trend(dec!(-6)).to_string(), "falling sharply");
    }
}
