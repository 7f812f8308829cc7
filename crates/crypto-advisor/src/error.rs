//! Error Types for Crypto Advisor

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AdvisorError>;

#[derive(Error, Debug)]
pub enum AdvisorError {
    /// Price provider could not deliver quotes (transport, status, timeout, bad payload)
    #[error("Price provider unavailable: {0}")]
    ProviderUnavailable(String),

    #[error("No metrics for coin: {0}")]
    UnknownCoin(String),

    #[error("Invalid coin metrics: {0}")]
    InvalidMetrics(String),

    #[error("Duplicate coin id in metrics table: {0}")]
    DuplicateCoin(String),

    #[error("Metrics table must contain at least one coin")]
    EmptyTable,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AdvisorError {
    /// Errors that mean "no live prices this turn"
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            Self::ProviderUnavailable(_) | Self::Network(_) | Self::Serialization(_)
        )
    }

    /// Convert to a message fit for the chat transcript
    pub fn user_message(&self) -> String {
        if self.is_unavailable() {
            return crate::DEGRADED_MESSAGE.into();
        }

        match self {
            Self::UnknownCoin(id) => {
                format!("Sorry, I don't have detailed data for {}.", crate::format::display_id(id))
            }
            _ => "Something went wrong while answering. Please try again!".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_classification() {
        assert!(AdvisorError::ProviderUnavailable("timeout".into()).is_unavailable());
        assert!(!AdvisorError::UnknownCoin("x".into()).is_unavailable());
    }

    #[test]
    fn test_unavailable_errors_share_degraded_message() {
        let bad_json = serde_json::from_str::<u32>("nope").unwrap_err();
        for err in [
            AdvisorError::ProviderUnavailable("timeout".into()),
            AdvisorError::Serialization(bad_json),
        ] {
            assert_eq!(err.user_message(), crate::DEGRADED_MESSAGE);
        }
        assert_ne!(AdvisorError::EmptyTable.user_message(), crate::DEGRADED_MESSAGE);
    }

    #[test]
    fn test_unknown_coin_message() {
        let msg = AdvisorError::UnknownCoin("shiba-inu".into()).user_message();
        assert_eq!(msg, "Sorry, I don't have detailed data for Shiba Inu.");
    }
}
