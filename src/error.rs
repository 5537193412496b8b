use derive_more::{Display, Error};

#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum InsightError {
    #[display(fmt = "no data available for {}", symbol)]
    NoPriceData { symbol: String },

    #[display(fmt = "no news available for {}", symbol)]
    NoNews { symbol: String },

    #[display(fmt = "invalid symbol provided: {:?}", input)]
    InvalidSymbol { input: String },

    #[display(fmt = "unknown lookback period: {:?}", input)]
    UnknownLookback { input: String },

    #[display(fmt = "watchlist not found for user {}", user_id)]
    WatchlistNotFound { user_id: String },
}
