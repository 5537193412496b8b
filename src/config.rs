use crate::{model::Lookback, symbol::Exchange};

/// Headlines aggregated per symbol unless configured otherwise.
pub const DEFAULT_MAX_ARTICLES: usize = 8;

#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    pub lookback: Lookback,
    pub max_articles: Option<usize>,
    pub default_exchange: Exchange,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            lookback: Lookback::default(),
            max_articles: Some(DEFAULT_MAX_ARTICLES),
            default_exchange: Exchange::Nse,
        }
    }
}

impl AnalysisConfig {
    pub fn with_lookback(mut self, value: Lookback) -> Self {
        self.lookback = value;
        self
    }

    pub fn with_max_articles(mut self, value: Option<usize>) -> Self {
        self.max_articles = value;
        self
    }

    pub fn with_default_exchange(mut self, value: Exchange) -> Self {
        self.default_exchange = value;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::{AnalysisConfig, DEFAULT_MAX_ARTICLES};
    use crate::{model::Lookback, symbol::Exchange};

    #[test]
    fn unittest_default_config() {
        let config = AnalysisConfig::default();

        assert_eq!(config.max_articles, Some(DEFAULT_MAX_ARTICLES));
        assert_eq!(config.lookback, Lookback::ThreeMonths);
        assert_eq!(config.default_exchange, Exchange::Nse);
        assert_eq!(AnalysisConfig::default().with_max_articles(None).max_articles, None);
    }
}
