use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::{
    comparison::{compare, Comparison},
    config::AnalysisConfig,
    error::InsightError,
    indicator::{derive_indicators, PriceAnalysis},
    loader::{NewsLoader, PriceDataLoader},
    model::Lookback,
    sentiment::{annotate, summarize, AnnotatedArticle, SentimentSummary},
    symbol::{normalize, Symbol},
};

/// A dashboard panel that either rendered or explains why it could not.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum Section<T> {
    Available(T),
    Unavailable { message: String },
}

impl<T> Section<T> {
    pub fn available(&self) -> Option<&T> {
        match self {
            Section::Available(value) => Some(value),
            Section::Unavailable { .. } => None,
        }
    }
}

impl<T> From<eyre::Result<T>> for Section<T> {
    fn from(result: eyre::Result<T>) -> Self {
        match result {
            Ok(value) => Section::Available(value),
            Err(e) => Section::Unavailable {
                message: format!("{e:#}"),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentReport {
    pub summary: SentimentSummary,
    pub articles: Vec<AnnotatedArticle>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SymbolReport {
    pub symbol: Symbol,
    pub lookback: Lookback,
    pub prices: Section<PriceAnalysis>,
    pub news: Section<SentimentReport>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub primary: SymbolReport,
    pub secondary: Option<SymbolReport>,
    pub comparison: Option<Comparison>,
}

pub struct StockAnalyzer<P, N> {
    config: AnalysisConfig,
    prices: P,
    news: N,
}

impl<P, N> StockAnalyzer<P, N>
where
    P: PriceDataLoader,
    N: NewsLoader,
{
    pub fn new(config: AnalysisConfig, prices: P, news: N) -> Self {
        Self {
            config,
            prices,
            news,
        }
    }

    pub fn normalize(&self, input: &str) -> Result<Symbol, InsightError> {
        normalize(input, self.config.default_exchange)
    }

    #[instrument(skip(self), fields(lookback = %self.config.lookback))]
    pub fn report(&self, symbol: &Symbol) -> SymbolReport {
        let prices = Section::from(self.price_analysis(symbol));
        let news = Section::from(self.sentiment_report(symbol));

        if let Section::Unavailable { message } = &prices {
            warn!(%symbol, reason = %message, "prices unavailable");
        }
        if let Section::Unavailable { message } = &news {
            warn!(%symbol, reason = %message, "news unavailable");
        }

        SymbolReport {
            symbol: symbol.clone(),
            lookback: self.config.lookback,
            prices,
            news,
        }
    }

    /// Builds the one- or two-symbol view. A second symbol that is invalid,
    /// or that normalizes to the first, leaves a single-symbol view.
    pub fn dashboard(
        &self,
        primary: &str,
        secondary: Option<&str>,
    ) -> Result<Dashboard, InsightError> {
        let primary = self.normalize(primary)?;
        let secondary = secondary
            .map(|input| self.normalize(input))
            .transpose()
            .unwrap_or_else(|e| {
                warn!("ignoring comparison symbol: {e}");
                None
            })
            .filter(|symbol| {
                let distinct = *symbol != primary;
                if !distinct {
                    info!(%symbol, "comparison symbol equals primary, skipping");
                }
                distinct
            });

        let primary = self.report(&primary);
        let secondary = secondary.map(|symbol| self.report(&symbol));

        let comparison = secondary.as_ref().and_then(|other| {
            let analysis = primary.prices.available()?;
            let other_analysis = other.prices.available()?;
            compare(
                (&primary.symbol, analysis),
                Some((&other.symbol, other_analysis)),
            )
        });

        Ok(Dashboard {
            primary,
            secondary,
            comparison,
        })
    }

    fn price_analysis(&self, symbol: &Symbol) -> eyre::Result<PriceAnalysis> {
        let series = self.prices.load_prices(symbol)?.trim_to(self.config.lookback);
        let analysis = derive_indicators(&series.points).ok_or_else(|| InsightError::NoPriceData {
            symbol: symbol.to_string(),
        })?;

        info!(
            %symbol,
            points = analysis.metrics.data_points,
            latest = analysis.metrics.latest_price,
            "derived indicators"
        );
        Ok(analysis)
    }

    fn sentiment_report(&self, symbol: &Symbol) -> eyre::Result<SentimentReport> {
        let mut articles = self.news.load_news(symbol)?;
        if let Some(limit) = self.config.max_articles {
            articles.truncate(limit);
        }

        let summary = summarize(&articles).ok_or_else(|| InsightError::NoNews {
            symbol: symbol.company_name().to_owned(),
        })?;

        info!(
            %symbol,
            articles = articles.len(),
            overall = %summary.overall_label,
            "summarized news"
        );
        Ok(SentimentReport {
            summary,
            articles: annotate(&articles),
        })
    }
}
