use std::{
    collections::BTreeMap,
    fs::File,
    io::{BufRead, BufReader, Read},
    path::PathBuf,
};

use chrono::{DateTime, NaiveDate, Utc};
use eyre::{ensure, WrapErr};
use itertools::Itertools;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::{
    model::{PricePoint, PriceSeries},
    sentiment::Article,
    symbol::Symbol,
};

pub trait PriceDataLoader {
    fn load_prices(&self, symbol: &Symbol) -> eyre::Result<PriceSeries>;
}

pub trait NewsLoader {
    fn load_news(&self, symbol: &Symbol) -> eyre::Result<Vec<Article>>;
}

/// Reads `<dir>/prices/<SYMBOL>.csv` and `<dir>/news/<SYMBOL>.json`.
pub struct FileDataLoader {
    data_dir: PathBuf,
}

impl FileDataLoader {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    fn prices_path(&self, symbol: &Symbol) -> PathBuf {
        self.data_dir.join("prices").join(format!("{symbol}.csv"))
    }

    fn news_path(&self, symbol: &Symbol) -> PathBuf {
        self.data_dir.join("news").join(format!("{symbol}.json"))
    }
}

impl PriceDataLoader for FileDataLoader {
    fn load_prices(&self, symbol: &Symbol) -> eyre::Result<PriceSeries> {
        let path = self.prices_path(symbol);
        let file = File::open(&path)
            .wrap_err_with(|| format!("no price history for {symbol} at {}", path.display()))?;

        let points = load_price_csv(BufReader::new(file))
            .wrap_err_with(|| format!("failed to read {}", path.display()))?;
        info!(%symbol, points = points.len(), "loaded price history");

        Ok(PriceSeries {
            symbol: symbol.clone(),
            points,
        })
    }
}

impl NewsLoader for FileDataLoader {
    fn load_news(&self, symbol: &Symbol) -> eyre::Result<Vec<Article>> {
        let path = self.news_path(symbol);
        if !path.exists() {
            warn!(%symbol, path = %path.display(), "no news file");
            return Ok(Vec::new());
        }

        let articles = load_news_json(File::open(&path)?)
            .wrap_err_with(|| format!("failed to read {}", path.display()))?;
        info!(%symbol, articles = articles.len(), "loaded news");

        Ok(articles)
    }
}

/// Parses a daily OHLCV export with a `Date,Open,High,Low,Close,[Adj Close,]Volume`
/// header. Output is chronological with one point per date.
pub fn load_price_csv(reader: impl BufRead) -> eyre::Result<Vec<PricePoint>> {
    let mut lines = reader.lines();
    let header = match lines.next() {
        Some(header) => header?,
        None => return Ok(Vec::new()),
    };
    let volume_position = if header.contains("Adj Close") { 6 } else { 5 };
    let mut trades = BTreeMap::new();

    for (ix, line) in lines.enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let line_no = ix + 2;
        let splits = line.split(',').map(str::trim).collect_vec();
        ensure!(
            splits.len() > volume_position,
            "line {}: expected {} columns, got {}",
            line_no,
            volume_position + 1,
            splits.len()
        );

        // Non-trading days come through with empty or NaN closes
        let close = match parse_price(splits[4])? {
            Some(close) if close.is_finite() => close,
            _ => {
                debug!(line = line_no, "skipping row without close");
                continue;
            }
        };

        // Missing open/high/low fall back to the close
        let [open, high, low] = [splits[1], splits[2], splits[3]]
            .map(|cell| parse_price(cell).map(|v| v.unwrap_or(close)));
        let (open, high, low) = (open?, high?, low?);
        if ![open, high, low].iter().all(|v| v.is_finite()) {
            debug!(line = line_no, "skipping row with non-finite prices");
            continue;
        }

        let cell = splits[volume_position];
        let volume = match cell.parse::<f64>() {
            Ok(volume) if volume.is_finite() && volume >= 0.0 => volume as u64,
            _ => {
                debug!(line = line_no, value = cell, "unreadable volume, using 0");
                0
            }
        };

        let day = splits[0].get(..10).unwrap_or(splits[0]);
        let date = NaiveDate::parse_from_str(day, "%Y-%m-%d")?;
        trades.insert(
            date,
            PricePoint {
                date,
                open,
                high,
                low,
                close,
                volume,
            },
        );
    }

    Ok(trades
        .into_values()
        .filter(|p| p.open != 0f64 && p.close != 0f64)
        .collect())
}

fn parse_price(cell: &str) -> eyre::Result<Option<f64>> {
    if cell.is_empty() {
        return Ok(None);
    }
    Ok(Some(cell.parse()?))
}

#[derive(Deserialize)]
struct NewsResponse {
    #[serde(default)]
    articles: Vec<RawArticle>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawArticle {
    title: Option<String>,
    description: Option<String>,
    url: Option<String>,
    published_at: Option<String>,
    source: Option<RawSource>,
    #[serde(alias = "score")]
    sentiment_score: Option<f64>,
}

#[derive(Deserialize)]
struct RawSource {
    name: Option<String>,
}

impl From<RawArticle> for Article {
    fn from(raw: RawArticle) -> Self {
        let published_at = raw
            .published_at
            .as_deref()
            .and_then(|s| match DateTime::parse_from_rfc3339(s) {
                Ok(d) => Some(d.with_timezone(&Utc)),
                Err(e) => {
                    debug!(value = s, "unparsable publishedAt: {e}");
                    None
                }
            });

        Article {
            title: raw.title.unwrap_or_else(|| "No title".to_owned()),
            description: raw.description.filter(|d| !d.is_empty()),
            url: raw.url.unwrap_or_else(|| "#".to_owned()),
            published_at,
            source_name: raw
                .source
                .and_then(|s| s.name)
                .unwrap_or_else(|| "Unknown".to_owned()),
            sentiment_score: raw.sentiment_score,
        }
    }
}

/// Parses a news-search response body: `{"articles": [...]}`.
pub fn load_news_json(reader: impl Read) -> eyre::Result<Vec<Article>> {
    let response: NewsResponse = serde_json::from_reader(reader)?;
    Ok(response.articles.into_iter().map(Article::from).collect())
}
