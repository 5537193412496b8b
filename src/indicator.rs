use derive_more::Display;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{
    model::{Price, PricePoint},
    utils::{round_to, MovingAverage, WilderAverage},
};

pub const MOVING_AVERAGE_PERIOD: usize = 20;
pub const RSI_PERIOD: usize = 14;
pub const RSI_OVERBOUGHT: f64 = 70.0;
pub const RSI_OVERSOLD: f64 = 30.0;

/// A per-day indicator over closing prices. Days inside the warm-up window
/// carry `None`, never a placeholder number.
pub trait Indicator {
    fn name(&self) -> &str;
    fn warm_up(&self) -> usize;
    fn calculate(&self, closes: &[Price]) -> Vec<Option<f64>>;
}

pub struct SimpleMovingAverage {
    pub period: usize,
}

impl Indicator for SimpleMovingAverage {
    fn name(&self) -> &str {
        "SMA"
    }

    fn warm_up(&self) -> usize {
        self.period.saturating_sub(1)
    }

    fn calculate(&self, closes: &[Price]) -> Vec<Option<f64>> {
        let mut ma = MovingAverage::new(self.period);
        closes.iter().map(|close| ma.feed(*close)).collect()
    }
}

/// EMA seeded with the first close, so it has no warm-up gap.
pub struct ExponentialMovingAverage {
    pub period: usize,
}

impl Indicator for ExponentialMovingAverage {
    fn name(&self) -> &str {
        "EMA"
    }

    fn warm_up(&self) -> usize {
        0
    }

    fn calculate(&self, closes: &[Price]) -> Vec<Option<f64>> {
        let k = 2.0 / (self.period as f64 + 1.0);
        let mut prev: Option<f64> = None;

        closes
            .iter()
            .map(|close| {
                let next = match prev {
                    Some(prev) => (close - prev) * k + prev,
                    None => *close,
                };
                prev = Some(next);
                prev
            })
            .collect()
    }
}

/// RSI with Wilder smoothing. The first value lands on index `period`,
/// once `period` deltas have been seen.
pub struct RelativeStrengthIndex {
    pub period: usize,
}

impl Indicator for RelativeStrengthIndex {
    fn name(&self) -> &str {
        "RSI"
    }

    fn warm_up(&self) -> usize {
        self.period
    }

    fn calculate(&self, closes: &[Price]) -> Vec<Option<f64>> {
        if closes.is_empty() {
            return Vec::new();
        }

        let mut gains = WilderAverage::new(self.period);
        let mut losses = WilderAverage::new(self.period);
        let mut result = Vec::with_capacity(closes.len());
        result.push(None);

        for (prev, next) in closes.iter().tuple_windows() {
            let delta = next - prev;
            let avg_gain = gains.feed(delta.max(0.0));
            let avg_loss = losses.feed((-delta).max(0.0));

            result.push(match (avg_gain, avg_loss) {
                (Some(gain), Some(loss)) => Some(rsi_from_averages(gain, loss)),
                _ => None,
            });
        }

        result
    }
}

fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        return 100.0;
    }
    100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Display, Serialize, Deserialize)]
pub enum RsiZone {
    Overbought,
    Neutral,
    Oversold,
}

impl RsiZone {
    pub fn of(rsi: f64) -> Self {
        if rsi >= RSI_OVERBOUGHT {
            RsiZone::Overbought
        } else if rsi <= RSI_OVERSOLD {
            RsiZone::Oversold
        } else {
            RsiZone::Neutral
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorPoint {
    #[serde(flatten)]
    pub price: PricePoint,
    pub moving_average_20: Option<f64>,
    pub rsi_14: Option<f64>,
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceMetrics {
    pub latest_price: Price,
    pub price_change: Price,
    /// Rounded to two decimals.
    pub price_change_pct: f64,
    pub period_return: f64,
    pub latest_rsi: Option<f64>,
    pub rsi_zone: Option<RsiZone>,
    pub data_points: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceAnalysis {
    pub series: Vec<IndicatorPoint>,
    pub metrics: PriceMetrics,
}

/// Derives MA20, RSI14 and the summary metrics for a chronologically
/// ordered series. Returns `None` when there is nothing to derive from.
pub fn derive_indicators(points: &[PricePoint]) -> Option<PriceAnalysis> {
    let metrics = price_metrics(points)?;
    let closes = points.iter().map(|p| p.close).collect_vec();

    let moving_average = SimpleMovingAverage {
        period: MOVING_AVERAGE_PERIOD,
    }
    .calculate(&closes);
    let rsi = RelativeStrengthIndex { period: RSI_PERIOD }.calculate(&closes);

    let series = points
        .iter()
        .zip(moving_average)
        .zip(rsi)
        .map(|((price, moving_average_20), rsi_14)| IndicatorPoint {
            price: *price,
            moving_average_20,
            rsi_14,
        })
        .collect_vec();

    let latest_rsi = series.last().and_then(|p| p.rsi_14);

    Some(PriceAnalysis {
        series,
        metrics: PriceMetrics {
            latest_rsi,
            rsi_zone: latest_rsi.map(RsiZone::of),
            ..metrics
        },
    })
}

fn price_metrics(points: &[PricePoint]) -> Option<PriceMetrics> {
    let first = points.first()?.close;
    let last = points.last()?.close;

    let (price_change, price_change_pct) = match points.len() {
        0 | 1 => (0.0, 0.0),
        n => {
            let prev = points[n - 2].close;
            let change = last - prev;
            (change, round_to(percent_of(change, prev), 2))
        }
    };

    Some(PriceMetrics {
        latest_price: last,
        price_change,
        price_change_pct,
        period_return: percent_of(last - first, first),
        latest_rsi: None,
        rsi_zone: None,
        data_points: points.len(),
    })
}

fn percent_of(change: Price, base: Price) -> f64 {
    if base == 0.0 {
        0.0
    } else {
        change / base * 100.0
    }
}
