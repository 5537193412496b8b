use std::{fmt, str::FromStr};

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{error::InsightError, symbol::Symbol};

pub type Price = f64;

/// One trading day of a price history.
#[derive(Default, Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub open: Price,
    pub high: Price,
    pub low: Price,
    pub close: Price,
    pub volume: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceSeries {
    pub symbol: Symbol,
    pub points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Keeps only the points inside `lookback`, counted back from the last date.
    pub fn trim_to(mut self, lookback: Lookback) -> Self {
        if let Some(last) = self.points.last() {
            let start = lookback.window_start(last.date);
            self.points.retain(|p| p.date >= start);
        }
        self
    }
}

/// Requested history window.
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Lookback {
    #[serde(rename = "1mo")]
    OneMonth,
    #[default]
    #[serde(rename = "3mo")]
    ThreeMonths,
    #[serde(rename = "6mo")]
    SixMonths,
    #[serde(rename = "1y")]
    OneYear,
    #[serde(rename = "2y")]
    TwoYears,
}

impl Lookback {
    pub const ALL: [Lookback; 5] = [
        Lookback::OneMonth,
        Lookback::ThreeMonths,
        Lookback::SixMonths,
        Lookback::OneYear,
        Lookback::TwoYears,
    ];

    pub fn months(&self) -> u32 {
        match self {
            Lookback::OneMonth => 1,
            Lookback::ThreeMonths => 3,
            Lookback::SixMonths => 6,
            Lookback::OneYear => 12,
            Lookback::TwoYears => 24,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Lookback::OneMonth => "1mo",
            Lookback::ThreeMonths => "3mo",
            Lookback::SixMonths => "6mo",
            Lookback::OneYear => "1y",
            Lookback::TwoYears => "2y",
        }
    }

    /// First calendar date inside the window ending at `last`.
    pub fn window_start(&self, last: NaiveDate) -> NaiveDate {
        last.checked_sub_months(Months::new(self.months()))
            .unwrap_or(NaiveDate::MIN)
    }
}

impl fmt::Display for Lookback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Lookback {
    type Err = InsightError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Lookback::ALL
            .into_iter()
            .find(|l| l.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| InsightError::UnknownLookback {
                input: s.to_owned(),
            })
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{Lookback, PricePoint, PriceSeries};
    use crate::symbol::Symbol;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn unittest_lookback_parse() -> eyre::Result<()> {
        assert_eq!("1mo".parse::<Lookback>()?, Lookback::OneMonth);
        assert_eq!(" 2Y ".parse::<Lookback>()?, Lookback::TwoYears);
        assert!("5y".parse::<Lookback>().is_err());
        assert_eq!(Lookback::default().to_string(), "3mo");
        Ok(())
    }

    #[test]
    fn unittest_lookback_window_start() {
        assert_eq!(Lookback::OneMonth.window_start(day(2024, 3, 31)), day(2024, 2, 29));
        assert_eq!(Lookback::OneYear.window_start(day(2024, 6, 14)), day(2023, 6, 14));
    }

    #[test]
    fn unittest_trim_to_keeps_window() -> eyre::Result<()> {
        let points = [day(2024, 1, 2), day(2024, 2, 15), day(2024, 3, 1), day(2024, 3, 28)]
            .into_iter()
            .map(|date| PricePoint {
                date,
                close: 10.0,
                ..Default::default()
            })
            .collect();
        let series = PriceSeries {
            symbol: Symbol::parse("TCS")?,
            points,
        }
        .trim_to(Lookback::OneMonth);

        let dates: Vec<_> = series.points.iter().map(|p| p.date).collect();
        assert_eq!(dates, vec![day(2024, 3, 1), day(2024, 3, 28)]);
        Ok(())
    }
}
