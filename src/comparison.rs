use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{indicator::PriceAnalysis, model::Price, symbol::Symbol};

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClosePoint {
    pub date: NaiveDate,
    pub close: Price,
}

/// Close prices of one symbol on that symbol's own trading calendar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClosePriceLine {
    pub symbol: Symbol,
    pub points: Vec<ClosePoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodReturn {
    pub symbol: Symbol,
    pub period_return: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub lines: [ClosePriceLine; 2],
    pub returns: [PeriodReturn; 2],
}

fn close_line(symbol: &Symbol, analysis: &PriceAnalysis) -> ClosePriceLine {
    ClosePriceLine {
        symbol: symbol.clone(),
        points: analysis
            .series
            .iter()
            .map(|p| ClosePoint {
                date: p.price.date,
                close: p.price.close,
            })
            .collect(),
    }
}

/// Pairs two analyzed symbols for a dual-line chart. Nothing is produced
/// when the second symbol is missing or is the first one again.
pub fn compare(
    primary: (&Symbol, &PriceAnalysis),
    secondary: Option<(&Symbol, &PriceAnalysis)>,
) -> Option<Comparison> {
    let (symbol, analysis) = primary;
    let (other_symbol, other_analysis) = secondary?;

    if symbol == other_symbol {
        return None;
    }

    Some(Comparison {
        lines: [
            close_line(symbol, analysis),
            close_line(other_symbol, other_analysis),
        ],
        returns: [
            PeriodReturn {
                symbol: symbol.clone(),
                period_return: analysis.metrics.period_return,
            },
            PeriodReturn {
                symbol: other_symbol.clone(),
                period_return: other_analysis.metrics.period_return,
            },
        ],
    })
}

#[cfg(test)]
mod tests {
    use chrono::{Days, NaiveDate};

    use super::compare;
    use crate::{indicator::derive_indicators, model::PricePoint, symbol::Symbol};

    fn points(start: NaiveDate, step: u64, closes: &[f64]) -> Vec<PricePoint> {
        closes
            .iter()
            .enumerate()
            .map(|(ix, close)| PricePoint {
                date: start + Days::new(ix as u64 * step),
                close: *close,
                ..Default::default()
            })
            .collect()
    }

    #[test]
    fn unittest_compare_two_symbols() -> eyre::Result<()> {
        let start = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let tcs = Symbol::parse("TCS")?;
        let infy = Symbol::parse("INFY")?;
        let a = derive_indicators(&points(start, 1, &[100.0, 110.0, 120.0])).unwrap();
        let b = derive_indicators(&points(start, 2, &[50.0, 45.0])).unwrap();

        let comparison = compare((&tcs, &a), Some((&infy, &b))).unwrap();

        assert_eq!(comparison.lines[0].points.len(), 3);
        assert_eq!(comparison.lines[1].points.len(), 2);
        // each line keeps its own dates
        assert_eq!(comparison.lines[1].points[1].date, start + Days::new(2));
        assert_eq!(comparison.returns[0].symbol, tcs);
        assert!((comparison.returns[0].period_return - 20.0).abs() < 1e-9);
        assert!((comparison.returns[1].period_return + 10.0).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn unittest_compare_skips_same_or_missing_symbol() -> eyre::Result<()> {
        let start = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let analysis = derive_indicators(&points(start, 1, &[1.0, 2.0])).unwrap();
        let first = Symbol::parse("reliance")?;
        let again = Symbol::parse("RELIANCE.NS")?;

        assert!(compare((&first, &analysis), Some((&again, &analysis))).is_none());
        assert!(compare((&first, &analysis), None).is_none());
        Ok(())
    }
}
