use derive_more::{AsRef, Display};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::error::InsightError;

#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum Exchange {
    #[default]
    #[display(fmt = "NSE")]
    Nse,
    #[display(fmt = "BSE")]
    Bse,
}

impl Exchange {
    pub fn suffix(&self) -> &'static str {
        match self {
            Exchange::Nse => ".NS",
            Exchange::Bse => ".BO",
        }
    }

    fn of(symbol: &str) -> Option<Exchange> {
        [Exchange::Nse, Exchange::Bse]
            .into_iter()
            .find(|e| symbol.ends_with(e.suffix()))
    }
}

/// Exchange-qualified ticker, e.g. `RELIANCE.NS`.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Display, AsRef, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    /// Normalizes onto the NSE when no exchange suffix is given.
    pub fn parse(input: &str) -> Result<Self, InsightError> {
        normalize(input, Exchange::Nse)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn exchange(&self) -> Exchange {
        Exchange::of(&self.0).unwrap_or_default()
    }

    /// Ticker without the exchange suffix; this is what news is searched by.
    pub fn company_name(&self) -> &str {
        let suffix = self.exchange().suffix();
        self.0.strip_suffix(suffix).unwrap_or(&self.0)
    }
}

impl TryFrom<String> for Symbol {
    type Error = InsightError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Symbol::parse(&value)
    }
}

impl From<Symbol> for String {
    fn from(value: Symbol) -> Self {
        value.0
    }
}

/// Uppercases, keeps `[A-Z0-9.]`, collapses runs of dots and appends the
/// exchange suffix unless one is already present.
pub fn normalize(input: &str, default_exchange: Exchange) -> Result<Symbol, InsightError> {
    let cleaned: String = input
        .trim()
        .to_uppercase()
        .chars()
        .filter(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || *c == '.')
        .dedup_by(|l, r| *l == '.' && *r == '.')
        .collect();
    let cleaned = cleaned.trim_matches('.');

    if cleaned.is_empty() {
        return Err(InsightError::InvalidSymbol {
            input: input.to_owned(),
        });
    }

    if Exchange::of(cleaned).is_some() {
        Ok(Symbol(cleaned.to_owned()))
    } else {
        Ok(Symbol(format!("{cleaned}{}", default_exchange.suffix())))
    }
}
