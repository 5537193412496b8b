use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::InsightError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchlistEntry {
    pub symbol: String,
    pub user_id: String,
}

/// Per-user symbol lists, kept in memory.
#[derive(Debug, Default)]
pub struct Watchlist {
    users: HashMap<String, Vec<WatchlistEntry>>,
}

fn clean(symbol: &str) -> Result<String, InsightError> {
    let symbol = symbol.trim().to_uppercase();
    if symbol.is_empty() {
        return Err(InsightError::InvalidSymbol { input: symbol });
    }
    Ok(symbol)
}

impl Watchlist {
    /// Returns `false` when the user already watches the symbol.
    pub fn add(&mut self, user_id: &str, symbol: &str) -> Result<bool, InsightError> {
        let symbol = clean(symbol)?;
        let entries = self.users.entry(user_id.to_owned()).or_default();

        if entries.iter().any(|e| e.symbol == symbol) {
            debug!(user_id, %symbol, "already in watchlist");
            return Ok(false);
        }

        entries.push(WatchlistEntry {
            symbol,
            user_id: user_id.to_owned(),
        });
        Ok(true)
    }

    /// Returns whether anything was removed.
    pub fn remove(&mut self, user_id: &str, symbol: &str) -> Result<bool, InsightError> {
        let symbol = clean(symbol)?;
        let entries = self
            .users
            .get_mut(user_id)
            .ok_or_else(|| InsightError::WatchlistNotFound {
                user_id: user_id.to_owned(),
            })?;

        let before = entries.len();
        entries.retain(|e| e.symbol != symbol);
        Ok(entries.len() != before)
    }

    pub fn list(&self, user_id: &str) -> &[WatchlistEntry] {
        self.users.get(user_id).map(Vec::as_slice).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::Watchlist;
    use crate::error::InsightError;

    #[test]
    fn unittest_add_deduplicates() -> eyre::Result<()> {
        let mut watchlist = Watchlist::default();

        assert!(watchlist.add("u1", " tcs ")?);
        assert!(!watchlist.add("u1", "TCS")?);
        assert!(watchlist.add("u1", "infy")?);
        assert!(watchlist.add("u2", "tcs")?);

        let symbols: Vec<_> = watchlist.list("u1").iter().map(|e| e.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["TCS", "INFY"]);
        assert_eq!(watchlist.list("u2")[0].user_id, "u2");
        assert!(watchlist.list("nobody").is_empty());
        Ok(())
    }

    #[test]
    fn unittest_add_rejects_blank_symbol() {
        let mut watchlist = Watchlist::default();
        assert!(watchlist.add("u1", "   ").is_err());
    }

    #[test]
    fn unittest_remove() -> eyre::Result<()> {
        let mut watchlist = Watchlist::default();
        watchlist.add("u1", "TCS")?;

        assert!(watchlist.remove("u1", "tcs")?);
        assert!(!watchlist.remove("u1", "tcs")?);
        assert!(watchlist.list("u1").is_empty());
        assert_eq!(
            watchlist.remove("u9", "TCS"),
            Err(InsightError::WatchlistNotFound {
                user_id: "u9".to_owned()
            })
        );
        Ok(())
    }
}
