use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::models::CompanyMeta;

/// Logo used for tickers with no directory entry
const FALLBACK_LOGO: &str = "https://logo.clearbit.com/yahoo.com";

lazy_static! {
    static ref BUILTIN_COMPANIES: HashMap<&'static str, CompanyMeta> = {
        let mut m = HashMap::new();
        m.insert("TSLA", CompanyMeta::new("Tesla", "https://logo.clearbit.com/tesla.com"));
        m.insert("AAPL", CompanyMeta::new("Apple", "https://logo.clearbit.com/apple.com"));
        m.insert(
            "MSFT",
            CompanyMeta::new("Microsoft", "https://logo.clearbit.com/microsoft.com"),
        );
        m
    };
}

/// Lookup table mapping ticker symbols to display metadata
///
/// Injected into the card builder so tests can substitute their own table.
/// Unknown tickers resolve to a deterministic fallback record instead of
/// failing.
#[derive(Debug, Clone)]
pub struct CompanyDirectory {
    entries: HashMap<String, CompanyMeta>,
    fallback_logo: String,
}

impl CompanyDirectory {
    /// Directory over the builtin company table
    pub fn builtin() -> Self {
        let entries = BUILTIN_COMPANIES
            .iter()
            .map(|(ticker, meta)| (ticker.to_string(), meta.clone()))
            .collect();
        Self {
            entries,
            fallback_logo: FALLBACK_LOGO.to_string(),
        }
    }

    /// Directory over a caller-supplied table
    pub fn with_entries(entries: HashMap<String, CompanyMeta>, fallback_logo: &str) -> Self {
        Self {
            entries,
            fallback_logo: fallback_logo.to_string(),
        }
    }

    /// Resolve a ticker to its display metadata
    ///
    /// Lookup is by exact uppercase match. Unmatched tickers get the ticker
    /// text itself as the display name and the generic placeholder logo.
    pub fn resolve(&self, ticker: &str) -> CompanyMeta {
        let key = ticker.to_uppercase();
        self.entries
            .get(&key)
            .cloned()
            .unwrap_or_else(|| CompanyMeta::new(&key, &self.fallback_logo))
    }
}
