//! Instrument identification and symbol filtering.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Symbols aggregated when no allow-list is configured: TAIEX futures and mini-TAIEX futures.
pub const DEFAULT_SYMBOLS: [&str; 2] = ["TX", "MTX"];

/// Identifies one tradable contract series as `<symbol>_<settlement period>`.
///
/// Keys order lexicographically, which fixes the order in which per-key
/// output is produced.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstrumentKey(String);

impl InstrumentKey {
    /// Builds the key for a symbol and settlement period.
    #[must_use]
    pub fn new(symbol: &str, settlement_period: &str) -> Self {
        Self(format!("{symbol}_{settlement_period}"))
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for InstrumentKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Allow-list of product symbols whose trades are aggregated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymbolSet(BTreeSet<String>);

impl SymbolSet {
    /// Creates an allow-list from the given symbols.
    pub fn new<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(symbols.into_iter().map(Into::into).collect())
    }

    /// Returns true if `symbol` is allowed. Matching is exact and case-sensitive.
    #[must_use]
    pub fn contains(&self, symbol: &str) -> bool {
        self.0.contains(symbol)
    }

    /// Returns true if no symbol is allowed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for SymbolSet {
    fn default() -> Self {
        Self::new(DEFAULT_SYMBOLS)
    }
}
