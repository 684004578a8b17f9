//! Vendor instrument-identifier resolution.
//!
//! The symbol/token database is an external collaborator: adapters consume
//! it through [`InstrumentLookup`] and never own the data. [`StaticLookup`]
//! is the map-backed implementation used by tests and the CLI.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::Exchange;

/// Resolves platform symbols to vendor-specific identifiers.
pub trait InstrumentLookup: Send + Sync {
    /// Vendor instrument token for a symbol/exchange pair, if known.
    fn vendor_token(&self, symbol: &str, exchange: Exchange) -> Option<String>;

    /// Vendor exchange-segment code for a symbol/exchange pair, if known.
    fn vendor_segment(&self, symbol: &str, exchange: Exchange) -> Option<String>;
}

/// One row of a vendor instrument table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstrumentEntry {
    pub symbol: String,
    pub exchange: Exchange,
    pub token: String,
    pub segment: String,
}

/// In-memory instrument table, loadable from JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StaticLookup {
    entries: BTreeMap<String, InstrumentEntry>,
}

impl StaticLookup {
    pub fn new(entries: impl IntoIterator<Item = InstrumentEntry>) -> Self {
        let mut lookup = Self::default();
        for entry in entries {
            lookup.insert(entry);
        }
        lookup
    }

    pub fn insert(&mut self, entry: InstrumentEntry) {
        self.entries.insert(Self::key(&entry.symbol, entry.exchange), entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn key(symbol: &str, exchange: Exchange) -> String {
        format!("{}:{}", symbol.trim().to_ascii_uppercase(), exchange)
    }

    fn entry(&self, symbol: &str, exchange: Exchange) -> Option<&InstrumentEntry> {
        self.entries.get(&Self::key(symbol, exchange))
    }
}

impl InstrumentLookup for StaticLookup {
    fn vendor_token(&self, symbol: &str, exchange: Exchange) -> Option<String> {
        self.entry(symbol, exchange).map(|entry| entry.token.clone())
    }

    fn vendor_segment(&self, symbol: &str, exchange: Exchange) -> Option<String> {
        self.entry(symbol, exchange)
            .map(|entry| entry.segment.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> StaticLookup {
        StaticLookup::new([InstrumentEntry {
            symbol: String::from("INFY"),
            exchange: Exchange::Nse,
            token: String::from("1594"),
            segment: String::from("nse_cm"),
        }])
    }

    #[test]
    fn resolves_known_instruments() {
        let lookup = sample();
        assert_eq!(
            lookup.vendor_token("INFY", Exchange::Nse).as_deref(),
            Some("1594")
        );
        assert_eq!(
            lookup.vendor_segment("INFY", Exchange::Nse).as_deref(),
            Some("nse_cm")
        );
    }

    #[test]
    fn lookup_is_case_insensitive_on_symbol() {
        let lookup = sample();
        assert!(lookup.vendor_token(" infy ", Exchange::Nse).is_some());
    }

    #[test]
    fn misses_return_none() {
        let lookup = sample();
        assert!(lookup.vendor_token("INFY", Exchange::Bse).is_none());
        assert!(lookup.vendor_segment("TCS", Exchange::Nse).is_none());
    }

    #[test]
    fn loads_from_json_table() {
        let json = r#"{
            "INFY:NSE": {"symbol": "INFY", "exchange": "NSE", "token": "1594", "segment": "nse_cm"}
        }"#;
        let lookup: StaticLookup = serde_json::from_str(json).expect("table deserializes");
        assert_eq!(lookup.len(), 1);
        assert!(lookup.vendor_token("INFY", Exchange::Nse).is_some());
    }
}
