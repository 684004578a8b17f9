//! Market classification tables.
//!
//! Index/currency/commodity membership is deployment data, not logic: the
//! defaults below match the curated production tables, and the whole value
//! deserializes from JSON so operators can extend membership without a code
//! change.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::Exchange;

/// Curated symbol sets and per-segment defaults used by the exchange
/// classifier and the Greeks calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketConfig {
    pub nse_index_symbols: BTreeSet<String>,
    pub bse_index_symbols: BTreeSet<String>,
    pub currency_symbols: BTreeSet<String>,
    pub commodity_symbols: BTreeSet<String>,
    /// Default risk-free interest rate per segment, annualized percent.
    pub interest_rates: BTreeMap<Exchange, f64>,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            nse_index_symbols: string_set(&[
                "NIFTY",
                "BANKNIFTY",
                "FINNIFTY",
                "MIDCPNIFTY",
                "NIFTYNXT50",
                "NIFTYIT",
                "NIFTYPHARMA",
                "NIFTYBANK",
            ]),
            bse_index_symbols: string_set(&["SENSEX", "BANKEX", "SENSEX50"]),
            currency_symbols: string_set(&["USDINR", "EURINR", "GBPINR", "JPYINR"]),
            commodity_symbols: string_set(&[
                "GOLD",
                "GOLDM",
                "GOLDPETAL",
                "SILVER",
                "SILVERM",
                "SILVERMIC",
                "CRUDEOIL",
                "CRUDEOILM",
                "NATURALGAS",
                "COPPER",
                "ZINC",
                "LEAD",
                "ALUMINIUM",
                "NICKEL",
                "COTTONCANDY",
                "MENTHAOIL",
            ]),
            // Zero across the board: callers are expected to supply a rate
            // when they want one priced in.
            interest_rates: [Exchange::Nfo, Exchange::Bfo, Exchange::Cds, Exchange::Mcx]
                .into_iter()
                .map(|exchange| (exchange, 0.0))
                .collect(),
        }
    }
}

impl MarketConfig {
    /// Map an underlying symbol to the exchange used to source its spot
    /// price.
    ///
    /// Membership in a curated set wins; otherwise a currency- or
    /// commodity-segment option exchange forces the classification, and
    /// everything else falls through to NSE equity. Pure function, no I/O.
    pub fn underlying_exchange(&self, underlying: &str, option_exchange: Exchange) -> Exchange {
        if self.nse_index_symbols.contains(underlying) {
            return Exchange::NseIndex;
        }
        if self.bse_index_symbols.contains(underlying) {
            return Exchange::BseIndex;
        }
        if self.currency_symbols.contains(underlying) || option_exchange == Exchange::Cds {
            return Exchange::Cds;
        }
        if self.commodity_symbols.contains(underlying) || option_exchange == Exchange::Mcx {
            return Exchange::Mcx;
        }
        Exchange::Nse
    }

    /// Default annualized interest rate (percent) for an option exchange.
    pub fn default_interest_rate(&self, exchange: Exchange) -> f64 {
        self.interest_rates.get(&exchange).copied().unwrap_or(0.0)
    }
}

fn string_set(values: &[&str]) -> BTreeSet<String> {
    values.iter().map(|value| (*value).to_owned()).collect()
}
