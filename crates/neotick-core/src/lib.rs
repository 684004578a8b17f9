//! # Neotick Core
//!
//! Broker market-data adapter and option-Greeks engine for the neotick
//! toolkit.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Canonical domain models** for quotes, market depth, and Greeks
//!   results
//! - **Option symbol parsing** for composite tickers such as
//!   `NIFTY28NOV2424000CE`
//! - **Exchange classification** from curated, configurable symbol tables
//! - **The Neo quotes adapter** with its documented default-record failure
//!   policy
//! - **A Black-Scholes pricing backend** behind an injectable trait
//! - **The Greeks calculator** pipeline (parse → expiry → implied
//!   volatility → Greeks)
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | Broker adapters (Neo quotes API) |
//! | [`broker`] | Broker market-data seam trait |
//! | [`config`] | Curated market classification tables |
//! | [`domain`] | Domain models (QuoteRecord, DepthRecord, OptionSymbol) |
//! | [`error`] | Validation and calculator error types |
//! | [`greeks`] | Implied-volatility and Greeks calculator |
//! | [`http_client`] | HTTP client abstraction |
//! | [`lookup`] | Vendor instrument-identifier resolution |
//! | [`pricing`] | Black-Scholes pricing backend |
//!
//! ## Quick Start
//!
//! ```rust
//! use neotick_core::{Exchange, GreeksCalculator, GreeksRequest};
//!
//! let calculator = GreeksCalculator::default();
//! let request = GreeksRequest::new("NIFTY28NOV2424000CE", Exchange::Nfo);
//! match calculator.calculate(&request, 24050.0, 180.0) {
//!     Ok(result) => println!("IV: {}%", result.implied_volatility),
//!     Err(error) => eprintln!("{} (HTTP {})", error.message(), error.status_code()),
//! }
//! ```
//!
//! ## Error Handling
//!
//! Failures live in two tiers. Quote and depth fetches never fail: lookup
//! misses, transport errors, bad statuses, and empty payloads all collapse
//! to the zero-valued default record, with the internal reason logged.
//! Calculator failures are explicit [`GreeksError`] values carrying a
//! message and an HTTP-style status code (400 validation/expired, 404
//! missing price, 500 pricing failure).

pub mod adapters;
pub mod broker;
pub mod config;
pub mod domain;
pub mod error;
pub mod greeks;
pub mod http_client;
pub mod lookup;
pub mod pricing;

// Re-export commonly used types at crate root for convenience

pub use adapters::{FetchOutcome, NeoAdapter, DEFAULT_QUOTES_BASE_URL};

pub use broker::BrokerData;

pub use config::MarketConfig;

pub use domain::{
    round_dp, DepthLevel, DepthRecord, Exchange, Greeks, GreeksResult, HistoryBar, IntervalMatrix,
    OptionSide, OptionSymbol, QuoteRecord, DEPTH_LEVELS,
};

pub use error::{ErrorBody, GreeksError, GreeksErrorKind, ValidationError};

pub use greeks::{
    time_to_expiry, GreeksCalculator, GreeksRequest, QuoteFetcher, MIN_DAYS_TO_EXPIRY,
};

pub use http_client::{
    HttpAuth, HttpClient, HttpError, HttpMethod, HttpRequest, HttpResponse, NoopHttpClient,
    ReqwestHttpClient,
};

pub use lookup::{InstrumentEntry, InstrumentLookup, StaticLookup};

pub use pricing::{BlackScholes, BsParams, PricingError, PricingModel};
