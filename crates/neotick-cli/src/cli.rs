//! CLI argument definitions for neotick.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `quote` | Fetch a normalized quote for a symbol |
//! | `depth` | Fetch top-5 market depth for a symbol |
//! | `greeks` | Calculate implied volatility and Greeks for an option |
//!
//! # Examples
//!
//! ```bash
//! # Fetch a quote (token read from NEOTICK_ACCESS_TOKEN when --token is absent)
//! neotick quote INFY --exchange NSE --instruments instruments.json
//!
//! # Index quotes need no instrument table
//! neotick quote NIFTY --exchange NSE_INDEX
//!
//! # Offline Greeks from known prices
//! neotick greeks NIFTY28NOV2424000CE --spot 24050 --price 180 --pretty
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Neo quotes adapter and option-Greeks CLI.
#[derive(Debug, Parser)]
#[command(
    name = "neotick",
    author,
    version,
    about = "Neo quotes adapter and option-Greeks CLI",
    long_about = "Fetch normalized quotes and market depth from the Neo quotes API and \
calculate option implied volatility and Greeks.\n\
\n\
Quote and depth commands always print a record: when the instrument cannot be \
resolved or the upstream call fails, the record is all zeroes by design."
)]
pub struct Cli {
    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Vendor access token. Falls back to the NEOTICK_ACCESS_TOKEN
    /// environment variable.
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Quotes service base URL.
    #[arg(long, global = true, default_value = neotick_core::DEFAULT_QUOTES_BASE_URL)]
    pub base_url: String,

    /// Request timeout budget in milliseconds.
    #[arg(long, global = true, default_value_t = 5000)]
    pub timeout_ms: u64,

    /// Path to a JSON instrument table for vendor token/segment lookup.
    #[arg(long, global = true)]
    pub instruments: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch a normalized quote for a symbol.
    Quote(QuoteArgs),
    /// Fetch top-5 market depth for a symbol.
    Depth(QuoteArgs),
    /// Calculate implied volatility and Greeks for an option.
    Greeks(GreeksArgs),
}

#[derive(Debug, Args)]
pub struct QuoteArgs {
    /// Symbol, e.g. INFY or NIFTY.
    pub symbol: String,

    /// Exchange code (NSE, BSE, NFO, BFO, CDS, MCX, NSE_INDEX, BSE_INDEX).
    #[arg(long, default_value = "NSE")]
    pub exchange: String,
}

#[derive(Debug, Args)]
pub struct GreeksArgs {
    /// Option symbol, e.g. NIFTY28NOV2424000CE.
    pub symbol: String,

    /// Option exchange code (NFO, BFO, CDS, MCX).
    #[arg(long, default_value = "NFO")]
    pub exchange: String,

    /// Annualized interest rate in percent. Segment default when absent.
    #[arg(long)]
    pub interest_rate: Option<f64>,

    /// Underlying symbol override for the spot leg (e.g. NIFTY28NOV24FUT).
    #[arg(long)]
    pub underlying_symbol: Option<String>,

    /// Underlying exchange override for the spot leg.
    #[arg(long)]
    pub underlying_exchange: Option<String>,

    /// Custom expiry time override, "HH:MM".
    #[arg(long)]
    pub expiry_time: Option<String>,

    /// Spot price override: skips the spot quote fetch.
    #[arg(long)]
    pub spot: Option<f64>,

    /// Option price override: skips the option quote fetch.
    #[arg(long)]
    pub price: Option<f64>,
}
