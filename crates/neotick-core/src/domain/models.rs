use serde::{Deserialize, Serialize};

use crate::{Exchange, OptionSide};

/// Depth records always carry exactly this many levels per side.
pub const DEPTH_LEVELS: usize = 5;

/// Normalized top-of-book quote.
///
/// Every field defaults to zero when the vendor omits it; a zero field is
/// indistinguishable from missing data by contract.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct QuoteRecord {
    pub bid: f64,
    pub ask: f64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub ltp: f64,
    pub prev_close: f64,
    pub volume: f64,
    pub oi: u64,
}

/// Single price level in the depth book.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DepthLevel {
    pub price: f64,
    pub quantity: u64,
}

/// Normalized five-level market depth.
///
/// `totalbuyqty`/`totalsellqty` are derived sums over the padded levels,
/// never independently sourced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepthRecord {
    pub bids: Vec<DepthLevel>,
    pub asks: Vec<DepthLevel>,
    pub totalbuyqty: u64,
    pub totalsellqty: u64,
}

impl DepthRecord {
    /// Build a depth record from raw vendor levels: truncate to the top
    /// five per side, zero-pad short sides, derive the quantity totals.
    pub fn from_levels(bids: Vec<DepthLevel>, asks: Vec<DepthLevel>) -> Self {
        let bids = pad_levels(bids);
        let asks = pad_levels(asks);
        let totalbuyqty = bids.iter().map(|level| level.quantity).sum();
        let totalsellqty = asks.iter().map(|level| level.quantity).sum();

        Self {
            bids,
            asks,
            totalbuyqty,
            totalsellqty,
        }
    }
}

impl Default for DepthRecord {
    fn default() -> Self {
        Self::from_levels(Vec::new(), Vec::new())
    }
}

fn pad_levels(mut levels: Vec<DepthLevel>) -> Vec<DepthLevel> {
    levels.truncate(DEPTH_LEVELS);
    levels.resize(DEPTH_LEVELS, DepthLevel::default());
    levels
}

/// OHLCV row shape for historical data responses.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistoryBar {
    pub timestamp: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// Supported candle intervals advertised by a broker adapter, grouped by
/// unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntervalMatrix {
    pub seconds: Vec<String>,
    pub minutes: Vec<String>,
    pub hours: Vec<String>,
    pub days: Vec<String>,
    pub weeks: Vec<String>,
    pub months: Vec<String>,
}

impl IntervalMatrix {
    pub fn is_empty(&self) -> bool {
        self.seconds.is_empty()
            && self.minutes.is_empty()
            && self.hours.is_empty()
            && self.days.is_empty()
            && self.weeks.is_empty()
            && self.months.is_empty()
    }
}

/// Option price sensitivities.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Greeks {
    pub delta: f64,
    pub gamma: f64,
    pub theta: f64,
    pub vega: f64,
    pub rho: f64,
}

/// Response value object for a Greeks calculation. Created fresh per
/// request, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GreeksResult {
    pub symbol: String,
    pub exchange: Exchange,
    pub underlying: String,
    pub strike: f64,
    pub option_type: OptionSide,
    pub expiry_date: String,
    pub days_to_expiry: f64,
    pub spot_price: f64,
    pub option_price: f64,
    pub interest_rate: f64,
    pub implied_volatility: f64,
    pub greeks: Greeks,
}

/// Round to a fixed number of decimal places.
pub fn round_dp(value: f64, decimals: u32) -> f64 {
    let factor = 10_f64.powi(decimals as i32);
    (value * factor).round() / factor
}
