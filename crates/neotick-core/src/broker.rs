//! Broker market-data seam.
//!
//! Each broker integration implements [`BrokerData`]; the platform talks to
//! the trait, never to a concrete adapter. Quote and depth results are
//! infallible by contract: any upstream failure collapses to the documented
//! zero-valued default record, so callers always receive a well-formed
//! value.

use std::future::Future;
use std::pin::Pin;

use crate::{DepthRecord, Exchange, HistoryBar, IntervalMatrix, QuoteRecord};

/// Market-data operations a broker adapter provides.
pub trait BrokerData: Send + Sync {
    /// Fetch a normalized quote. Never fails; unavailable data yields the
    /// all-zero default record.
    fn quotes<'a>(
        &'a self,
        symbol: &'a str,
        exchange: Exchange,
    ) -> Pin<Box<dyn Future<Output = QuoteRecord> + Send + 'a>>;

    /// Fetch normalized five-level market depth. Never fails; unavailable
    /// data yields the zero-padded default record.
    fn depth<'a>(
        &'a self,
        symbol: &'a str,
        exchange: Exchange,
    ) -> Pin<Box<dyn Future<Output = DepthRecord> + Send + 'a>>;

    /// Fetch historical candles for the interval and date range. Brokers
    /// without a history capability return an empty series.
    fn history<'a>(
        &'a self,
        symbol: &'a str,
        exchange: Exchange,
        interval: &'a str,
        start_date: &'a str,
        end_date: &'a str,
    ) -> Pin<Box<dyn Future<Output = Vec<HistoryBar>> + Send + 'a>>;

    /// Candle intervals this broker can serve history for.
    fn supported_intervals(&self) -> IntervalMatrix;
}
