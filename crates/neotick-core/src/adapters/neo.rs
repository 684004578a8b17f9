use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::broker::BrokerData;
use crate::http_client::{HttpAuth, HttpClient, HttpRequest, NoopHttpClient};
use crate::lookup::{InstrumentLookup, StaticLookup};
use crate::{DepthLevel, DepthRecord, Exchange, HistoryBar, IntervalMatrix, QuoteRecord};

/// Quotes server host. Distinct from the broker's session/order hosts.
pub const DEFAULT_QUOTES_BASE_URL: &str = "https://cis.kotaksecurities.com";

const DEFAULT_TIMEOUT_MS: u64 = 5_000;

/// Response filter selecting which projection the quotes endpoint returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QuoteFilter {
    All,
    Depth,
}

impl QuoteFilter {
    const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Depth => "depth",
        }
    }
}

/// Why a quote/depth fetch did or did not produce live data.
///
/// Internal observability only: every non-`Ok` outcome still yields the
/// default record, and callers cannot tell the reasons apart. The reason is
/// logged so operators can.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Ok,
    /// The instrument lookup had no token or segment for the pair.
    LookupMiss,
    /// Transport-level failure (connect, timeout, TLS).
    Transport,
    /// Upstream answered with a non-success status.
    UpstreamStatus(u16),
    /// Upstream answered 200 with an empty or absent array.
    EmptyPayload,
    /// The payload decoded as JSON but not as the expected shape.
    MalformedPayload,
}

impl FetchOutcome {
    pub const fn is_ok(self) -> bool {
        matches!(self, Self::Ok)
    }
}

impl Display for FetchOutcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ok => f.write_str("ok"),
            Self::LookupMiss => f.write_str("lookup_miss"),
            Self::Transport => f.write_str("transport"),
            Self::UpstreamStatus(status) => write!(f, "upstream_status_{status}"),
            Self::EmptyPayload => f.write_str("empty_payload"),
            Self::MalformedPayload => f.write_str("malformed_payload"),
        }
    }
}

/// Neo quotes-API adapter.
///
/// Resolves vendor identifiers, issues one GET per request, and normalizes
/// the response. Failure policy: lookup misses, transport errors, non-200
/// statuses, and empty or malformed payloads all collapse to the zero-valued
/// default record. "Instrument not found", "transient network failure" and
/// "market closed with zero trades" are indistinguishable to callers; the
/// internal [`FetchOutcome`] is logged instead.
#[derive(Clone)]
pub struct NeoAdapter {
    http_client: Arc<dyn HttpClient>,
    lookup: Arc<dyn InstrumentLookup>,
    access_token: String,
    quotes_base_url: String,
    timeout_ms: u64,
}

impl Default for NeoAdapter {
    fn default() -> Self {
        Self {
            http_client: Arc::new(NoopHttpClient),
            lookup: Arc::new(StaticLookup::default()),
            access_token: String::new(),
            quotes_base_url: String::from(DEFAULT_QUOTES_BASE_URL),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl NeoAdapter {
    pub fn new(
        http_client: Arc<dyn HttpClient>,
        lookup: Arc<dyn InstrumentLookup>,
        access_token: impl Into<String>,
    ) -> Self {
        Self {
            http_client,
            lookup,
            access_token: access_token.into(),
            ..Self::default()
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.quotes_base_url = base_url.into();
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Fetch a quote along with the internal outcome reason.
    pub async fn quotes_detailed(
        &self,
        symbol: &str,
        exchange: Exchange,
    ) -> (QuoteRecord, FetchOutcome) {
        match self.fetch_quote_record(symbol, exchange).await {
            Ok(record) => (record, FetchOutcome::Ok),
            Err(outcome) => {
                warn!(
                    symbol,
                    exchange = %exchange,
                    reason = %outcome,
                    "quote fetch collapsed to default record"
                );
                (QuoteRecord::default(), outcome)
            }
        }
    }

    /// Fetch market depth along with the internal outcome reason.
    pub async fn depth_detailed(
        &self,
        symbol: &str,
        exchange: Exchange,
    ) -> (DepthRecord, FetchOutcome) {
        match self.fetch_depth_record(symbol, exchange).await {
            Ok(record) => (record, FetchOutcome::Ok),
            Err(outcome) => {
                warn!(
                    symbol,
                    exchange = %exchange,
                    reason = %outcome,
                    "depth fetch collapsed to default record"
                );
                (DepthRecord::default(), outcome)
            }
        }
    }

    async fn fetch_quote_record(
        &self,
        symbol: &str,
        exchange: Exchange,
    ) -> Result<QuoteRecord, FetchOutcome> {
        let query = self.resolve_query(symbol, exchange)?;
        let element = self.fetch_first_element(&query, QuoteFilter::All).await?;
        let payload: NeoQuotePayload =
            serde_json::from_value(element).map_err(|_| FetchOutcome::MalformedPayload)?;

        debug!(
            symbol,
            display_symbol = payload.display_symbol.as_deref().unwrap_or(""),
            "quote payload received"
        );

        Ok(QuoteRecord {
            // The `all` projection carries aggregate buy/sell columns where
            // a book would carry best bid/offer.
            bid: payload.total_buy,
            ask: payload.total_sell,
            open: payload.ohlc.open,
            high: payload.ohlc.high,
            low: payload.ohlc.low,
            ltp: payload.ltp,
            prev_close: payload.ohlc.close,
            volume: payload.last_volume,
            oi: payload.open_int,
        })
    }

    async fn fetch_depth_record(
        &self,
        symbol: &str,
        exchange: Exchange,
    ) -> Result<DepthRecord, FetchOutcome> {
        let query = self.resolve_query(symbol, exchange)?;
        let element = self.fetch_first_element(&query, QuoteFilter::Depth).await?;
        let payload: NeoDepthPayload =
            serde_json::from_value(element).map_err(|_| FetchOutcome::MalformedPayload)?;

        let bids = payload
            .depth
            .buy
            .into_iter()
            .map(NeoDepthLevel::into_level)
            .collect();
        let asks = payload
            .depth
            .sell
            .into_iter()
            .map(NeoDepthLevel::into_level)
            .collect();

        Ok(DepthRecord::from_levels(bids, asks))
    }

    /// Build the `<vendor_segment>|<token_or_name>` query string.
    ///
    /// Index instruments skip the lookup: the vendor addresses them by
    /// display name on the cash segment.
    fn resolve_query(&self, symbol: &str, exchange: Exchange) -> Result<String, FetchOutcome> {
        if exchange.is_index() {
            let name = index_display_name(symbol);
            return Ok(format!("{}|{}", exchange.vendor_segment(), name));
        }

        let token = self.lookup.vendor_token(symbol, exchange);
        let segment = self.lookup.vendor_segment(symbol, exchange);
        match (token, segment) {
            (Some(token), Some(segment)) => Ok(format!("{segment}|{token}")),
            _ => Err(FetchOutcome::LookupMiss),
        }
    }

    /// One GET against the quotes endpoint; returns the first element of
    /// the response array.
    async fn fetch_first_element(
        &self,
        query: &str,
        filter: QuoteFilter,
    ) -> Result<serde_json::Value, FetchOutcome> {
        // Encode everything except the pipe separating segment from symbol:
        // the endpoint expects `nse_cm|Nifty%2050`, not `nse_cm%7CNifty%2050`.
        let encoded = urlencoding::encode(query).replace("%7C", "|");
        let url = format!(
            "{}/script-details/1.0/quotes/neosymbol/{}/{}",
            self.quotes_base_url,
            encoded,
            filter.as_str()
        );

        debug!(url = %url, "quotes request");

        let request = HttpRequest::get(&url)
            .with_auth(&HttpAuth::Token(self.access_token.clone()))
            .with_header("content-type", "application/json")
            .with_timeout_ms(self.timeout_ms);

        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(|error| {
                debug!(error = %error, "quotes transport error");
                FetchOutcome::Transport
            })?;

        if !response.is_success() {
            return Err(FetchOutcome::UpstreamStatus(response.status));
        }

        let parsed: serde_json::Value =
            serde_json::from_str(&response.body).map_err(|_| FetchOutcome::MalformedPayload)?;

        match parsed {
            serde_json::Value::Array(mut items) if !items.is_empty() => Ok(items.swap_remove(0)),
            _ => Err(FetchOutcome::EmptyPayload),
        }
    }
}

impl BrokerData for NeoAdapter {
    fn quotes<'a>(
        &'a self,
        symbol: &'a str,
        exchange: Exchange,
    ) -> Pin<Box<dyn Future<Output = QuoteRecord> + Send + 'a>> {
        Box::pin(async move { self.quotes_detailed(symbol, exchange).await.0 })
    }

    fn depth<'a>(
        &'a self,
        symbol: &'a str,
        exchange: Exchange,
    ) -> Pin<Box<dyn Future<Output = DepthRecord> + Send + 'a>> {
        Box::pin(async move { self.depth_detailed(symbol, exchange).await.0 })
    }

    fn history<'a>(
        &'a self,
        symbol: &'a str,
        exchange: Exchange,
        interval: &'a str,
        start_date: &'a str,
        end_date: &'a str,
    ) -> Pin<Box<dyn Future<Output = Vec<HistoryBar>> + Send + 'a>> {
        let _ = (exchange, interval, start_date, end_date);
        Box::pin(async move {
            // Permanent vendor capability gap, not a transient failure.
            warn!(symbol, "historical data is not supported by the Neo quotes API");
            Vec::new()
        })
    }

    fn supported_intervals(&self) -> IntervalMatrix {
        warn!("historical intervals are not supported by the Neo quotes API");
        IntervalMatrix::default()
    }
}

impl crate::greeks::QuoteFetcher for NeoAdapter {
    fn fetch_quote<'a>(
        &'a self,
        symbol: &'a str,
        exchange: Exchange,
    ) -> Pin<Box<dyn Future<Output = Result<QuoteRecord, crate::GreeksError>> + Send + 'a>> {
        // The adapter itself never fails; a dead quote surfaces as ltp == 0
        // and is rejected by the calculator's price gate.
        Box::pin(async move { Ok(self.quotes_detailed(symbol, exchange).await.0) })
    }
}

/// Vendor index names differ from platform symbols.
fn index_display_name(symbol: &str) -> String {
    match symbol.trim().to_ascii_uppercase().as_str() {
        "NIFTY" | "NIFTY50" => String::from("Nifty 50"),
        "BANKNIFTY" => String::from("Nifty Bank"),
        "SENSEX" => String::from("SENSEX"),
        "BANKEX" => String::from("BANKEX"),
        "FINNIFTY" => String::from("Nifty Fin Service"),
        "MIDCPNIFTY" => String::from("NIFTY MIDCAP 100"),
        other => other.to_owned(),
    }
}

// Vendor payload shapes. Every field defaults so that a sparse payload
// normalizes to zeros rather than failing the decode.

#[derive(Debug, Default, Deserialize)]
struct NeoQuotePayload {
    #[serde(default)]
    ltp: f64,
    #[serde(default)]
    total_buy: f64,
    #[serde(default)]
    total_sell: f64,
    #[serde(default)]
    last_volume: f64,
    #[serde(default)]
    open_int: u64,
    #[serde(default)]
    ohlc: NeoOhlc,
    #[serde(default)]
    display_symbol: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct NeoOhlc {
    #[serde(default)]
    open: f64,
    #[serde(default)]
    high: f64,
    #[serde(default)]
    low: f64,
    #[serde(default)]
    close: f64,
}

#[derive(Debug, Default, Deserialize)]
struct NeoDepthPayload {
    #[serde(default)]
    depth: NeoDepthBook,
}

#[derive(Debug, Default, Deserialize)]
struct NeoDepthBook {
    #[serde(default)]
    buy: Vec<NeoDepthLevel>,
    #[serde(default)]
    sell: Vec<NeoDepthLevel>,
}

#[derive(Debug, Default, Deserialize)]
struct NeoDepthLevel {
    #[serde(default)]
    price: f64,
    #[serde(default)]
    quantity: u64,
}

impl NeoDepthLevel {
    fn into_level(self) -> DepthLevel {
        DepthLevel {
            price: self.price,
            quantity: self.quantity,
        }
    }
}
