//! Implied-volatility and Greeks calculation.
//!
//! The pipeline is linear: parse the option symbol, compute time to expiry,
//! validate the numeric inputs, solve implied volatility from the observed
//! option price, recompute the Greeks at the solved volatility, round and
//! package. The pricing backend and the market tables are injected at
//! construction.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use time::macros::{format_description, offset};
use time::{OffsetDateTime, PrimitiveDateTime};
use tracing::{debug, info};

use crate::config::MarketConfig;
use crate::error::GreeksError;
use crate::pricing::{BlackScholes, BsParams, PricingModel};
use crate::{round_dp, Exchange, Greeks, GreeksResult, OptionSymbol, QuoteRecord};

/// Calendar-day floor applied to time-to-expiry before it reaches the
/// solver (~15 minutes).
pub const MIN_DAYS_TO_EXPIRY: f64 = 0.01;

const DAYS_PER_YEAR: f64 = 365.0;

/// Greeks calculation request. Optional fields override the derived
/// underlying leg, the per-segment interest-rate default, and the
/// per-segment expiry time.
#[derive(Debug, Clone, PartialEq)]
pub struct GreeksRequest {
    pub symbol: String,
    pub exchange: Exchange,
    /// Annualized interest rate in percent; segment default when absent.
    pub interest_rate: Option<f64>,
    pub underlying_symbol: Option<String>,
    pub underlying_exchange: Option<Exchange>,
    /// Custom expiry time "HH:MM".
    pub expiry_time: Option<String>,
}

impl GreeksRequest {
    pub fn new(symbol: impl Into<String>, exchange: Exchange) -> Self {
        Self {
            symbol: symbol.into(),
            exchange,
            interest_rate: None,
            underlying_symbol: None,
            underlying_exchange: None,
            expiry_time: None,
        }
    }

    pub fn with_interest_rate(mut self, rate: f64) -> Self {
        self.interest_rate = Some(rate);
        self
    }

    pub fn with_underlying(
        mut self,
        symbol: impl Into<String>,
        exchange: Option<Exchange>,
    ) -> Self {
        self.underlying_symbol = Some(symbol.into());
        self.underlying_exchange = exchange;
        self
    }

    pub fn with_expiry_time(mut self, expiry_time: impl Into<String>) -> Self {
        self.expiry_time = Some(expiry_time.into());
        self
    }
}

/// Quote-fetch collaborator used by the end-to-end orchestration.
pub trait QuoteFetcher: Send + Sync {
    fn fetch_quote<'a>(
        &'a self,
        symbol: &'a str,
        exchange: Exchange,
    ) -> Pin<Box<dyn Future<Output = Result<QuoteRecord, GreeksError>> + Send + 'a>>;
}

/// Option-Greeks calculator with an injected pricing backend.
pub struct GreeksCalculator {
    pricing: Arc<dyn PricingModel>,
    config: MarketConfig,
}

impl Default for GreeksCalculator {
    fn default() -> Self {
        Self::new(Arc::new(BlackScholes))
    }
}

impl GreeksCalculator {
    pub fn new(pricing: Arc<dyn PricingModel>) -> Self {
        Self {
            pricing,
            config: MarketConfig::default(),
        }
    }

    pub fn with_config(pricing: Arc<dyn PricingModel>, config: MarketConfig) -> Self {
        Self { pricing, config }
    }

    pub fn config(&self) -> &MarketConfig {
        &self.config
    }

    /// Calculate IV and Greeks from known spot and option prices.
    pub fn calculate(
        &self,
        request: &GreeksRequest,
        spot_price: f64,
        option_price: f64,
    ) -> Result<GreeksResult, GreeksError> {
        self.calculate_at(request, spot_price, option_price, now_ist())
    }

    /// Fetch spot and option prices through `quotes`, then calculate.
    ///
    /// The spot leg is keyed by the derived-or-overridden underlying
    /// symbol/exchange; the option leg by the request symbol/exchange. A
    /// zero or absent last traded price on either leg is a fetch failure,
    /// never a zero-price input.
    pub async fn fetch_and_calculate(
        &self,
        quotes: &dyn QuoteFetcher,
        request: &GreeksRequest,
    ) -> Result<GreeksResult, GreeksError> {
        let parsed = OptionSymbol::parse(
            &request.symbol,
            request.exchange,
            request.expiry_time.as_deref(),
        )?;

        let spot_symbol = request
            .underlying_symbol
            .clone()
            .unwrap_or_else(|| parsed.underlying.clone());
        let spot_exchange = request.underlying_exchange.unwrap_or_else(|| {
            self.config
                .underlying_exchange(&parsed.underlying, request.exchange)
        });

        info!(
            symbol = %spot_symbol,
            exchange = %spot_exchange,
            "fetching underlying spot price"
        );
        let spot_quote = quotes.fetch_quote(&spot_symbol, spot_exchange).await?;
        if spot_quote.ltp <= 0.0 {
            return Err(GreeksError::price_unavailable("underlying LTP not available"));
        }

        info!(symbol = %request.symbol, exchange = %request.exchange, "fetching option price");
        let option_quote = quotes
            .fetch_quote(&request.symbol, request.exchange)
            .await?;
        if option_quote.ltp <= 0.0 {
            return Err(GreeksError::price_unavailable("option LTP not available"));
        }

        self.calculate(request, spot_quote.ltp, option_quote.ltp)
    }

    pub(crate) fn calculate_at(
        &self,
        request: &GreeksRequest,
        spot_price: f64,
        option_price: f64,
        now: PrimitiveDateTime,
    ) -> Result<GreeksResult, GreeksError> {
        let parsed = OptionSymbol::parse(
            &request.symbol,
            request.exchange,
            request.expiry_time.as_deref(),
        )?;

        let days_to_expiry = time_to_expiry(parsed.expiry, now)?;

        if spot_price <= 0.0 || option_price <= 0.0 {
            return Err(GreeksError::invalid_request(
                "spot price and option price must be positive",
            ));
        }
        if parsed.strike <= 0.0 {
            return Err(GreeksError::invalid_request("strike price must be positive"));
        }

        let interest_rate = request
            .interest_rate
            .unwrap_or_else(|| self.config.default_interest_rate(request.exchange));

        let params = BsParams {
            spot: spot_price,
            strike: parsed.strike,
            // Callers speak annualized percent, the model a decimal fraction.
            rate: interest_rate / 100.0,
            time_years: days_to_expiry / DAYS_PER_YEAR,
            side: parsed.side,
        };

        let implied_volatility = self
            .pricing
            .implied_volatility(&params, option_price)
            .map_err(|error| {
                GreeksError::pricing(format!("failed to calculate implied volatility: {error}"))
            })?;

        let greeks = self.pricing.greeks(&params, implied_volatility);

        debug!(
            symbol = %request.symbol,
            iv = implied_volatility,
            days_to_expiry,
            "greeks calculated"
        );

        Ok(GreeksResult {
            symbol: request.symbol.clone(),
            exchange: request.exchange,
            underlying: parsed.underlying,
            strike: round_dp(parsed.strike, 2),
            option_type: parsed.side,
            expiry_date: format_expiry_date(parsed.expiry),
            days_to_expiry: round_dp(days_to_expiry, 4),
            spot_price: round_dp(spot_price, 2),
            option_price: round_dp(option_price, 2),
            interest_rate: round_dp(interest_rate, 2),
            implied_volatility: round_dp(implied_volatility * 100.0, 2),
            greeks: Greeks {
                delta: round_dp(greeks.delta, 4),
                gamma: round_dp(greeks.gamma, 6),
                theta: round_dp(greeks.theta, 4),
                vega: round_dp(greeks.vega, 4),
                rho: round_dp(greeks.rho, 6),
            },
        })
    }
}

/// Fractional days between `now` and `expiry`, floored at
/// [`MIN_DAYS_TO_EXPIRY`]. An expiry in the past is an explicit error, never
/// a floored value.
pub fn time_to_expiry(
    expiry: PrimitiveDateTime,
    now: PrimitiveDateTime,
) -> Result<f64, GreeksError> {
    if expiry < now {
        return Err(GreeksError::expired(format!(
            "option has expired on {}",
            format_expiry_date(expiry)
        )));
    }

    let days = (expiry - now).as_seconds_f64() / 86_400.0;
    Ok(days.max(MIN_DAYS_TO_EXPIRY))
}

/// Contract expiries are Indian-exchange wall-clock times; IST has no DST.
fn now_ist() -> PrimitiveDateTime {
    let now = OffsetDateTime::now_utc().to_offset(offset!(+5:30));
    PrimitiveDateTime::new(now.date(), now.time())
}

fn format_expiry_date(expiry: PrimitiveDateTime) -> String {
    let format = format_description!("[day]-[month repr:short]-[year]");
    expiry
        .format(&format)
        .unwrap_or_else(|_| expiry.date().to_string())
}
