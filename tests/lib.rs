//! Shared test doubles for the behavior suites.

use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;

use neotick_core::{
    Exchange, GreeksError, HttpClient, HttpError, HttpRequest, HttpResponse, QuoteFetcher,
    QuoteRecord,
};

/// Transport double that replays a fixed response and records every request.
#[derive(Debug)]
pub struct ScriptedHttpClient {
    response: Result<HttpResponse, HttpError>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedHttpClient {
    pub fn responding(response: HttpResponse) -> Self {
        Self {
            response: Ok(response),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            response: Err(HttpError::new(message)),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn recorded_requests(&self) -> Vec<HttpRequest> {
        self.requests
            .lock()
            .expect("request store should not be poisoned")
            .clone()
    }
}

impl HttpClient for ScriptedHttpClient {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        self.requests
            .lock()
            .expect("request store should not be poisoned")
            .push(request);
        let response = self.response.clone();
        Box::pin(async move { response })
    }
}

/// Quote-fetch double keyed by (symbol, exchange).
#[derive(Debug, Default)]
pub struct TableQuoteFetcher {
    quotes: BTreeMap<(String, Exchange), QuoteRecord>,
}

impl TableQuoteFetcher {
    pub fn with_ltp(entries: &[(&str, Exchange, f64)]) -> Self {
        let quotes = entries
            .iter()
            .map(|(symbol, exchange, ltp)| {
                (
                    ((*symbol).to_owned(), *exchange),
                    QuoteRecord {
                        ltp: *ltp,
                        ..QuoteRecord::default()
                    },
                )
            })
            .collect();
        Self { quotes }
    }
}

impl QuoteFetcher for TableQuoteFetcher {
    fn fetch_quote<'a>(
        &'a self,
        symbol: &'a str,
        exchange: Exchange,
    ) -> Pin<Box<dyn Future<Output = Result<QuoteRecord, GreeksError>> + Send + 'a>> {
        let record = self
            .quotes
            .get(&(symbol.to_owned(), exchange))
            .copied()
            .unwrap_or_default();
        Box::pin(async move { Ok(record) })
    }
}
