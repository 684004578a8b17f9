//! Behavior-driven tests for the Neo quote adapter.
//!
//! These tests verify HOW the adapter handles vendor responses: the query
//! format, the normalization of payloads, and the default-record collapse
//! on every failure path.

use std::sync::Arc;

use neotick_core::{
    BrokerData, DepthRecord, Exchange, FetchOutcome, HttpResponse, InstrumentEntry, NeoAdapter,
    QuoteRecord, StaticLookup,
};
use neotick_tests::ScriptedHttpClient;

fn nifty_option_lookup() -> Arc<StaticLookup> {
    Arc::new(StaticLookup::new([InstrumentEntry {
        symbol: String::from("NIFTY28NOV2424000CE"),
        exchange: Exchange::Nfo,
        token: String::from("43612"),
        segment: String::from("nse_fo"),
    }]))
}

// =============================================================================
// Query construction
// =============================================================================

#[tokio::test]
async fn resolved_instruments_query_by_segment_and_token() {
    // Given: an instrument known to the lookup table
    let client = Arc::new(ScriptedHttpClient::responding(HttpResponse::ok_json("[]")));
    let adapter = NeoAdapter::new(client.clone(), nifty_option_lookup(), "tok");

    // When: a quote is requested
    let _ = adapter.quotes("NIFTY28NOV2424000CE", Exchange::Nfo).await;

    // Then: the vendor query is segment|token with the pipe unescaped
    let requests = client.recorded_requests();
    assert_eq!(requests.len(), 1);
    assert!(requests[0]
        .url
        .ends_with("/script-details/1.0/quotes/neosymbol/nse_fo|43612/all"));
}

#[tokio::test]
async fn index_requests_bypass_the_lookup_and_encode_spaces_only() {
    // Given: an empty lookup table
    let client = Arc::new(ScriptedHttpClient::responding(HttpResponse::ok_json("[]")));
    let adapter = NeoAdapter::new(client.clone(), Arc::new(StaticLookup::default()), "tok");

    // When: an index quote is requested
    let _ = adapter.quotes("NIFTY", Exchange::NseIndex).await;

    // Then: the static name map supplies the vendor symbol; the pipe stays
    // raw while the space is percent-encoded
    let requests = client.recorded_requests();
    assert!(requests[0].url.contains("nse_cm|Nifty%2050"));
}

#[tokio::test]
async fn requests_carry_the_raw_access_token() {
    let client = Arc::new(ScriptedHttpClient::responding(HttpResponse::ok_json("[]")));
    let adapter = NeoAdapter::new(client.clone(), nifty_option_lookup(), "session-token-9");

    let _ = adapter.quotes("NIFTY28NOV2424000CE", Exchange::Nfo).await;

    let requests = client.recorded_requests();
    // Scheme-less Authorization header, per the vendor convention.
    assert_eq!(
        requests[0].headers.get("authorization").map(String::as_str),
        Some("session-token-9")
    );
    assert_eq!(
        requests[0].headers.get("content-type").map(String::as_str),
        Some("application/json")
    );
}

// =============================================================================
// Failure collapse: the deliberate lossy contract
// =============================================================================

#[tokio::test]
async fn http_500_and_empty_array_are_indistinguishable_to_callers() {
    // Given: one upstream that errors and one that answers with no data
    let failing = Arc::new(ScriptedHttpClient::responding(HttpResponse::with_status(
        500,
        "internal error",
    )));
    let empty = Arc::new(ScriptedHttpClient::responding(HttpResponse::ok_json("[]")));

    // When: quotes are fetched through both
    let from_error = NeoAdapter::new(failing, nifty_option_lookup(), "tok")
        .quotes("NIFTY28NOV2424000CE", Exchange::Nfo)
        .await;
    let from_empty = NeoAdapter::new(empty, nifty_option_lookup(), "tok")
        .quotes("NIFTY28NOV2424000CE", Exchange::Nfo)
        .await;

    // Then: both collapse to the identical zero-valued record
    assert_eq!(from_error, from_empty);
    assert_eq!(from_error, QuoteRecord::default());
}

#[tokio::test]
async fn transport_failure_yields_the_default_record_not_an_error() {
    let client = Arc::new(ScriptedHttpClient::failing("connection reset"));
    let adapter = NeoAdapter::new(client, nifty_option_lookup(), "tok");

    let record = adapter.quotes("NIFTY28NOV2424000CE", Exchange::Nfo).await;
    assert_eq!(record, QuoteRecord::default());
}

#[tokio::test]
async fn lookup_miss_skips_the_network_and_reports_its_reason_internally() {
    let client = Arc::new(ScriptedHttpClient::responding(HttpResponse::ok_json("[]")));
    let adapter = NeoAdapter::new(client.clone(), Arc::new(StaticLookup::default()), "tok");

    let (record, outcome) = adapter.quotes_detailed("UNKNOWN", Exchange::Nse).await;

    assert_eq!(record, QuoteRecord::default());
    assert_eq!(outcome, FetchOutcome::LookupMiss);
    assert!(client.recorded_requests().is_empty());
}

#[tokio::test]
async fn depth_failures_collapse_to_the_zero_padded_default() {
    let client = Arc::new(ScriptedHttpClient::responding(HttpResponse::with_status(
        503,
        "unavailable",
    )));
    let adapter = NeoAdapter::new(client, nifty_option_lookup(), "tok");

    let record = adapter.depth("NIFTY28NOV2424000CE", Exchange::Nfo).await;

    assert_eq!(record, DepthRecord::default());
    assert_eq!(record.bids.len(), 5);
    assert_eq!(record.asks.len(), 5);
    assert_eq!(record.totalbuyqty, 0);
}

// =============================================================================
// Normalization
// =============================================================================

#[tokio::test]
async fn quote_payload_fields_map_into_the_record_shape() {
    let body = r#"[{
        "display_symbol": "NIFTY 28NOV24 24000 CE",
        "ltp": 161.75,
        "total_buy": 431250.0,
        "total_sell": 397800.0,
        "last_volume": 2145600,
        "open_int": 1894200,
        "ohlc": {"open": 150.0, "high": 188.4, "low": 141.2, "close": 155.1}
    }]"#;
    let client = Arc::new(ScriptedHttpClient::responding(HttpResponse::ok_json(body)));
    let adapter = NeoAdapter::new(client, nifty_option_lookup(), "tok");

    let record = adapter.quotes("NIFTY28NOV2424000CE", Exchange::Nfo).await;

    assert_eq!(record.ltp, 161.75);
    assert_eq!(record.bid, 431250.0);
    assert_eq!(record.ask, 397800.0);
    assert_eq!(record.open, 150.0);
    assert_eq!(record.high, 188.4);
    assert_eq!(record.low, 141.2);
    assert_eq!(record.prev_close, 155.1);
    assert_eq!(record.volume, 2145600.0);
    assert_eq!(record.oi, 1894200);
}

#[tokio::test]
async fn sparse_quote_payloads_normalize_missing_fields_to_zero() {
    // Only ltp present: everything else must default, not fail.
    let client = Arc::new(ScriptedHttpClient::responding(HttpResponse::ok_json(
        r#"[{"ltp": 99.5}]"#,
    )));
    let adapter = NeoAdapter::new(client, nifty_option_lookup(), "tok");

    let record = adapter.quotes("NIFTY28NOV2424000CE", Exchange::Nfo).await;

    assert_eq!(record.ltp, 99.5);
    assert_eq!(record.open, 0.0);
    assert_eq!(record.oi, 0);
}

#[tokio::test]
async fn three_level_depth_pads_to_five_and_totals_include_padding() {
    let body = r#"[{
        "depth": {
            "buy": [
                {"price": 161.7, "quantity": 500},
                {"price": 161.65, "quantity": 250},
                {"price": 161.6, "quantity": 125}
            ],
            "sell": [
                {"price": 161.8, "quantity": 300}
            ]
        }
    }]"#;
    let client = Arc::new(ScriptedHttpClient::responding(HttpResponse::ok_json(body)));
    let adapter = NeoAdapter::new(client, nifty_option_lookup(), "tok");

    let record = adapter.depth("NIFTY28NOV2424000CE", Exchange::Nfo).await;

    assert_eq!(record.bids.len(), 5);
    assert_eq!(record.bids[2].quantity, 125);
    assert_eq!(record.bids[3].price, 0.0);
    assert_eq!(record.bids[4].quantity, 0);
    // Totals are sums over the padded levels.
    assert_eq!(record.totalbuyqty, 875);
    assert_eq!(record.totalsellqty, 300);

    let as_json = serde_json::to_value(&record).expect("record serializes");
    assert_eq!(as_json["bids"].as_array().map(Vec::len), Some(5));
}

// =============================================================================
// Capability gaps
// =============================================================================

#[tokio::test]
async fn history_is_a_permanent_capability_gap() {
    let adapter = NeoAdapter::default();

    let bars = adapter
        .history(
            "NIFTY",
            Exchange::Nse,
            "15m",
            "2024-11-01",
            "2024-11-28",
        )
        .await;

    assert!(bars.is_empty());
    assert!(adapter.supported_intervals().is_empty());
}
