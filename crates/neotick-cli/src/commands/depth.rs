use std::str::FromStr;

use neotick_core::{BrokerData, Exchange, NeoAdapter};

use crate::cli::QuoteArgs;
use crate::error::CliError;

pub async fn run(args: &QuoteArgs, adapter: &NeoAdapter) -> Result<serde_json::Value, CliError> {
    let exchange = Exchange::from_str(&args.exchange)?;
    let record = adapter.depth(&args.symbol, exchange).await;
    Ok(serde_json::to_value(record)?)
}
