use std::str::FromStr;

use neotick_core::{Exchange, GreeksCalculator, GreeksRequest};

use crate::cli::{Cli, GreeksArgs};
use crate::error::CliError;

pub async fn run(args: &GreeksArgs, cli: &Cli) -> Result<serde_json::Value, CliError> {
    let exchange = Exchange::from_str(&args.exchange)?;

    let mut request = GreeksRequest::new(args.symbol.clone(), exchange);
    if let Some(rate) = args.interest_rate {
        request = request.with_interest_rate(rate);
    }
    if let Some(symbol) = &args.underlying_symbol {
        let underlying_exchange = args
            .underlying_exchange
            .as_deref()
            .map(Exchange::from_str)
            .transpose()?;
        request = request.with_underlying(symbol.clone(), underlying_exchange);
    } else if let Some(raw) = &args.underlying_exchange {
        request.underlying_exchange = Some(Exchange::from_str(raw)?);
    }
    if let Some(expiry_time) = &args.expiry_time {
        request = request.with_expiry_time(expiry_time.clone());
    }

    let calculator = GreeksCalculator::default();

    let result = match (args.spot, args.price) {
        // Both prices supplied: pure offline calculation, no quote fetches.
        (Some(spot), Some(price)) => calculator.calculate(&request, spot, price)?,
        (None, None) => {
            let adapter = crate::commands::build_adapter(cli)?;
            calculator.fetch_and_calculate(&adapter, &request).await?
        }
        _ => {
            return Err(CliError::Command(String::from(
                "--spot and --price must be supplied together",
            )))
        }
    };

    Ok(serde_json::to_value(result)?)
}
