mod depth;
mod greeks;
mod quote;

use std::path::Path;
use std::sync::Arc;

use neotick_core::{NeoAdapter, ReqwestHttpClient, StaticLookup};

use crate::cli::{Cli, Command};
use crate::error::CliError;

pub async fn run(cli: &Cli) -> Result<serde_json::Value, CliError> {
    match &cli.command {
        Command::Quote(args) => quote::run(args, &build_adapter(cli)?).await,
        Command::Depth(args) => depth::run(args, &build_adapter(cli)?).await,
        Command::Greeks(args) => greeks::run(args, cli).await,
    }
}

pub(crate) fn build_adapter(cli: &Cli) -> Result<NeoAdapter, CliError> {
    let lookup = match &cli.instruments {
        Some(path) => load_lookup(path)?,
        None => StaticLookup::default(),
    };

    let token = cli
        .token
        .clone()
        .or_else(|| std::env::var("NEOTICK_ACCESS_TOKEN").ok())
        .unwrap_or_default();

    Ok(
        NeoAdapter::new(Arc::new(ReqwestHttpClient::new()), Arc::new(lookup), token)
            .with_base_url(cli.base_url.clone())
            .with_timeout_ms(cli.timeout_ms),
    )
}

fn load_lookup(path: &Path) -> Result<StaticLookup, CliError> {
    let raw = std::fs::read_to_string(path)?;
    serde_json::from_str(&raw).map_err(|error| {
        CliError::Command(format!(
            "failed to parse instrument table {}: {error}",
            path.display()
        ))
    })
}
