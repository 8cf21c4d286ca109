mod app;
mod components;
mod config;
mod data;
mod events;
mod input;
mod logging;
mod theme;
mod utils;

use std::sync::Arc;

use alloy::primitives::Address;
use alloy::signers::local::PrivateKeySigner;
use clap::Parser;
use color_eyre::eyre::{eyre, Result, WrapErr};
use tokio::sync::mpsc;

use crate::app::{App, UiOptions};
use crate::config::Config;
use crate::data::contracts::{IERC20, GOLD_TOKEN_ID, STABLE_TOKEN_ID};
use crate::data::provider::VaultProvider;
use crate::data::types::TokenInfo;
use crate::data::{VaultService, VaultSettings};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    // A missing .env file is fine; flags and the environment still apply
    dotenv::dotenv().ok();

    let config = Config::parse();
    logging::init(&config.log_path())?;

    let chain = data::chains::get_chain_config(&config.chain);
    if chain.is_none() {
        eprintln!(
            "Unknown chain '{}', expected one of: {}",
            config.chain,
            data::chains::supported_chains().join(", ")
        );
    }

    let rpc_url = match (&config.rpc_url, &chain) {
        (Some(url), _) => url.clone(),
        (None, Some(c)) => c.rpc_url.clone(),
        (None, None) => return Err(eyre!("No RPC URL: pass --rpc-url or a known --chain")),
    };

    let signer: PrivateKeySigner = config
        .private_key
        .trim()
        .parse()
        .wrap_err("Invalid private key")?;
    let account = config.address.unwrap_or_else(|| signer.address());
    if account != signer.address() {
        tracing::warn!(
            %account,
            signer = %signer.address(),
            "displayed account differs from the signing key; transactions are sent by the key"
        );
    }

    eprintln!("Connecting to {rpc_url}...");
    let provider = VaultProvider::connect(&rpc_url, signer).await?;
    let chain_id = provider.chain_id();
    // Prefer the preset matching the node over the requested one
    let chain = data::chains::get_chain_config_by_id(chain_id).or(chain);
    eprintln!("Connected to chain {chain_id}, resolving token...");

    let token = resolve_token(&provider, config.token).await?;
    let stable_token = resolve_stable_token(&provider, config.stable_token).await;
    let approve_amount = input::parse_amount(&config.approve_amount, token.decimals)
        .wrap_err("Invalid --approve-amount")?;

    tracing::info!(
        vault = %config.vault,
        %account,
        token = %token.address,
        symbol = %token.symbol,
        stable = ?stable_token.as_ref().map(|t| t.address),
        "vault session configured"
    );

    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let _ = event_tx.send(events::AppEvent::Connected { chain_id, account });

    let settings = VaultSettings {
        vault: config.vault,
        account,
        token,
        stable_token,
        lock_duration_secs: config.lock_duration_secs,
        approve_amount,
    };
    let service = Arc::new(VaultService::new(provider, settings, event_tx));

    let mut app = App::with_service(
        service,
        event_rx,
        UiOptions {
            chain,
            initial_lock_amount: config.lock_amount.clone(),
            rows_per_page: config.rows_per_page,
            tick_rate_ms: config.tick_rate_ms,
        },
    );

    // Initialize terminal
    let terminal = ratatui::init();
    let result = app.run(terminal).await;

    // Restore terminal
    ratatui::restore();

    result
}

/// Use the configured token, or the chain's GoldToken from the Celo registry,
/// and read its symbol and decimals.
async fn resolve_token(provider: &VaultProvider, configured: Option<Address>) -> Result<TokenInfo> {
    let address = match configured {
        Some(addr) => addr,
        None => provider.registry_lookup(GOLD_TOKEN_ID).await.ok_or_else(|| {
            eyre!("Could not resolve {GOLD_TOKEN_ID} from the Celo registry; pass --token")
        })?,
    };

    read_token_info(provider, address).await
}

/// The stable token is display-only: when it cannot be resolved or its
/// metadata cannot be read, its balance shows as unavailable.
async fn resolve_stable_token(
    provider: &VaultProvider,
    configured: Option<Address>,
) -> Option<TokenInfo> {
    let address = match configured {
        Some(addr) => addr,
        None => provider.registry_lookup(STABLE_TOKEN_ID).await?,
    };
    match read_token_info(provider, address).await {
        Ok(info) => Some(info),
        Err(e) => {
            tracing::warn!(%address, error = %e, "stable token metadata unavailable");
            None
        }
    }
}

async fn read_token_info(provider: &VaultProvider, address: Address) -> Result<TokenInfo> {
    let (symbol, decimals) = tokio::join!(
        provider.call(address, IERC20::symbolCall {}),
        provider.call(address, IERC20::decimalsCall {}),
    );
    let symbol = symbol
        .map(|r| r.symbol)
        .wrap_err_with(|| format!("Token {address} has no symbol()"))?;
    let decimals = decimals
        .map(|r| r.decimals)
        .wrap_err_with(|| format!("Token {address} has no decimals()"))?;

    Ok(TokenInfo {
        address,
        symbol,
        decimals,
    })
}
