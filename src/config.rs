use std::path::PathBuf;

use alloy::primitives::Address;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "vault-tui", about = "Terminal client for a token time-lock vault")]
pub struct Config {
    /// RPC endpoint URL (defaults to the chain preset's public node)
    #[arg(short, long, env = "VAULT_NODE_URL")]
    pub rpc_url: Option<String>,

    /// Hex-encoded private key used to sign transactions
    #[arg(long, env = "VAULT_PRIVATE_KEY", hide_env_values = true)]
    pub private_key: String,

    /// Account whose balances and locks are shown (defaults to the key's address)
    #[arg(short, long, env = "VAULT_ACCOUNT")]
    pub address: Option<Address>,

    /// Vault contract address
    #[arg(short, long, env = "VAULT_CONTRACT")]
    pub vault: Address,

    /// Chain preset (celo, alfajores, localhost)
    #[arg(long, env = "VAULT_CHAIN", default_value = "alfajores")]
    pub chain: String,

    /// Token to lock (defaults to the registry's GoldToken)
    #[arg(long, env = "VAULT_TOKEN")]
    pub token: Option<Address>,

    /// Stable token shown in the wallet panel (defaults to the registry's StableToken)
    #[arg(long, env = "VAULT_STABLE_TOKEN")]
    pub stable_token: Option<Address>,

    /// Seconds between the latest block timestamp and the unlock time of a new lock
    #[arg(long, default_value = "60")]
    pub lock_duration_secs: u64,

    /// Allowance granted to the vault by Approve, in whole tokens
    #[arg(long, default_value = "1000000")]
    pub approve_amount: String,

    /// Initial value of the lock amount field
    #[arg(long, default_value = "0.3")]
    pub lock_amount: String,

    /// Initial rows per page of the lock table (2, 5 or 10)
    #[arg(long, default_value = "5")]
    pub rows_per_page: usize,

    /// Tick rate in milliseconds for UI refresh
    #[arg(long, default_value = "100")]
    pub tick_rate_ms: u64,

    /// Log file path (the terminal is owned by the UI)
    #[arg(long, env = "VAULT_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

impl Config {
    /// Log file location, falling back to the platform's local data directory.
    pub fn log_path(&self) -> PathBuf {
        if let Some(ref path) = self.log_file {
            return path.clone();
        }
        dirs::data_local_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("vault-tui")
            .join("vault-tui.log")
    }
}
