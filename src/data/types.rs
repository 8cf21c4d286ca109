use alloy::primitives::{Address, B256, U256};

#[derive(Debug, Clone)]
pub struct ChainConfig {
    pub name: String,
    pub chain_id: u64,
    pub rpc_url: String,
    pub native_symbol: String,
    pub stable_symbol: String,
    pub explorer_url: Option<String>,
}

/// The ERC-20 token the vault locks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenInfo {
    pub address: Address,
    pub symbol: String,
    pub decimals: u8,
}

/// Values shown in the wallet panel, as of the last successful read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Balances {
    pub native: U256,
    pub stable: Option<U256>,
    pub total_locked: U256,
    pub allowance: U256,
}

/// One lock held by the vault: its identifier followed by the raw fields of `getVaultById`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockRecord {
    pub id: U256,
    pub token: Address,
    pub withdrawer: Address,
    pub amount: U256,
    pub unlock_time: u64,
    pub withdrawn: bool,
    pub deposited: bool,
}

impl LockRecord {
    /// Whether the unlock time has passed and the tokens are still held.
    pub fn is_withdrawable(&self, now: u64) -> bool {
        !self.withdrawn && self.deposited && now >= self.unlock_time
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxKind {
    Approve,
    Lock,
    Withdraw,
}

impl TxKind {
    /// Status line shown once the transaction's receipt is in.
    pub fn success_message(&self, symbol: &str) -> String {
        match self {
            TxKind::Approve => "Approved!!".to_string(),
            TxKind::Lock => format!("{symbol} locked!"),
            TxKind::Withdraw => format!("{symbol} unlocked!"),
        }
    }
}

impl std::fmt::Display for TxKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TxKind::Approve => write!(f, "approve"),
            TxKind::Lock => write!(f, "lock"),
            TxKind::Withdraw => write!(f, "withdraw"),
        }
    }
}

/// A mined, successful vault or token transaction.
#[derive(Debug, Clone)]
pub struct TxOutcome {
    pub kind: TxKind,
    pub hash: B256,
    pub block_number: Option<u64>,
}
