use alloy::primitives::{Address, U256};

use crate::data::types::{Balances, LockRecord, TxKind, TxOutcome};

/// Which part of the screen receives typed keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Locks,
    LockAmount,
    WithdrawId,
}

impl Focus {
    pub fn next(self) -> Focus {
        match self {
            Focus::Locks => Focus::LockAmount,
            Focus::LockAmount => Focus::WithdrawId,
            Focus::WithdrawId => Focus::Locks,
        }
    }

    pub fn prev(self) -> Focus {
        match self {
            Focus::Locks => Focus::WithdrawId,
            Focus::LockAmount => Focus::Locks,
            Focus::WithdrawId => Focus::LockAmount,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

/// Events sent from background data tasks and components to the main app loop
#[derive(Debug)]
pub enum AppEvent {
    // Chain reads
    BalancesLoaded(Balances),
    BalancesFailed(String),
    LocksLoaded(Vec<LockRecord>),
    LocksFailed(String),

    // Transactions
    TxConfirmed(TxOutcome),
    TxFailed { kind: TxKind, error: String },

    // User intents
    Approve,
    SubmitLock(String),
    SubmitWithdraw(String),
    RefreshBalances,
    RefreshLocks,
    SelectLock(U256),
    Export(ExportFormat),
    Focus(Focus),

    // Status
    Connected { chain_id: u64, account: Address },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_cycle_forward() {
        let mut focus = Focus::Locks;
        focus = focus.next();
        assert_eq!(focus, Focus::LockAmount);
        focus = focus.next();
        assert_eq!(focus, Focus::WithdrawId);
        focus = focus.next();
        assert_eq!(focus, Focus::Locks);
    }

    #[test]
    fn test_focus_prev_inverts_next() {
        for focus in [Focus::Locks, Focus::LockAmount, Focus::WithdrawId] {
            assert_eq!(focus.next().prev(), focus);
        }
    }
}
