pub mod chains;
pub mod contracts;
pub mod export;
pub mod provider;
pub mod types;

use std::sync::Arc;

use alloy::primitives::{Address, U256};
use color_eyre::eyre::Result;
use tokio::sync::mpsc;

use crate::data::contracts::{IERC20, IVault};
use crate::data::provider::VaultProvider;
use crate::data::types::*;
use crate::events::AppEvent;

/// Addresses and amounts fixed for the lifetime of the session.
#[derive(Debug, Clone)]
pub struct VaultSettings {
    pub vault: Address,
    pub account: Address,
    pub token: TokenInfo,
    pub stable_token: Option<TokenInfo>,
    pub lock_duration_secs: u64,
    pub approve_amount: U256,
}

/// Operations the UI can request. Each call returns immediately; results
/// arrive later as `AppEvent`s.
pub trait VaultActions: Send + Sync {
    fn settings(&self) -> &VaultSettings;
    fn fetch_balances(&self);
    fn fetch_locks(&self);
    fn approve(&self);
    fn lock(&self, amount: U256);
    fn withdraw(&self, id: U256);

    /// Refresh everything shown on screen.
    fn refresh(&self) {
        self.fetch_balances();
        self.fetch_locks();
    }
}

/// Issues vault reads and transactions on background tasks and reports back
/// through the app event channel. Calls are independent of each other.
pub struct VaultService {
    provider: Arc<VaultProvider>,
    settings: Arc<VaultSettings>,
    event_tx: mpsc::UnboundedSender<AppEvent>,
}

impl VaultService {
    pub fn new(
        provider: VaultProvider,
        settings: VaultSettings,
        event_tx: mpsc::UnboundedSender<AppEvent>,
    ) -> Self {
        Self {
            provider: Arc::new(provider),
            settings: Arc::new(settings),
            event_tx,
        }
    }
}

impl VaultActions for VaultService {
    fn settings(&self) -> &VaultSettings {
        &self.settings
    }

    /// Fetch account balances, the vault's total locked balance and the current allowance.
    fn fetch_balances(&self) {
        let provider = Arc::clone(&self.provider);
        let settings = Arc::clone(&self.settings);
        let tx = self.event_tx.clone();

        tokio::spawn(async move {
            match load_balances(&provider, &settings).await {
                Ok(balances) => {
                    let _ = tx.send(AppEvent::BalancesLoaded(balances));
                }
                Err(e) => {
                    tracing::warn!(error = %e, "balance refresh failed");
                    let _ = tx.send(AppEvent::BalancesFailed(format!("Failed to load balances: {e}")));
                }
            }
        });
    }

    /// Fetch every lock whose withdrawer is the account, newest first.
    fn fetch_locks(&self) {
        let provider = Arc::clone(&self.provider);
        let settings = Arc::clone(&self.settings);
        let tx = self.event_tx.clone();

        tokio::spawn(async move {
            match load_locks(&provider, &settings).await {
                Ok(locks) => {
                    tracing::debug!(count = locks.len(), "locks loaded");
                    let _ = tx.send(AppEvent::LocksLoaded(locks));
                }
                Err(e) => {
                    tracing::warn!(error = %e, "lock refresh failed");
                    let _ = tx.send(AppEvent::LocksFailed(format!("Failed to load locks: {e}")));
                }
            }
        });
    }

    /// Grant the vault an allowance over the locked token.
    fn approve(&self) {
        let provider = Arc::clone(&self.provider);
        let settings = Arc::clone(&self.settings);
        let tx = self.event_tx.clone();

        tokio::spawn(async move {
            let call = IERC20::approveCall {
                spender: settings.vault,
                amount: settings.approve_amount,
            };
            let result = provider.send(settings.token.address, call).await;
            report_tx(&tx, TxKind::Approve, result);
        });
    }

    /// Lock `amount` base units until the latest block time plus the configured duration.
    fn lock(&self, amount: U256) {
        let provider = Arc::clone(&self.provider);
        let settings = Arc::clone(&self.settings);
        let tx = self.event_tx.clone();

        tokio::spawn(async move {
            let result = async {
                let now = provider.latest_block_timestamp().await?;
                let unlock_time = unlock_time_from(now, settings.lock_duration_secs);
                tracing::info!(%amount, unlock_time, "locking tokens");
                let call = IVault::lockTokensCall {
                    token: settings.token.address,
                    withdrawer: settings.account,
                    amount,
                    unlockTime: U256::from(unlock_time),
                };
                provider.send(settings.vault, call).await
            }
            .await;
            report_tx(&tx, TxKind::Lock, result);
        });
    }

    /// Withdraw the lock with the given identifier.
    fn withdraw(&self, id: U256) {
        let provider = Arc::clone(&self.provider);
        let settings = Arc::clone(&self.settings);
        let tx = self.event_tx.clone();

        tokio::spawn(async move {
            tracing::info!(%id, "withdrawing lock");
            let call = IVault::withdrawTokensCall { id };
            let result = provider.send(settings.vault, call).await;
            report_tx(&tx, TxKind::Withdraw, result);
        });
    }
}

async fn load_balances(provider: &VaultProvider, settings: &VaultSettings) -> Result<Balances> {
    let (native, stable, total_locked, allowance) = tokio::join!(
        provider.native_balance(settings.account),
        async {
            match &settings.stable_token {
                Some(stable) => provider
                    .call(stable.address, IERC20::balanceOfCall { account: settings.account })
                    .await
                    .map(|r| Some(r.balance)),
                None => Ok(None),
            }
        },
        provider.call(
            settings.vault,
            IVault::getTokenTotalLockedBalanceCall {
                token: settings.token.address,
            },
        ),
        provider.call(
            settings.token.address,
            IERC20::allowanceCall {
                owner: settings.account,
                spender: settings.vault,
            },
        ),
    );

    // The stable balance is informational; a failing read shows as unavailable.
    let stable = stable.unwrap_or_else(|e| {
        tracing::debug!(error = %e, "stable token balance unavailable");
        None
    });

    Ok(Balances {
        native: native?,
        stable,
        total_locked: total_locked?.balance,
        allowance: allowance?.remaining,
    })
}

async fn load_locks(provider: &VaultProvider, settings: &VaultSettings) -> Result<Vec<LockRecord>> {
    let ids = provider
        .call(
            settings.vault,
            IVault::getVaultsByWithdrawerCall {
                withdrawer: settings.account,
            },
        )
        .await?
        .ids;

    let lookups = ids.into_iter().map(|id| async move {
        let raw = provider
            .call(settings.vault, IVault::getVaultByIdCall { id })
            .await?;
        Ok::<_, color_eyre::eyre::Report>(LockRecord {
            id,
            token: raw.token,
            withdrawer: raw.withdrawer,
            amount: raw.amount,
            unlock_time: raw.unlockTime.saturating_to::<u64>(),
            withdrawn: raw.withdrawn,
            deposited: raw.deposited,
        })
    });
    let locks = futures::future::try_join_all(lookups).await?;

    Ok(newest_first(locks))
}

/// Locks come back in creation order; the table lists the newest first.
fn newest_first(mut locks: Vec<LockRecord>) -> Vec<LockRecord> {
    locks.reverse();
    locks
}

fn unlock_time_from(block_timestamp: u64, lock_duration_secs: u64) -> u64 {
    block_timestamp.saturating_add(lock_duration_secs)
}

fn report_tx(
    tx: &mpsc::UnboundedSender<AppEvent>,
    kind: TxKind,
    result: Result<alloy::rpc::types::TransactionReceipt>,
) {
    let event = match result {
        Ok(receipt) => AppEvent::TxConfirmed(TxOutcome {
            kind,
            hash: receipt.transaction_hash,
            block_number: receipt.block_number,
        }),
        Err(e) => {
            tracing::error!(%kind, error = %e, "transaction failed");
            AppEvent::TxFailed {
                kind,
                error: e.to_string(),
            }
        }
    };
    let _ = tx.send(event);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lock(id: u64) -> LockRecord {
        LockRecord {
            id: U256::from(id),
            token: Address::ZERO,
            withdrawer: Address::ZERO,
            amount: U256::from(1u64),
            unlock_time: 0,
            withdrawn: false,
            deposited: true,
        }
    }

    #[test]
    fn test_newest_first() {
        let ordered = newest_first(vec![lock(0), lock(1), lock(2)]);
        let ids: Vec<u64> = ordered.iter().map(|l| l.id.to::<u64>()).collect();
        assert_eq!(ids, vec![2, 1, 0]);
    }

    #[test]
    fn test_newest_first_empty() {
        assert!(newest_first(vec![]).is_empty());
    }

    #[test]
    fn test_unlock_time_one_minute_later() {
        assert_eq!(unlock_time_from(1_700_000_000, 60), 1_700_000_060);
        assert_eq!(unlock_time_from(u64::MAX, 60), u64::MAX);
    }

    #[test]
    fn test_report_tx_failure_event() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        report_tx(
            &tx,
            TxKind::Withdraw,
            Err(color_eyre::eyre::eyre!("execution reverted: not yet unlocked")),
        );
        match rx.try_recv().unwrap() {
            AppEvent::TxFailed { kind, error } => {
                assert_eq!(kind, TxKind::Withdraw);
                assert!(error.contains("not yet unlocked"));
            }
            other => panic!("unexpected event {other:?}"),
        }
    }
}
