use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::prelude::*;
use ratatui::widgets::*;
use tokio::sync::mpsc;

use crate::components::action_panel::ActionPanel;
use crate::components::header::Header;
use crate::components::help::HelpOverlay;
use crate::components::lock_table::LockTable;
use crate::components::status_bar::StatusBar;
use crate::components::wallet_panel::WalletPanel;
use crate::components::Component;
use crate::data::chains;
use crate::data::export;
use crate::data::types::{ChainConfig, TxKind};
use crate::data::VaultActions;
use crate::events::{AppEvent, ExportFormat, Focus};
use crate::input;
use crate::theme::THEME;

/// Settings the UI needs at construction, taken from the command line.
pub struct UiOptions {
    pub chain: Option<ChainConfig>,
    pub initial_lock_amount: String,
    pub rows_per_page: usize,
    pub tick_rate_ms: u64,
}

pub struct App {
    // Components
    header: Header,
    wallet: WalletPanel,
    actions: ActionPanel,
    lock_table: LockTable,
    status_bar: StatusBar,
    help: HelpOverlay,

    // Data
    service: Arc<dyn VaultActions>,
    event_rx: mpsc::UnboundedReceiver<AppEvent>,
    chain: Option<ChainConfig>,

    // State
    focus: Focus,
    should_quit: bool,
    tick_rate: Duration,
}

impl App {
    pub fn with_service(
        service: Arc<dyn VaultActions>,
        event_rx: mpsc::UnboundedReceiver<AppEvent>,
        options: UiOptions,
    ) -> Self {
        let vault = service.settings().vault;
        let token = service.settings().token.clone();
        let stable_token = service.settings().stable_token.clone();
        let (chain_name, native_symbol, stable_symbol) = match options.chain {
            Some(ref c) => (c.name.clone(), c.native_symbol.clone(), c.stable_symbol.clone()),
            None => (String::new(), "CELO".to_string(), "cUSD".to_string()),
        };

        Self {
            header: Header::new(chain_name, vault),
            wallet: WalletPanel::new(token.clone(), stable_token, native_symbol, stable_symbol),
            actions: ActionPanel::new(&options.initial_lock_amount),
            lock_table: LockTable::new(token.decimals, options.rows_per_page),
            status_bar: StatusBar::new(),
            help: HelpOverlay::new(),
            service,
            event_rx,
            chain: options.chain,
            focus: Focus::Locks,
            should_quit: false,
            tick_rate: Duration::from_millis(options.tick_rate_ms),
        }
    }

    pub async fn run(&mut self, mut terminal: ratatui::DefaultTerminal) -> color_eyre::Result<()> {
        // Initial load, as on mount
        self.service.refresh();
        self.sync_loading();

        let mut interval = tokio::time::interval(self.tick_rate);
        let mut events = EventStream::new();

        while !self.should_quit {
            tokio::select! {
                _ = interval.tick() => {
                    terminal.draw(|frame| self.render(frame))?;
                }
                Some(Ok(event)) = events.next() => {
                    self.handle_terminal_event(event);
                }
                Some(app_event) = self.event_rx.recv() => {
                    self.handle_app_event(app_event);
                }
            }
        }

        Ok(())
    }

    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();

        frame.render_widget(
            Block::default().style(Style::default().bg(THEME.bg)),
            area,
        );

        // Layout: header (1) | panels (7) | lock table (fill) | status bar (1)
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(7),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(area);

        self.header.render(frame, chunks[0]);

        let panels = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(chunks[1]);
        self.wallet.render(frame, panels[0]);
        self.actions.render(frame, panels[1]);

        self.lock_table.render(frame, chunks[2]);
        self.status_bar.render(frame, chunks[3]);

        // Overlays (rendered on top)
        self.help.render(frame, area);
    }

    fn handle_terminal_event(&mut self, event: Event) {
        let Event::Key(key) = event else {
            return;
        };
        // Only handle key press events (not release/repeat) for cross-platform compat
        if key.kind != KeyEventKind::Press {
            return;
        }

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        // Help overlay consumes all keys when visible
        if self.help.handle_key(key) {
            return;
        }

        match key.code {
            KeyCode::Tab => {
                self.set_focus(self.focus.next());
                return;
            }
            KeyCode::BackTab => {
                self.set_focus(self.focus.prev());
                return;
            }
            _ => {}
        }

        // Form fields own the keyboard while focused
        if self.actions.is_editing() {
            if let Some(event) = self.actions.handle_key(key) {
                self.handle_app_event(event);
            }
            return;
        }

        if let Some(event) = self.global_key(key) {
            self.handle_app_event(event);
            return;
        }

        if let Some(event) = self.lock_table.handle_key(key) {
            self.handle_app_event(event);
        }
    }

    /// Shortcuts available while no form field is focused.
    fn global_key(&mut self, key: KeyEvent) -> Option<AppEvent> {
        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                None
            }
            KeyCode::Char('?') => {
                self.help.toggle();
                None
            }
            KeyCode::Char('a') => Some(AppEvent::Approve),
            KeyCode::Char('b') => Some(AppEvent::RefreshBalances),
            KeyCode::Char('r') => Some(AppEvent::RefreshLocks),
            KeyCode::Char('u') => {
                self.handle_app_event(AppEvent::RefreshBalances);
                Some(AppEvent::RefreshLocks)
            }
            KeyCode::Char('e') => Some(AppEvent::Export(ExportFormat::Csv)),
            KeyCode::Char('E') => Some(AppEvent::Export(ExportFormat::Json)),
            KeyCode::Char('i') => Some(AppEvent::Focus(Focus::LockAmount)),
            KeyCode::Char('w') => Some(AppEvent::Focus(Focus::WithdrawId)),
            _ => None,
        }
    }

    fn handle_app_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Connected { chain_id, account } => {
                self.header.chain_id = chain_id;
                self.header.account = Some(account);
                self.status_bar.connected = true;
            }
            AppEvent::BalancesLoaded(balances) => {
                self.wallet.balances = Some(balances);
                self.wallet.loading = false;
                self.sync_loading();
            }
            AppEvent::BalancesFailed(msg) => {
                self.status_bar.error(msg);
                self.wallet.loading = false;
                self.sync_loading();
            }
            AppEvent::LocksLoaded(locks) => {
                self.lock_table.set_locks(locks);
                self.sync_loading();
            }
            AppEvent::LocksFailed(msg) => {
                self.status_bar.error(msg);
                self.lock_table.loading = false;
                self.sync_loading();
            }
            AppEvent::TxConfirmed(outcome) => {
                self.finish_pending();
                let symbol = self.service.settings().token.symbol.clone();
                self.status_bar.success(outcome.kind.success_message(&symbol));

                let hash = format!("{:#x}", outcome.hash);
                let url = self.chain.as_ref().and_then(|c| chains::tx_url(c, &hash));
                tracing::info!(
                    kind = %outcome.kind,
                    %hash,
                    block = ?outcome.block_number,
                    explorer = ?url,
                    "transaction mined"
                );

                match outcome.kind {
                    // The allowance is shown in the wallet panel
                    TxKind::Approve => {
                        self.wallet.loading = true;
                        self.service.fetch_balances();
                    }
                    TxKind::Lock | TxKind::Withdraw => {
                        self.wallet.loading = true;
                        self.lock_table.loading = true;
                        self.service.refresh();
                    }
                }
                self.sync_loading();
            }
            AppEvent::TxFailed { kind, error } => {
                self.finish_pending();
                tracing::debug!(%kind, "showing transaction failure");
                self.status_bar.error(error);
            }
            AppEvent::Approve => {
                if self.begin_pending(TxKind::Approve) {
                    self.service.approve();
                }
            }
            AppEvent::SubmitLock(text) => {
                let decimals = self.service.settings().token.decimals;
                match input::parse_amount(&text, decimals) {
                    Ok(amount) => {
                        if self.begin_pending(TxKind::Lock) {
                            self.service.lock(amount);
                        }
                    }
                    Err(e) => self.status_bar.error(e.to_string()),
                }
            }
            AppEvent::SubmitWithdraw(text) => match input::parse_lock_id(&text) {
                Ok(id) => {
                    if self.begin_pending(TxKind::Withdraw) {
                        self.service.withdraw(id);
                    }
                }
                Err(e) => self.status_bar.error(e.to_string()),
            },
            AppEvent::RefreshBalances => {
                self.wallet.loading = true;
                self.sync_loading();
                self.service.fetch_balances();
            }
            AppEvent::RefreshLocks => {
                self.status_bar.clear();
                self.lock_table.loading = true;
                self.sync_loading();
                self.service.fetch_locks();
            }
            AppEvent::SelectLock(id) => {
                self.actions.withdraw_id.set_value(id.to_string());
                self.set_focus(Focus::WithdrawId);
            }
            AppEvent::Export(format) => self.export(format),
            AppEvent::Focus(focus) => self.set_focus(focus),
        }
    }

    /// Mark a transaction as in flight. Only one is allowed at a time so the
    /// wallet's nonce stays sequential.
    fn begin_pending(&mut self, kind: TxKind) -> bool {
        if let Some(pending) = self.status_bar.pending {
            self.status_bar
                .error(format!("Wait for the pending {pending} transaction to confirm"));
            return false;
        }
        self.status_bar.clear();
        self.status_bar.pending = Some(kind);
        self.actions.pending = true;
        true
    }

    /// The status bar spins while either concurrent read is outstanding.
    fn sync_loading(&mut self) {
        self.status_bar.loading = self.wallet.loading || self.lock_table.loading;
    }

    fn finish_pending(&mut self) {
        self.status_bar.pending = None;
        self.actions.pending = false;
    }

    fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
        self.actions.focus = focus;
        self.lock_table.focused = focus == Focus::Locks;
    }

    fn export(&mut self, format: ExportFormat) {
        let token = &self.service.settings().token;
        let path = export::export_file_name(chrono::Utc::now().timestamp(), format.extension());
        let result = match format {
            ExportFormat::Csv => export::export_locks_csv(&self.lock_table.locks, token, &path),
            ExportFormat::Json => export::export_locks_json(&self.lock_table.locks, token, &path),
        };
        match result {
            Ok(msg) => {
                tracing::info!(%path, count = self.lock_table.locks.len(), "locks exported");
                self.status_bar.success(msg);
            }
            Err(e) => self.status_bar.error(e),
        }
    }
}
