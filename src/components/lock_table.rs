use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::components::pagination::Pagination;
use crate::components::Component;
use crate::data::types::LockRecord;
use crate::events::AppEvent;
use crate::theme::THEME;
use crate::utils;

/// The account's locks with client-side pagination.
pub struct LockTable {
    pub locks: Vec<LockRecord>,
    pub decimals: u8,
    pub loading: bool,
    pub focused: bool,
    pub pagination: Pagination,
    table_state: TableState,
}

impl LockTable {
    pub fn new(decimals: u8, rows_per_page: usize) -> Self {
        Self {
            locks: Vec::new(),
            decimals,
            loading: true,
            focused: true,
            pagination: Pagination::new(rows_per_page),
            table_state: TableState::default(),
        }
    }

    /// Replace the rows after a successful read, keeping the page in range.
    /// The highlighted lock stays highlighted while it is still on the page.
    pub fn set_locks(&mut self, locks: Vec<LockRecord>) {
        let selected_id = self.selected_lock().map(|lock| lock.id);
        self.locks = locks;
        self.loading = false;
        self.pagination.clamp(self.locks.len());

        let kept = selected_id
            .and_then(|id| self.visible().iter().position(|lock| lock.id == id));
        match kept {
            Some(idx) => self.table_state.select(Some(idx)),
            None => self.reset_selection(),
        }
    }

    /// Rows on the current page.
    pub fn visible(&self) -> &[LockRecord] {
        self.pagination.slice(&self.locks)
    }

    /// The highlighted lock, if the current page has one.
    pub fn selected_lock(&self) -> Option<&LockRecord> {
        let idx = self.table_state.selected()?;
        self.visible().get(idx)
    }

    fn reset_selection(&mut self) {
        let selected = if self.visible().is_empty() { None } else { Some(0) };
        self.table_state.select(selected);
    }

    fn select_next(&mut self) {
        let len = self.visible().len();
        if len == 0 {
            return;
        }
        let current = self.table_state.selected().unwrap_or(0);
        let next = if current + 1 >= len { current } else { current + 1 };
        self.table_state.select(Some(next));
    }

    fn select_prev(&mut self) {
        if self.visible().is_empty() {
            return;
        }
        let current = self.table_state.selected().unwrap_or(0);
        self.table_state.select(Some(current.saturating_sub(1)));
    }
}

fn build_rows(locks: &[LockRecord], decimals: u8, now: u64) -> Vec<Row<'static>> {
    locks
        .iter()
        .map(|lock| {
            let unlock_style = if lock.is_withdrawable(now) {
                THEME.success_style()
            } else {
                Style::default().fg(THEME.text)
            };
            Row::new(vec![
                Cell::from(Text::from(lock.id.to_string()).centered()).style(THEME.accent_style()),
                Cell::from(Text::from(utils::format_units(lock.amount, decimals)).centered())
                    .style(THEME.token_style()),
                Cell::from(
                    Text::from(format!(
                        "{} ({})",
                        utils::format_local_time(lock.unlock_time),
                        utils::format_countdown(lock.unlock_time, now)
                    ))
                    .centered(),
                )
                .style(unlock_style),
                Cell::from(Text::from(utils::yes_no(lock.withdrawn)).centered())
                    .style(THEME.flag_style(lock.withdrawn)),
                Cell::from(Text::from(utils::yes_no(lock.deposited)).centered())
                    .style(THEME.flag_style(lock.deposited)),
            ])
        })
        .collect()
}

impl Component for LockTable {
    fn handle_key(&mut self, key: KeyEvent) -> Option<AppEvent> {
        let total = self.locks.len();
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.select_next();
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.select_prev();
                None
            }
            KeyCode::Char('l') | KeyCode::Right | KeyCode::PageDown => {
                if self.pagination.next_page(total) {
                    self.reset_selection();
                }
                None
            }
            KeyCode::Char('h') | KeyCode::Left | KeyCode::PageUp => {
                if self.pagination.prev_page() {
                    self.reset_selection();
                }
                None
            }
            KeyCode::Char('g') | KeyCode::Home => {
                self.pagination.first_page();
                self.reset_selection();
                None
            }
            KeyCode::Char('G') | KeyCode::End => {
                self.pagination.last_page(total);
                self.reset_selection();
                None
            }
            KeyCode::Char('n') => {
                self.pagination.cycle_rows_per_page();
                self.reset_selection();
                None
            }
            KeyCode::Enter => self.selected_lock().map(|lock| AppEvent::SelectLock(lock.id)),
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let outer_block = Block::default()
            .title(format!(" Your Vaults ({}) ", self.locks.len()))
            .borders(Borders::ALL)
            .border_style(THEME.panel_border(self.focused));

        let inner = outer_block.inner(area);
        frame.render_widget(outer_block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(inner);

        if self.loading && self.locks.is_empty() {
            let loading = Paragraph::new("Loading locks...")
                .style(THEME.muted_style())
                .alignment(Alignment::Center);
            frame.render_widget(loading, chunks[0]);
        } else if self.locks.is_empty() {
            let empty = Paragraph::new("No locks for this account")
                .style(THEME.muted_style())
                .alignment(Alignment::Center);
            frame.render_widget(empty, chunks[0]);
        } else {
            let header = Row::new(
                ["Id", "Value", "Withdraw Until", "Withdrawn", "Deposited"]
                    .into_iter()
                    .map(|h| Cell::from(Text::from(h).centered())),
            )
            .style(THEME.table_header_style())
            .bottom_margin(0);

            let rows = build_rows(self.visible(), self.decimals, utils::now_unix());
            let widths = [
                Constraint::Percentage(12),
                Constraint::Percentage(22),
                Constraint::Percentage(40),
                Constraint::Percentage(13),
                Constraint::Percentage(13),
            ];

            let table = Table::new(rows, widths)
                .header(header)
                .row_highlight_style(THEME.selected_style())
                .highlight_symbol(" > ");

            frame.render_stateful_widget(table, chunks[0], &mut self.table_state);
        }

        // Pagination footer
        let total = self.locks.len();
        let footer = Line::from(vec![
            Span::styled("Rows per page: ", THEME.muted_style()),
            Span::styled(
                format!("{}", self.pagination.rows_per_page()),
                THEME.accent_style(),
            ),
            Span::styled(" [n]   ", THEME.muted_style()),
            Span::styled(self.pagination.label(total), Style::default().fg(THEME.text)),
            Span::styled(
                format!(
                    "   page {}/{} [h/l] ",
                    self.pagination.page() + 1,
                    self.pagination.page_count(total)
                ),
                THEME.muted_style(),
            ),
        ]);
        frame.render_widget(
            Paragraph::new(footer).alignment(Alignment::Right),
            chunks[1],
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{Address, U256};
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn locks(count: u64) -> Vec<LockRecord> {
        (0..count)
            .rev()
            .map(|id| LockRecord {
                id: U256::from(id),
                token: Address::ZERO,
                withdrawer: Address::ZERO,
                amount: U256::from(300_000_000_000_000_000u64),
                unlock_time: 1_700_000_000 + id,
                withdrawn: id % 2 == 0,
                deposited: true,
            })
            .collect()
    }

    fn visible_ids(table: &LockTable) -> Vec<u64> {
        table.visible().iter().map(|l| l.id.to::<u64>()).collect()
    }

    #[test]
    fn test_first_page_shows_newest() {
        let mut table = LockTable::new(18, 5);
        table.set_locks(locks(12));
        assert!(!table.loading);
        assert_eq!(visible_ids(&table), vec![11, 10, 9, 8, 7]);
    }

    #[test]
    fn test_paging_keys() {
        let mut table = LockTable::new(18, 5);
        table.set_locks(locks(12));
        table.handle_key(key(KeyCode::Char('l')));
        assert_eq!(visible_ids(&table), vec![6, 5, 4, 3, 2]);
        table.handle_key(key(KeyCode::Char('G')));
        assert_eq!(visible_ids(&table), vec![1, 0]);
        table.handle_key(key(KeyCode::Char('l')));
        assert_eq!(visible_ids(&table), vec![1, 0]);
        table.handle_key(key(KeyCode::Char('h')));
        assert_eq!(table.pagination.page(), 1);
        table.handle_key(key(KeyCode::Char('g')));
        assert_eq!(table.pagination.page(), 0);
    }

    #[test]
    fn test_rows_per_page_cycle_resets_page() {
        let mut table = LockTable::new(18, 2);
        table.set_locks(locks(12));
        table.handle_key(key(KeyCode::Right));
        assert_eq!(table.pagination.page(), 1);
        table.handle_key(key(KeyCode::Char('n')));
        assert_eq!(table.pagination.rows_per_page(), 5);
        assert_eq!(table.pagination.page(), 0);
        assert_eq!(visible_ids(&table).len(), 5);
    }

    #[test]
    fn test_enter_selects_highlighted_lock() {
        let mut table = LockTable::new(18, 5);
        table.set_locks(locks(3));
        table.handle_key(key(KeyCode::Down));
        match table.handle_key(key(KeyCode::Enter)) {
            Some(AppEvent::SelectLock(id)) => assert_eq!(id, U256::from(1u64)),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_selection_stays_within_page() {
        let mut table = LockTable::new(18, 2);
        table.set_locks(locks(5));
        for _ in 0..5 {
            table.handle_key(key(KeyCode::Down));
        }
        assert_eq!(table.selected_lock().unwrap().id, U256::from(3u64));
    }

    #[test]
    fn test_enter_on_empty_table() {
        let mut table = LockTable::new(18, 5);
        table.set_locks(vec![]);
        assert!(table.handle_key(key(KeyCode::Enter)).is_none());
    }

    #[test]
    fn test_refresh_with_fewer_locks_clamps_page() {
        let mut table = LockTable::new(18, 2);
        table.set_locks(locks(10));
        table.handle_key(key(KeyCode::Char('G')));
        assert_eq!(table.pagination.page(), 4);
        table.set_locks(locks(3));
        assert_eq!(table.pagination.page(), 1);
        assert_eq!(visible_ids(&table), vec![0]);
    }

    #[test]
    fn test_build_rows_one_per_lock() {
        let rows = build_rows(&locks(3), 18, 1_700_000_001);
        assert_eq!(rows.len(), 3);
    }

    #[test]
    fn test_refresh_keeps_highlighted_lock() {
        let mut table = LockTable::new(18, 5);
        table.set_locks(locks(4));
        table.handle_key(key(KeyCode::Down));
        table.handle_key(key(KeyCode::Down));
        assert_eq!(table.selected_lock().unwrap().id, U256::from(1u64));

        // A new lock lands at the top; the same lock stays highlighted one row lower
        table.set_locks(locks(5));
        assert_eq!(table.selected_lock().unwrap().id, U256::from(1u64));
        assert_eq!(table.table_state.selected(), Some(3));
    }

    #[test]
    fn test_refresh_without_highlighted_lock_selects_first_row() {
        let mut table = LockTable::new(18, 5);
        table.set_locks(locks(4));
        table.handle_key(key(KeyCode::Down));
        assert_eq!(table.selected_lock().unwrap().id, U256::from(2u64));

        table.set_locks(locks(2));
        assert_eq!(table.selected_lock().unwrap().id, U256::from(1u64));
    }
}
