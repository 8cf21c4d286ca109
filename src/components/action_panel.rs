use crossterm::event::KeyEvent;
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::components::text_input::{Charset, InputOutcome, TextInput};
use crate::components::Component;
use crate::events::{AppEvent, Focus};
use crate::theme::THEME;

/// Approve / refresh shortcuts and the lock and withdraw forms.
pub struct ActionPanel {
    pub focus: Focus,
    pub lock_amount: TextInput,
    pub withdraw_id: TextInput,
    pub pending: bool,
}

impl ActionPanel {
    pub fn new(initial_amount: &str) -> Self {
        Self {
            focus: Focus::Locks,
            lock_amount: TextInput::new("Lock amount [i]", initial_amount, Charset::Decimal),
            withdraw_id: TextInput::new("Withdraw lock id [w]", "0", Charset::Integer),
            pending: false,
        }
    }

    /// True while one of the two fields owns the keyboard.
    pub fn is_editing(&self) -> bool {
        self.focus != Focus::Locks
    }
}

fn shortcut<'a>(key: &'a str, label: &'a str) -> [Span<'a>; 2] {
    [
        Span::styled(format!(" [{key}] "), THEME.accent_style().add_modifier(Modifier::BOLD)),
        Span::styled(label, Style::default().fg(THEME.text)),
    ]
}

impl Component for ActionPanel {
    fn handle_key(&mut self, key: KeyEvent) -> Option<AppEvent> {
        let (input, submit): (&mut TextInput, fn(String) -> AppEvent) = match self.focus {
            Focus::LockAmount => (&mut self.lock_amount, AppEvent::SubmitLock),
            Focus::WithdrawId => (&mut self.withdraw_id, AppEvent::SubmitWithdraw),
            Focus::Locks => return None,
        };

        match input.handle_key(key) {
            InputOutcome::Submitted(value) => Some(submit(value)),
            InputOutcome::Cancelled => Some(AppEvent::Focus(Focus::Locks)),
            InputOutcome::Edited | InputOutcome::Ignored => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let outer_block = Block::default()
            .title(" Actions ")
            .borders(Borders::ALL)
            .border_style(THEME.panel_border(self.is_editing()));

        let inner = outer_block.inner(area);
        frame.render_widget(outer_block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Min(0),
            ])
            .split(inner);

        let mut buttons: Vec<Span> = Vec::new();
        buttons.extend(shortcut("a", "Approve"));
        buttons.extend(shortcut("b", "Get Balance"));
        buttons.extend(shortcut("r", "Get Locker IDs"));
        buttons.extend(shortcut("e", "Export"));
        frame.render_widget(Paragraph::new(Line::from(buttons)), chunks[0]);

        let fields = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[1]);
        self.lock_amount
            .render(frame, fields[0], self.focus == Focus::LockAmount);
        self.withdraw_id
            .render(frame, fields[1], self.focus == Focus::WithdrawId);

        let hint = if self.pending {
            Line::from(Span::styled(
                " Waiting for transaction receipt...",
                Style::default().fg(THEME.warning),
            ))
        } else {
            match self.focus {
                Focus::LockAmount => Line::from(Span::styled(
                    " Enter: Lock   Esc: Done   Tab: Next field",
                    THEME.muted_style(),
                )),
                Focus::WithdrawId => Line::from(Span::styled(
                    " Enter: Withdraw   Esc: Done   Tab: Next field",
                    THEME.muted_style(),
                )),
                Focus::Locks => Line::from(Span::styled(
                    " i: Edit lock amount   w: Edit withdraw id",
                    THEME.muted_style(),
                )),
            }
        };
        if chunks[2].height > 0 {
            frame.render_widget(Paragraph::new(hint), chunks[2]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_keys_ignored_without_focus() {
        let mut panel = ActionPanel::new("0.3");
        assert!(panel.handle_key(key(KeyCode::Char('5'))).is_none());
        assert_eq!(panel.lock_amount.value, "0.3");
    }

    #[test]
    fn test_submit_lock_amount() {
        let mut panel = ActionPanel::new("0.3");
        panel.focus = Focus::LockAmount;
        panel.handle_key(key(KeyCode::Char('5')));
        match panel.handle_key(key(KeyCode::Enter)) {
            Some(AppEvent::SubmitLock(amount)) => assert_eq!(amount, "0.35"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_submit_withdraw_id() {
        let mut panel = ActionPanel::new("0.3");
        panel.focus = Focus::WithdrawId;
        panel.handle_key(key(KeyCode::Backspace));
        panel.handle_key(key(KeyCode::Char('3')));
        match panel.handle_key(key(KeyCode::Enter)) {
            Some(AppEvent::SubmitWithdraw(id)) => assert_eq!(id, "3"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_escape_returns_focus_to_locks() {
        let mut panel = ActionPanel::new("0.3");
        panel.focus = Focus::WithdrawId;
        assert!(matches!(
            panel.handle_key(key(KeyCode::Esc)),
            Some(AppEvent::Focus(Focus::Locks))
        ));
    }

    #[test]
    fn test_is_editing() {
        let mut panel = ActionPanel::new("0.3");
        assert!(!panel.is_editing());
        panel.focus = Focus::LockAmount;
        assert!(panel.is_editing());
    }
}
