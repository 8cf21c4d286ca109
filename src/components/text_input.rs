use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::theme::THEME;

/// Characters a field accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Charset {
    /// Digits and a single decimal point.
    Decimal,
    /// Digits only.
    Integer,
}

impl Charset {
    fn accepts(self, current: &str, c: char) -> bool {
        match self {
            Charset::Decimal => c.is_ascii_digit() || (c == '.' && !current.contains('.')),
            Charset::Integer => c.is_ascii_digit(),
        }
    }
}

/// Outcome of a key press on a focused field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputOutcome {
    Submitted(String),
    Cancelled,
    Edited,
    Ignored,
}

/// Single-line numeric text field.
pub struct TextInput {
    pub title: &'static str,
    pub value: String,
    charset: Charset,
    cursor_position: usize,
}

impl TextInput {
    pub fn new(title: &'static str, initial: &str, charset: Charset) -> Self {
        let value: String = initial.to_string();
        Self {
            title,
            cursor_position: value.len(),
            value,
            charset,
        }
    }

    pub fn set_value(&mut self, value: String) {
        self.cursor_position = value.len();
        self.value = value;
    }

    pub fn cursor_position(&self) -> usize {
        self.cursor_position
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> InputOutcome {
        match key.code {
            KeyCode::Enter => InputOutcome::Submitted(self.value.clone()),
            KeyCode::Esc => InputOutcome::Cancelled,
            KeyCode::Backspace => {
                if self.cursor_position > 0 {
                    self.cursor_position -= 1;
                    self.value.remove(self.cursor_position);
                }
                InputOutcome::Edited
            }
            KeyCode::Delete => {
                if self.cursor_position < self.value.len() {
                    self.value.remove(self.cursor_position);
                }
                InputOutcome::Edited
            }
            KeyCode::Left => {
                self.cursor_position = self.cursor_position.saturating_sub(1);
                InputOutcome::Edited
            }
            KeyCode::Right => {
                if self.cursor_position < self.value.len() {
                    self.cursor_position += 1;
                }
                InputOutcome::Edited
            }
            KeyCode::Home => {
                self.cursor_position = 0;
                InputOutcome::Edited
            }
            KeyCode::End => {
                self.cursor_position = self.value.len();
                InputOutcome::Edited
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.value.clear();
                self.cursor_position = 0;
                InputOutcome::Edited
            }
            KeyCode::Char(c) => {
                if self.charset.accepts(&self.value, c) {
                    self.value.insert(self.cursor_position, c);
                    self.cursor_position += 1;
                    InputOutcome::Edited
                } else {
                    InputOutcome::Ignored
                }
            }
            _ => InputOutcome::Ignored,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, focused: bool) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(THEME.panel_border(focused))
            .title(format!(" {} ", self.title));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let text = if self.value.is_empty() && !focused {
            Span::styled("-", THEME.muted_style())
        } else {
            Span::styled(self.value.as_str(), Style::default().fg(THEME.text))
        };
        frame.render_widget(Paragraph::new(text), inner);

        if focused {
            let cursor_x = inner.x + self.cursor_position as u16;
            if cursor_x < inner.right() {
                frame.set_cursor_position((cursor_x, inner.y));
            }
        }
    }
}
