use crossterm::event::KeyEvent;
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::theme::THEME;

pub struct HelpOverlay {
    pub visible: bool,
}

const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Vault",
        &[
            ("a", "Approve vault allowance"),
            ("b", "Get balance"),
            ("r", "Get locker ids"),
            ("u", "Refresh balances and locks"),
            ("e / E", "Export locks as CSV / JSON"),
        ],
    ),
    (
        "Forms",
        &[
            ("i", "Edit lock amount"),
            ("w", "Edit withdraw lock id"),
            ("Tab", "Next field"),
            ("Enter", "Lock / Withdraw"),
            ("Esc", "Leave field"),
            ("Ctrl+U", "Clear field"),
        ],
    ),
    (
        "Lock table",
        &[
            ("\u{2191}/k \u{2193}/j", "Move selection"),
            ("\u{2190}/h \u{2192}/l", "Previous / next page"),
            ("g / G", "First / last page"),
            ("n", "Cycle rows per page (2, 5, 10)"),
            ("Enter", "Use lock id for withdraw"),
        ],
    ),
    (
        "Other",
        &[("?", "Toggle this help"), ("q", "Quit"), ("Ctrl+C", "Quit")],
    ),
];

impl HelpOverlay {
    pub fn new() -> Self {
        Self { visible: false }
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    /// Returns true if it consumed the event
    pub fn handle_key(&mut self, _key: KeyEvent) -> bool {
        if self.visible {
            self.visible = false;
            true
        } else {
            false
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if !self.visible {
            return;
        }

        let popup_width = area.width * 60 / 100;
        let popup_height = area.height * 80 / 100;
        let x = area.x + (area.width - popup_width) / 2;
        let y = area.y + (area.height - popup_height) / 2;
        let popup_area = Rect::new(x, y, popup_width, popup_height);

        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(" Keyboard Shortcuts ")
            .borders(Borders::ALL)
            .border_style(THEME.border_focused_style())
            .style(Style::default().bg(THEME.surface));

        let mut help_text: Vec<Line> = Vec::new();
        for (i, (section, keys)) in SECTIONS.iter().enumerate() {
            if i > 0 {
                help_text.push(Line::from(""));
            }
            help_text.push(Line::from(Span::styled(
                *section,
                Style::default()
                    .fg(THEME.text_accent)
                    .add_modifier(Modifier::BOLD),
            )));
            for (key, action) in keys.iter() {
                help_text.push(Line::from(vec![
                    Span::styled(format!("  {key:<12}"), Style::default().fg(THEME.text_accent)),
                    Span::styled(*action, Style::default().fg(THEME.text)),
                ]));
            }
        }

        let paragraph = Paragraph::new(help_text)
            .block(block)
            .wrap(Wrap { trim: false });

        frame.render_widget(paragraph, popup_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    #[test]
    fn test_visible_overlay_consumes_one_key() {
        let mut help = HelpOverlay::new();
        let key = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);
        assert!(!help.handle_key(key));
        help.toggle();
        assert!(help.handle_key(key));
        assert!(!help.visible);
    }
}
