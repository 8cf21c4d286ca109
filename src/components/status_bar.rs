use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::data::types::TxKind;
use crate::theme::THEME;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusMessage {
    Success(String),
    Error(String),
}

pub struct StatusBar {
    pub connected: bool,
    pub message: Option<StatusMessage>,
    pub pending: Option<TxKind>,
    pub loading: bool,
}

impl StatusBar {
    pub fn new() -> Self {
        Self {
            connected: false,
            message: None,
            pending: None,
            loading: false,
        }
    }

    pub fn clear(&mut self) {
        self.message = None;
    }

    pub fn success(&mut self, msg: String) {
        self.message = Some(StatusMessage::Success(msg));
    }

    pub fn error(&mut self, msg: String) {
        self.message = Some(StatusMessage::Error(msg));
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let bg = Block::default().style(THEME.header_style());
        frame.render_widget(bg, area);

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(34)])
            .split(area);

        // --- Left side ---
        let left_content = match (&self.message, self.pending) {
            (Some(StatusMessage::Error(err)), _) => Line::from(vec![
                Span::styled(
                    " ! ",
                    Style::default()
                        .fg(THEME.error)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(err.as_str(), THEME.error_style()),
            ]),
            (Some(StatusMessage::Success(msg)), _) => Line::from(vec![
                Span::styled(" \u{2713} ", THEME.success_style().add_modifier(Modifier::BOLD)),
                Span::styled(msg.as_str(), THEME.success_style()),
            ]),
            (None, Some(kind)) => Line::from(Span::styled(
                format!(" Sending {kind} transaction..."),
                Style::default().fg(THEME.warning),
            )),
            (None, None) if self.loading => Line::from(Span::styled(
                " Loading...",
                Style::default().fg(THEME.text_accent),
            )),
            (None, None) => Line::from(vec![
                Span::styled(" Tab", Style::default().fg(THEME.text_accent)),
                Span::styled(":Focus  ", Style::default().fg(THEME.text_muted)),
                Span::styled("a", Style::default().fg(THEME.text_accent)),
                Span::styled(":Approve  ", Style::default().fg(THEME.text_muted)),
                Span::styled("u", Style::default().fg(THEME.text_accent)),
                Span::styled(":Refresh  ", Style::default().fg(THEME.text_muted)),
                Span::styled("?", Style::default().fg(THEME.text_accent)),
                Span::styled(":Help  ", Style::default().fg(THEME.text_muted)),
                Span::styled("q", Style::default().fg(THEME.text_accent)),
                Span::styled(":Quit", Style::default().fg(THEME.text_muted)),
            ]),
        };

        let left = Paragraph::new(left_content).style(THEME.header_style());
        frame.render_widget(left, chunks[0]);

        // --- Right side: pending tx + connection status ---
        let (dot_color, status_text) = if self.connected {
            (THEME.success, "Connected")
        } else {
            (THEME.error, "Disconnected")
        };

        let mut right_spans = Vec::new();
        if self.pending.is_some() {
            right_spans.push(Span::styled("tx pending", Style::default().fg(THEME.warning)));
            right_spans.push(Span::styled(" | ", THEME.muted_style()));
        }
        right_spans.push(Span::styled("\u{25cf} ", Style::default().fg(dot_color)));
        right_spans.push(Span::styled(format!("{status_text} "), Style::default().fg(dot_color)));

        let right = Paragraph::new(Line::from(right_spans))
            .alignment(Alignment::Right)
            .style(THEME.header_style());
        frame.render_widget(right, chunks[1]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_replace_each_other() {
        let mut bar = StatusBar::new();
        bar.success("Approved!!".to_string());
        assert_eq!(bar.message, Some(StatusMessage::Success("Approved!!".to_string())));
        bar.error("execution reverted".to_string());
        assert_eq!(bar.message, Some(StatusMessage::Error("execution reverted".to_string())));
        bar.clear();
        assert!(bar.message.is_none());
    }
}
