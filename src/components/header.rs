use alloy::primitives::Address;
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::theme::THEME;
use crate::utils;

pub struct Header {
    pub chain_id: u64,
    pub chain_name: String,
    pub account: Option<Address>,
    pub vault: Address,
}

impl Header {
    pub fn new(chain_name: String, vault: Address) -> Self {
        Self {
            chain_id: 0,
            chain_name,
            account: None,
            vault,
        }
    }

    fn display_chain_name(&self) -> String {
        if !self.chain_name.is_empty() {
            return self.chain_name.clone();
        }
        match self.chain_id {
            0 => "Connecting".to_string(),
            id => format!("Chain {id}"),
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let header_block = Block::default().style(THEME.header_style());
        frame.render_widget(header_block, area);

        // Left: title, center: account, right: network
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(16),
                Constraint::Min(0),
                Constraint::Length(28),
            ])
            .split(area);

        let title = Paragraph::new(Span::styled(
            " Vault Finance",
            Style::default()
                .fg(THEME.text_accent)
                .add_modifier(Modifier::BOLD),
        ))
        .style(THEME.header_style());
        frame.render_widget(title, chunks[0]);

        let account = match self.account {
            Some(addr) => Span::styled(format!("{addr}"), THEME.address_style()),
            None => Span::styled("-", THEME.muted_style()),
        };
        let center = Line::from(vec![
            Span::styled("Account: ", THEME.muted_style()),
            account,
            Span::styled("  Vault: ", THEME.muted_style()),
            Span::styled(utils::truncate_address(&self.vault), THEME.address_style()),
        ]);
        frame.render_widget(
            Paragraph::new(center)
                .alignment(Alignment::Center)
                .style(THEME.header_style()),
            chunks[1],
        );

        let network = Line::from(vec![
            Span::styled(self.display_chain_name(), Style::default().fg(THEME.text)),
            Span::styled(" | ", THEME.muted_style()),
            Span::styled(format!("id {} ", self.chain_id), THEME.accent_style()),
        ]);
        frame.render_widget(
            Paragraph::new(network)
                .alignment(Alignment::Right)
                .style(THEME.header_style()),
            chunks[2],
        );
    }
}
