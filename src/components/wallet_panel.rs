use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::data::types::{Balances, TokenInfo};
use crate::theme::THEME;
use crate::utils;

/// "Data Wallet": account balances, total value locked and current allowance.
pub struct WalletPanel {
    pub balances: Option<Balances>,
    pub loading: bool,
    token: TokenInfo,
    stable_token: Option<TokenInfo>,
    native_symbol: String,
    stable_symbol: String,
}

impl WalletPanel {
    pub fn new(
        token: TokenInfo,
        stable_token: Option<TokenInfo>,
        native_symbol: String,
        fallback_stable_symbol: String,
    ) -> Self {
        let stable_symbol = stable_token
            .as_ref()
            .map(|t| t.symbol.clone())
            .unwrap_or(fallback_stable_symbol);
        Self {
            balances: None,
            loading: true,
            token,
            stable_token,
            native_symbol,
            stable_symbol,
        }
    }

    /// Display lines as (label, value); values are "..." until the first read lands.
    pub fn entries(&self) -> Vec<(String, String)> {
        let decimals = self.token.decimals;
        let Some(ref b) = self.balances else {
            return vec![
                (format!("{} Balance In Account", self.native_symbol), "...".to_string()),
                (format!("{} Balance In Account", self.stable_symbol), "...".to_string()),
                ("Total Value Locked In Contract".to_string(), "...".to_string()),
                ("Allowance Granted To Vault".to_string(), "...".to_string()),
            ];
        };
        vec![
            (
                format!("{} Balance In Account", self.native_symbol),
                utils::format_units(b.native, 18),
            ),
            (
                format!("{} Balance In Account", self.stable_symbol),
                match (b.stable, &self.stable_token) {
                    (Some(v), Some(t)) => utils::format_units(v, t.decimals),
                    _ => "n/a".to_string(),
                },
            ),
            (
                "Total Value Locked In Contract".to_string(),
                utils::format_token(b.total_locked, decimals, &self.token.symbol),
            ),
            (
                "Allowance Granted To Vault".to_string(),
                utils::format_token(b.allowance, decimals, &self.token.symbol),
            ),
        ]
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let title = if self.loading && self.balances.is_some() {
            " Data Wallet (refreshing) "
        } else {
            " Data Wallet "
        };
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(THEME.border_style());

        let lines: Vec<Line> = self
            .entries()
            .into_iter()
            .map(|(label, value)| {
                Line::from(vec![
                    Span::styled(format!("  {label}: "), THEME.muted_style()),
                    Span::styled(value, THEME.token_style().add_modifier(Modifier::BOLD)),
                ])
            })
            .collect();

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{Address, U256};

    fn token(symbol: &str, decimals: u8) -> TokenInfo {
        TokenInfo {
            address: Address::ZERO,
            symbol: symbol.to_string(),
            decimals,
        }
    }

    fn panel() -> WalletPanel {
        WalletPanel::new(token("CELO", 18), None, "CELO".to_string(), "cUSD".to_string())
    }

    #[test]
    fn test_placeholder_before_first_read() {
        let p = panel();
        let entries = p.entries();
        assert_eq!(entries.len(), 4);
        assert!(entries.iter().all(|(_, v)| v == "..."));
    }

    #[test]
    fn test_entries_mirror_balances() {
        let mut p = panel();
        p.balances = Some(Balances {
            native: U256::from(5_000_000_000_000_000_000u64),
            stable: None,
            total_locked: U256::from(300_000_000_000_000_000u64),
            allowance: U256::from(1_000_000_000_000_000_000u64),
        });
        let entries = p.entries();
        assert_eq!(entries[0], ("CELO Balance In Account".to_string(), "5".to_string()));
        assert_eq!(entries[1].1, "n/a");
        assert_eq!(entries[2].1, "0.3 CELO");
        assert_eq!(entries[3].1, "1 CELO");
    }

    #[test]
    fn test_stable_balance_uses_its_own_decimals() {
        let mut p = WalletPanel::new(
            token("CELO", 18),
            Some(token("USDC", 6)),
            "CELO".to_string(),
            "cUSD".to_string(),
        );
        p.balances = Some(Balances {
            stable: Some(U256::from(1_500_000u64)),
            ..Balances::default()
        });
        let entries = p.entries();
        assert_eq!(entries[1], ("USDC Balance In Account".to_string(), "1.5".to_string()));
    }

    #[test]
    fn test_unresolved_stable_token_uses_chain_symbol() {
        let mut p = panel();
        p.balances = Some(Balances::default());
        assert_eq!(p.entries()[1], ("cUSD Balance In Account".to_string(), "n/a".to_string()));
    }
}
