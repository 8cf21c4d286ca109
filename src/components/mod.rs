pub mod action_panel;
pub mod header;
pub mod help;
pub mod lock_table;
pub mod pagination;
pub mod status_bar;
pub mod text_input;
pub mod wallet_panel;

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::Rect;

use crate::events::AppEvent;

/// Trait for interactive UI components
pub trait Component {
    /// Handle a key event, optionally returning an AppEvent
    fn handle_key(&mut self, key: KeyEvent) -> Option<AppEvent>;

    /// Render the component into the given area
    fn render(&mut self, frame: &mut Frame, area: Rect);
}
