//! # Landing Page Component
//!
//! Shown until the terminal has reported its size and the panes exist.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::component::Component;

pub const INITIALIZING: &str = "Initializing...";

#[derive(Default)]
pub struct LandingPage;

impl LandingPage {
    pub fn new() -> Self {
        Self
    }
}

impl Component for LandingPage {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let lines = vec![
            Line::default(),
            Line::from(format!("  {INITIALIZING}")),
            Line::from(Span::styled(
                format!("  leaf v{}", env!("CARGO_PKG_VERSION")),
                Style::default().fg(Color::DarkGray),
            )),
        ];
        frame.render_widget(Paragraph::new(lines), area);
    }
}
