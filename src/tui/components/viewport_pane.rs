//! # ViewportPane Component
//!
//! Draws the visible window of a [`Viewport`]: the lines from its scroll
//! offset down to the bottom of the area. Both the reader and the note list
//! are viewport panes; only their content differs.
//!
//! Stateless. Scrolling happens in the core, so this component just slices
//! what it's given.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Text};
use ratatui::widgets::Paragraph;

use crate::core::viewport::Viewport;
use crate::tui::component::Component;

pub struct ViewportPane<'a> {
    pub viewport: &'a Viewport,
}

impl<'a> ViewportPane<'a> {
    pub fn new(viewport: &'a Viewport) -> Self {
        Self { viewport }
    }

    fn visible_lines(&self, height: u16) -> Vec<Line<'static>> {
        self.viewport
            .content()
            .lines
            .iter()
            .skip(self.viewport.offset())
            .take(height as usize)
            .cloned()
            .collect()
    }
}

impl Component for ViewportPane<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let text = Text::from(self.visible_lines(area.height));
        frame.render_widget(Paragraph::new(text), area);
    }
}
