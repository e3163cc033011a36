//! # Dual Viewport
//!
//! Two independently scrollable panes stacked vertically: the reader pane
//! on top and the note list below it. Both are sized together from the
//! terminal dimensions using a fixed split.
//!
//! ```text
//! ┌──────────────────────────┐ ─┐
//! │ reader                   │  │ height / 4 * 3
//! │                          │  │
//! ├──────────────────────────┤ ─┤
//! │ list                     │  │ height / 4
//! └──────────────────────────┘ ─┘
//! ```
//!
//! A viewport never reflows its content. Content that depends on width has
//! to be re-rendered by the caller.

use ratatui::layout::Size;
use ratatui::text::Text;

/// Total number of shares the terminal height is split into.
pub const SPLIT_SHARES: u16 = 4;
/// Shares given to the reader pane. The list pane gets the rest.
pub const READER_SHARES: u16 = 3;

/// Lines moved per mouse wheel notch.
pub const WHEEL_STEP: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    Down,
}

/// Compute `(reader, list)` pane sizes for a terminal of the given size.
pub fn pane_sizes(width: u16, height: u16) -> (Size, Size) {
    let share = height / SPLIT_SHARES;
    (
        Size::new(width, share * READER_SHARES),
        Size::new(width, share),
    )
}

#[derive(Debug, Clone, Default)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
    offset: usize,
    content: Text<'static>,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }

    /// Replace the displayed text. The scroll offset survives, pulled back
    /// only as far as needed to stay within the new content.
    pub fn set_content(&mut self, content: impl Into<Text<'static>>) {
        self.content = content.into();
        self.offset = self.offset.min(self.max_offset());
    }

    pub fn content(&self) -> &Text<'static> {
        &self.content
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn set_offset(&mut self, offset: usize) {
        self.offset = offset.min(self.max_offset());
    }

    pub fn line_count(&self) -> usize {
        self.content.lines.len()
    }

    /// Largest offset that still fills the pane (0 when everything fits).
    pub fn max_offset(&self) -> usize {
        self.line_count().saturating_sub(self.height as usize)
    }

    pub fn scroll_lines(&mut self, direction: ScrollDirection, lines: usize) {
        let target = match direction {
            ScrollDirection::Up => self.offset.saturating_sub(lines),
            ScrollDirection::Down => self.offset.saturating_add(lines),
        };
        self.offset = target.min(self.max_offset());
    }

    pub fn scroll_line(&mut self, direction: ScrollDirection) {
        self.scroll_lines(direction, 1);
    }

    pub fn scroll_half_page(&mut self, direction: ScrollDirection) {
        self.scroll_lines(direction, (self.height / 2) as usize);
    }

    pub fn scroll_page(&mut self, direction: ScrollDirection) {
        self.scroll_lines(direction, self.height as usize);
    }

    pub fn at_top(&self) -> bool {
        self.offset == 0
    }

    pub fn at_bottom(&self) -> bool {
        self.offset >= self.max_offset()
    }
}
