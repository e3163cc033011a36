//! # Content Renderer seam
//!
//! The reader pane never shows raw note text. Whatever turns a note's source
//! into terminal-ready lines sits behind [`ContentRenderer`], so the cache and
//! the state machine can be exercised with a stub while the real markdown
//! renderer lives in the TUI adapter.

use ratatui::text::Text;
use thiserror::Error;

/// Failure reported by a renderer. Always fatal to the session.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct RenderError(pub String);

/// Converts raw note text into formatted, width-wrapped display text.
///
/// Implementations must behave as a pure function of `(source, width)`:
/// the render cache relies on that to call each note at most once.
pub trait ContentRenderer {
    fn name(&self) -> &str;

    fn render(&self, source: &str, width: u16) -> Result<Text<'static>, RenderError>;
}
