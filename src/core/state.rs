//! # Application State
//!
//! One object owns everything the browser knows. It is built once at
//! startup from a directory snapshot and the resolved config, mutated in
//! place by `update()`, and dropped on exit. Nothing is persisted.
//!
//! ```text
//! App
//! ├── phase: Phase                     // Initializing → Ready → Terminating
//! ├── index: NoteIndex                 // notes + selection cursor
//! ├── cache: RenderCache               // note name → rendered text
//! ├── reader: Viewport                 // top pane, rendered note
//! ├── list: Viewport                   // bottom pane, note list
//! ├── renderer: Arc<dyn ContentRenderer>
//! ├── notes_dir: PathBuf               // from config
//! ├── editor: EditorCommand            // from config
//! └── new_note_path: PathBuf           // from config
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::path::PathBuf;
use std::sync::Arc;

use log::debug;
use ratatui::text::Text;

use crate::core::cache::RenderCache;
use crate::core::config::ResolvedConfig;
use crate::core::editor::EditorCommand;
use crate::core::note::NoteIndex;
use crate::core::render::ContentRenderer;
use crate::core::viewport::{Viewport, pane_sizes};
use crate::error::{Error, Result};

/// Lifecycle of the interactive session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No terminal size known yet; nothing can be laid out.
    Initializing,
    /// Normal interactive loop.
    Ready,
    /// Quit requested; the loop ends after this event.
    Terminating,
}

pub struct App {
    pub phase: Phase,
    pub index: NoteIndex,
    pub cache: RenderCache,
    pub reader: Viewport,
    pub list: Viewport,
    pub renderer: Arc<dyn ContentRenderer>,
    pub notes_dir: PathBuf,
    pub editor: EditorCommand,
    pub new_note_path: PathBuf,
}

impl App {
    pub fn new(
        config: &ResolvedConfig,
        index: NoteIndex,
        renderer: Arc<dyn ContentRenderer>,
    ) -> Self {
        Self {
            phase: Phase::Initializing,
            index,
            cache: RenderCache::new(),
            reader: Viewport::default(),
            list: Viewport::default(),
            renderer,
            notes_dir: config.notes_dir.clone(),
            editor: config.editor.clone(),
            new_note_path: config.new_note_path(),
        }
    }

    /// True once the first terminal size has been applied.
    pub fn is_ready(&self) -> bool {
        self.phase != Phase::Initializing
    }

    /// Size both panes from the terminal dimensions.
    pub fn resize_panes(&mut self, width: u16, height: u16) {
        let (reader, list) = pane_sizes(width, height);
        self.reader.resize(reader.width, reader.height);
        self.list.resize(list.width, list.height);
        debug!(
            "Panes resized: reader {}x{}, list {}x{}",
            reader.width, reader.height, list.width, list.height
        );
    }

    /// The list pane text: a framing rule as wide as the reader, then one
    /// line per note.
    pub fn list_content(&self) -> String {
        format!(
            "\n{}\n\n{}",
            "─".repeat(self.reader.width as usize),
            self.index.render_list()
        )
    }

    pub fn refresh_list(&mut self) {
        let content = self.list_content();
        self.list.set_content(content);
    }

    /// Show the selected note in the reader, rendering it on a cache miss.
    /// With no notes at all, a hint is rendered instead (never cached).
    pub fn refresh_reader(&mut self) -> Result<()> {
        let width = self.reader.width;
        let text = match self.index.current() {
            Some(note) => self
                .cache
                .get_or_render(note, self.renderer.as_ref(), width)?
                .clone(),
            None => self.render_empty_hint(width)?,
        };
        self.reader.set_content(text);
        Ok(())
    }

    fn render_empty_hint(&self, width: u16) -> Result<Text<'static>> {
        let hint = format!(
            "No notes found in {}.\nPress `n` to create a new note.\n",
            self.notes_dir.display()
        );
        self.renderer
            .render(&hint, width)
            .map_err(|source| Error::Render {
                name: "empty notes hint".to_string(),
                source,
            })
    }
}
