//! # Render Cache
//!
//! Memo table from note name to rendered text. Entries are written once per
//! note and live for the whole session: no invalidation, no eviction. A
//! personal note collection is small enough that unbounded growth is fine.
//!
//! The cache key is the note name only. If the reader pane width changes
//! after a note was rendered, the cached text keeps its original wrapping
//! until the process restarts.

use std::collections::HashMap;
use std::fs;

use log::debug;
use ratatui::text::Text;

use crate::core::note::Note;
use crate::core::render::ContentRenderer;
use crate::error::{Error, Result};

#[derive(Debug, Default)]
pub struct RenderCache {
    entries: HashMap<String, Text<'static>>,
}

impl RenderCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Text<'static>> {
        self.entries.get(name)
    }

    /// Return the cached render of `note`, rendering it at `width` on a miss.
    ///
    /// A miss reads the whole file from disk. Read and render failures are
    /// both fatal.
    pub fn get_or_render(
        &mut self,
        note: &Note,
        renderer: &dyn ContentRenderer,
        width: u16,
    ) -> Result<&Text<'static>> {
        if !self.entries.contains_key(&note.name) {
            let bytes = fs::read(&note.path).map_err(|source| Error::ReadNote {
                path: note.path.clone(),
                source,
            })?;
            let source = String::from_utf8_lossy(&bytes);
            let rendered = renderer
                .render(&source, width)
                .map_err(|source| Error::Render {
                    name: note.name.clone(),
                    source,
                })?;
            debug!(
                "Rendered {} with {} at width {} ({} lines)",
                note.name,
                renderer.name(),
                width,
                rendered.lines.len()
            );
            self.entries.insert(note.name.clone(), rendered);
        }
        Ok(&self.entries[&note.name])
    }
}
