//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use ratatui::text::Text;
use tempfile::TempDir;

use crate::core::config::{DEFAULT_NEW_NOTE_NAME, ResolvedConfig};
use crate::core::editor::EditorCommand;
use crate::core::note::{NoteIndex, scan_dir};
use crate::core::render::{ContentRenderer, RenderError};
use crate::core::state::App;

/// A renderer that echoes its input, tagged with the width, and counts calls.
#[derive(Default)]
pub struct CountingRenderer {
    calls: AtomicUsize,
}

impl CountingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ContentRenderer for CountingRenderer {
    fn name(&self) -> &str {
        "counting"
    }

    fn render(&self, source: &str, width: u16) -> Result<Text<'static>, RenderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Text::raw(format!("[{width}] {source}")))
    }
}

/// A temporary notes directory holding the given `(name, contents)` files.
pub fn notes_dir(files: &[(&str, &str)]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for (name, contents) in files {
        fs::write(dir.path().join(name), contents).unwrap();
    }
    dir
}

/// Config pointing at `dir`, with `true` as a harmless editor.
pub fn test_config(dir: &Path) -> ResolvedConfig {
    ResolvedConfig {
        notes_dir: dir.to_path_buf(),
        editor: EditorCommand::parse("true").unwrap(),
        new_note_name: DEFAULT_NEW_NOTE_NAME.to_string(),
    }
}

/// Creates a test App over a fresh notes directory. The directory guard
/// must be kept alive for as long as the app reads notes.
pub fn test_app(files: &[(&str, &str)]) -> (App, TempDir, Arc<CountingRenderer>) {
    let dir = notes_dir(files);
    let renderer = Arc::new(CountingRenderer::new());
    let index = NoteIndex::load(scan_dir(dir.path()).unwrap());
    let app = App::new(&test_config(dir.path()), index, renderer.clone());
    (app, dir, renderer)
}
