//! # Note Index
//!
//! The ordered set of notes visible in the configured directory, plus the
//! selection cursor.
//!
//! ```text
//! read_dir ──► scan_dir() ──► Vec<NoteEntry> ──► NoteIndex::load()
//!                 (sorted)                          (no dirs, no dotfiles)
//! ```
//!
//! The index is a snapshot taken once at startup. Files created later (for
//! example through the new-note action) only show up after a restart.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::{Error, Result};

/// Names starting with this are hidden and never listed.
pub const HIDDEN_MARKER: char = '.';

/// Marker drawn in front of the selected entry in the list pane.
pub const SELECTED_PREFIX: &str = "> ";
/// Padding drawn in front of every other entry.
pub const UNSELECTED_PREFIX: &str = "  ";

/// One raw directory entry, before filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteEntry {
    pub name: String,
    pub path: PathBuf,
    pub is_dir: bool,
}

impl NoteEntry {
    pub fn new(dir: &Path, name: &str, is_dir: bool) -> Self {
        Self {
            name: name.to_string(),
            path: dir.join(name),
            is_dir,
        }
    }

    fn is_note(&self) -> bool {
        !self.is_dir && !self.name.starts_with(HIDDEN_MARKER)
    }
}

/// A single note, addressed by its file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub name: String,
    pub path: PathBuf,
}

/// List a directory, sorted by file name.
///
/// Any I/O failure is fatal: without a note set there is nothing to browse.
pub fn scan_dir(dir: &Path) -> Result<Vec<NoteEntry>> {
    let read_err = |source| Error::NotesDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut entries = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_err)? {
        let entry = entry.map_err(read_err)?;
        let is_dir = entry.file_type().map_err(read_err)?.is_dir();
        entries.push(NoteEntry {
            name: entry.file_name().to_string_lossy().into_owned(),
            path: entry.path(),
            is_dir,
        });
    }
    entries.sort_by(|a, b| a.name.cmp(&b.name));

    debug!("Scanned {} entries in {}", entries.len(), dir.display());
    Ok(entries)
}

#[derive(Debug, Clone, Default)]
pub struct NoteIndex {
    notes: Vec<Note>,
    cursor: usize,
}

impl NoteIndex {
    /// Build the index from raw entries, dropping directories and hidden
    /// files. Source order is kept. Nothing qualifying is not an error.
    pub fn load(entries: impl IntoIterator<Item = NoteEntry>) -> Self {
        let notes = entries
            .into_iter()
            .filter(NoteEntry::is_note)
            .map(|e| Note {
                name: e.name,
                path: e.path,
            })
            .collect();
        Self { notes, cursor: 0 }
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// The selected note, or `None` for an empty index.
    pub fn current(&self) -> Option<&Note> {
        self.notes.get(self.cursor)
    }

    /// Shift the cursor by `delta`, clamped to `[0, len - 1]`.
    ///
    /// Returns whether the cursor actually moved. Moving past either end and
    /// moving within an empty index are no-ops.
    pub fn move_by(&mut self, delta: isize) -> bool {
        if self.notes.is_empty() {
            return false;
        }
        let last = self.notes.len() - 1;
        let target = self.cursor.saturating_add_signed(delta).min(last);
        let moved = target != self.cursor;
        self.cursor = target;
        moved
    }

    /// One line per note, the selected one marked with `> `.
    pub fn render_list(&self) -> String {
        let mut out = String::new();
        for (i, note) in self.notes.iter().enumerate() {
            let prefix = if i == self.cursor {
                SELECTED_PREFIX
            } else {
                UNSELECTED_PREFIX
            };
            out.push_str(prefix);
            out.push_str(&note.name);
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::notes_dir;

    fn index_of(names: &[&str]) -> NoteIndex {
        let dir = Path::new("/notes");
        NoteIndex::load(names.iter().map(|n| NoteEntry::new(dir, n, false)))
    }

    fn names(index: &NoteIndex) -> Vec<&str> {
        index.notes().iter().map(|n| n.name.as_str()).collect()
    }

    #[test]
    fn test_load_drops_dirs_and_hidden_entries() {
        let dir = Path::new("/notes");
        let entries = vec![
            NoteEntry::new(dir, "a.md", false),
            NoteEntry::new(dir, ".hidden.md", false),
            NoteEntry::new(dir, "sub", true),
            NoteEntry::new(dir, "b.md", false),
        ];
        let index = NoteIndex::load(entries);
        assert_eq!(names(&index), vec!["a.md", "b.md"]);
        assert_eq!(index.current().unwrap().path, Path::new("/notes/a.md"));
    }

    #[test]
    fn test_load_keeps_source_order() {
        let index = index_of(&["zeta.md", "alpha.md", "mid.txt"]);
        assert_eq!(names(&index), vec!["zeta.md", "alpha.md", "mid.txt"]);
    }

    #[test]
    fn test_load_nothing_qualifies_is_empty() {
        let dir = Path::new("/notes");
        let index = NoteIndex::load(vec![
            NoteEntry::new(dir, ".git", true),
            NoteEntry::new(dir, "drafts", true),
        ]);
        assert!(index.is_empty());
        assert!(index.current().is_none());
        assert_eq!(index.render_list(), "");
    }

    #[test]
    fn test_move_clamps_at_both_ends() {
        let mut index = index_of(&["a.md", "b.md", "c.md"]);
        assert!(!index.move_by(-1));
        assert_eq!(index.cursor(), 0);

        assert!(index.move_by(1));
        assert!(index.move_by(1));
        assert!(!index.move_by(1));
        assert_eq!(index.cursor(), 2);
        assert_eq!(index.current().unwrap().name, "c.md");
    }

    #[test]
    fn test_move_on_empty_index_is_noop() {
        let mut index = NoteIndex::default();
        assert!(!index.move_by(1));
        assert!(!index.move_by(-1));
        assert_eq!(index.cursor(), 0);
        assert!(index.current().is_none());
    }

    #[test]
    fn test_cursor_stays_in_range_for_any_sequence() {
        let mut index = index_of(&["a.md", "b.md", "c.md", "d.md"]);
        // Deterministic pseudo-random walk, biased in both directions.
        let mut seed: u32 = 0x9e37_79b9;
        for _ in 0..500 {
            seed ^= seed << 13;
            seed ^= seed >> 17;
            seed ^= seed << 5;
            let delta = if seed % 3 == 0 { -1 } else { 1 };
            let delta = if seed % 7 < 3 { -delta } else { delta };
            index.move_by(delta);
            assert!(index.cursor() < index.len());
        }
    }

    #[test]
    fn test_render_list_marks_selection() {
        let mut index = index_of(&["a.md", "b.md", "c.md"]);
        index.move_by(1);
        assert_eq!(index.render_list(), "  a.md\n> b.md\n  c.md\n");
    }

    #[test]
    fn test_scan_dir_sorts_and_flags_dirs() {
        let dir = notes_dir(&[("b.md", "b"), (".hidden.md", "h"), ("a.md", "a")]);
        fs::create_dir(dir.path().join("sub")).unwrap();

        let entries = scan_dir(dir.path()).unwrap();
        let listed: Vec<(&str, bool)> = entries
            .iter()
            .map(|e| (e.name.as_str(), e.is_dir))
            .collect();
        assert_eq!(
            listed,
            vec![
                (".hidden.md", false),
                ("a.md", false),
                ("b.md", false),
                ("sub", true)
            ]
        );

        let index = NoteIndex::load(entries);
        assert_eq!(names(&index), vec!["a.md", "b.md"]);
    }

    #[test]
    fn test_scan_missing_dir_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        let err = scan_dir(&missing).unwrap_err();
        assert!(matches!(err, Error::NotesDir { .. }));
        assert!(err.to_string().contains("nope"));
    }
}
