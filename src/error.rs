//! Fatal error conditions.
//!
//! Everything in here aborts the session: a note browser that cannot read
//! its notes has no degraded mode to fall back to. The binary prints the
//! error after the terminal is restored and exits non-zero.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::core::config::ConfigError;
use crate::core::render::RenderError;

#[derive(Error, Debug)]
pub enum Error {
    #[error("cannot read notes directory {}: {source}", path.display())]
    NotesDir { path: PathBuf, source: io::Error },

    #[error("cannot read note {}: {source}", path.display())]
    ReadNote { path: PathBuf, source: io::Error },

    #[error("cannot render {name}: {source}")]
    Render { name: String, source: RenderError },

    #[error("cannot launch editor '{program}': {source}")]
    EditorSpawn { program: String, source: io::Error },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("terminal error: {0}")]
    Terminal(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
