use std::fs::{self, File};
use std::process;
use std::sync::Arc;

use clap::Parser;
use log::info;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

use leaf::core::config;
use leaf::core::note::{NoteIndex, scan_dir};
use leaf::core::state::App;
use leaf::tui::{self, MarkdownRenderer};

#[derive(Parser)]
#[command(name = "leaf", version, about = "Terminal browser for a directory of markdown notes")]
struct Args {}

fn main() {
    let _args = Args::parse();
    dotenv::dotenv().ok();
    init_logging();

    if let Err(e) = run() {
        log::error!("Fatal: {e}");
        eprintln!("error: {e}");
        process::exit(1);
    }
}

/// File logger at `~/.leaf/leaf.log`. Logging is best-effort: without a
/// writable home directory the session runs unlogged.
fn init_logging() {
    let Some(path) = config::log_path() else {
        return;
    };
    if let Some(dir) = path.parent() {
        let _ = fs::create_dir_all(dir);
    }

    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create(&path) {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }
}

fn run() -> leaf::Result<()> {
    let config = config::resolve(&config::load_config()?)?;
    info!(
        "Leaf starting up: notes in {}, editor {}",
        config.notes_dir.display(),
        config.editor
    );

    let index = NoteIndex::load(scan_dir(&config.notes_dir)?);
    info!("Found {} notes", index.len());

    let mut app = App::new(&config, index, Arc::new(MarkdownRenderer::default()));
    tui::run(&mut app)
}
