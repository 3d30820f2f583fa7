//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `scenenotes_core` linkage with deterministic output.
//! - Dump the notes stored for one document: `scenenotes_cli <db-path> <document> [query]`.
//! - Start file logging when `SCENENOTES_LOG_DIR` is set.

use scenenotes_core::{
    DocumentMetadata, NoteStore, PanelConfig, SqliteDocumentStore, VisibilityFilter,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("scenenotes_core ping={}", scenenotes_core::ping());
    println!("scenenotes_core version={}", scenenotes_core::core_version());

    let config = PanelConfig::from_env();
    if let Err(err) = config.start_logging() {
        eprintln!("logging disabled: {err}");
    }

    let args: Vec<String> = std::env::args().skip(1).collect();
    let [db_path, document, rest @ ..] = args.as_slice() else {
        return ExitCode::SUCCESS;
    };

    let mut meta = match SqliteDocumentStore::open(db_path) {
        Ok(meta) => meta,
        Err(err) => {
            eprintln!("failed to open `{db_path}`: {err}");
            return ExitCode::FAILURE;
        }
    };
    meta.select_document(Some(document));

    let mut store = NoteStore::new();
    store.load(&meta);
    let filter = VisibilityFilter::new(rest.first().cloned().unwrap_or_default());

    for note in store.iter().filter(|note| filter.is_visible(note)) {
        let pin = if note.pinned { "*" } else { " " };
        println!("{pin} {} ({}, {})", note.title, note.author, note.created_date);
        for row in &note.checklist {
            let mark = if row.is_checked() { "x" } else { " " };
            println!("    [{mark}] {}", row.text);
        }
    }
    ExitCode::SUCCESS
}
