//! `ideashelf` - inspect the local shelf and move backups in and out.
//!
//! ```text
//! ideashelf                 print books, node counts, snapshots and nudge state
//! ideashelf export <file>   write a backup document
//! ideashelf import <file>   replace all data with a backup document
//! ```

use anyhow::Context;
use clap::{Parser, Subcommand};
use ideashelf::render::RetainedScene;
use ideashelf::{EngineConfig, Ideashelf, JsonFileStore, SystemClock};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "ideashelf", version, about = "Spatial idea shelf: status and backups")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand, PartialEq)]
enum Command {
    /// Print books, node counts, snapshots and nudge state
    Status,
    /// Write a backup document
    Export { path: PathBuf },
    /// Replace all data with a backup document
    Import { path: PathBuf },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    ideashelf::logging::init("ideashelf=info")?;

    let config = EngineConfig::load_or_default();
    let store = JsonFileStore::open_default().context("failed to open the local store")?;
    let mut shelf = Ideashelf::new(store, RetainedScene::new(), SystemClock, config)?;

    match cli.command.unwrap_or(Command::Status) {
        Command::Status => print_status(&shelf),
        Command::Export { path } => {
            let json = shelf.export_backup()?;
            std::fs::write(&path, json)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("Backup written to {}", path.display());
            Ok(())
        }
        Command::Import { path } => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let report = shelf.import_backup(&json)?;
            println!(
                "Imported {} (change #{})",
                path.display(),
                report.change_count
            );
            Ok(())
        }
    }
}

fn print_status(shelf: &Ideashelf<JsonFileStore, RetainedScene>) -> anyhow::Result<()> {
    println!("Store: {}", shelf.store().path().display());
    let books = shelf.books()?;
    let nodes = ideashelf::Store::all_nodes(shelf.store())?;
    if books.is_empty() {
        println!("No books yet.");
    }
    for book in &books {
        let count = nodes.iter().filter(|n| n.book_id == book.id).count();
        println!("  {} {:<32} {:>5} nodes", book.color, book.title, count);
    }

    let settings = shelf.tracked_settings()?;
    let snapshots = shelf.snapshots()?;
    println!("Changes: {}", settings.change_count);
    println!("Snapshots: {}", snapshots.len());
    if let Some(latest) = snapshots.last() {
        println!("Latest snapshot: {}", latest.backup.exported_at);
    }
    if shelf.nudge_visible() {
        println!("It has been a while since your last backup. Run `ideashelf export <file>`.");
    }
    Ok(())
}
