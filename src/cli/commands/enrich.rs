//! Online lookup commands: add, lookup, import.

use std::path::Path;

use futures::StreamExt;
use tokio::runtime::Runtime;

use super::{Cli, open_library, print_enrichment};
use crate::library::{self, ImportEvent};

/// Enrich an ISBN and save it
pub fn cmd_add(rt: &Runtime, cli: &Cli, isbn: &str, language: Option<&str>) -> anyhow::Result<()> {
    rt.block_on(async {
        let library = open_library(cli).await?;
        let enrichment = library.add_from_isbn(isbn, language).await?;

        print_enrichment(&enrichment);
        println!();
        println!("Saved.");
        Ok(())
    })
}

/// Enrich an ISBN and print the result without saving
pub fn cmd_lookup(
    rt: &Runtime,
    cli: &Cli,
    isbn: &str,
    language: Option<&str>,
) -> anyhow::Result<()> {
    rt.block_on(async {
        let library = open_library(cli).await?;
        let enrichment = library.lookup(isbn, language).await?;

        print_enrichment(&enrichment);
        Ok(())
    })
}

/// Enrich every ISBN listed in a file
pub fn cmd_import(rt: &Runtime, cli: &Cli, file: &Path) -> anyhow::Result<()> {
    let isbns = library::read_isbn_list(file)?;
    if isbns.is_empty() {
        println!("No ISBNs found in {}", file.display());
        return Ok(());
    }

    rt.block_on(async {
        let library = open_library(cli).await?;
        println!("Importing {} ISBNs...", isbns.len());
        println!();

        let (mut added, mut present, mut failed) = (0usize, 0usize, 0usize);
        let mut events = std::pin::pin!(library.import(isbns));

        while let Some(event) = events.next().await {
            match event {
                ImportEvent::Added { book, source } => {
                    added += 1;
                    println!("✓ {}  {} ({})", book.isbn, book.title, source);
                }
                ImportEvent::AlreadyPresent(isbn) => {
                    present += 1;
                    println!("- {}  already in library", isbn);
                }
                ImportEvent::Failed { isbn, reason } => {
                    failed += 1;
                    println!("✗ {}  {}", isbn, reason);
                }
            }
        }

        println!();
        println!(
            "Added {}, already present {}, failed {}",
            added, present, failed
        );
        Ok(())
    })
}
