//! Catalog commands that work on stored books.

use tokio::runtime::Runtime;

use super::{BookFields, Cli, open_library, print_book};
use crate::db::BookQuery;
use crate::isbn::{self, Isbn};

/// Show one stored book
pub fn cmd_show(rt: &Runtime, cli: &Cli, isbn: &str) -> anyhow::Result<()> {
    rt.block_on(async {
        let library = open_library(cli).await?;
        let book = library.get(isbn).await?;
        print_book(&book);
        Ok(())
    })
}

/// List stored books matching the filters
pub fn cmd_list(
    rt: &Runtime,
    cli: &Cli,
    title: Option<String>,
    author: Option<String>,
    genre: Option<String>,
) -> anyhow::Result<()> {
    rt.block_on(async {
        let library = open_library(cli).await?;
        let books = library
            .search(&BookQuery {
                title,
                author,
                genre,
            })
            .await?;

        if books.is_empty() {
            println!("No books found.");
            return Ok(());
        }

        for book in &books {
            if book.author.is_empty() {
                println!("{:<13}  {}", book.isbn, book.title);
            } else {
                println!("{:<13}  {} by {}", book.isbn, book.title, book.author);
            }
        }
        println!();
        println!("{} book(s)", books.len());
        Ok(())
    })
}

/// Add a book by hand
pub fn cmd_create(rt: &Runtime, cli: &Cli, fields: BookFields) -> anyhow::Result<()> {
    rt.block_on(async {
        let library = open_library(cli).await?;
        let book = library.create_manual(fields.into()).await?;
        println!("✓ Created");
        print_book(&book);
        Ok(())
    })
}

/// Change some fields of a stored book
pub fn cmd_update(rt: &Runtime, cli: &Cli, fields: BookFields) -> anyhow::Result<()> {
    rt.block_on(async {
        let library = open_library(cli).await?;
        let book = library.update(fields.into()).await?;
        println!("✓ Updated");
        print_book(&book);
        Ok(())
    })
}

/// Remove a stored book
pub fn cmd_remove(rt: &Runtime, cli: &Cli, isbn: &str) -> anyhow::Result<()> {
    rt.block_on(async {
        let library = open_library(cli).await?;
        library.delete(isbn).await?;
        println!("✓ Removed {}", isbn::normalize(isbn));
        Ok(())
    })
}

/// Check an ISBN offline
pub fn cmd_validate(raw: &str) -> anyhow::Result<()> {
    match Isbn::parse(raw) {
        Ok(parsed) => {
            let kind = match parsed.kind() {
                isbn::IsbnKind::Isbn10 => "ISBN-10",
                isbn::IsbnKind::Isbn13 => "ISBN-13",
            };
            println!("✓ {} is a valid {}", parsed, kind);
            Ok(())
        }
        Err(e) => {
            eprintln!("✗ {} is not a valid ISBN: {}", isbn::normalize(raw), e);
            std::process::exit(1);
        }
    }
}
