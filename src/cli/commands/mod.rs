//! CLI command definitions and dispatch.
//!
//! This module provides the command-line interface for Book Minder.
//! Each group of subcommands is implemented in its own submodule:
//! - `enrich`: Adding, previewing and bulk-importing books by ISBN
//! - `catalog`: Showing, listing, creating, updating and removing books
//! - `settings`: Configuration file management

mod catalog;
mod enrich;
mod settings;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tokio::runtime::Runtime;

use crate::config::{self, Config};
use crate::enrichment::Enrichment;
use crate::library::Library;
use crate::model::{Book, BookUpdate};

pub use catalog::{cmd_create, cmd_list, cmd_remove, cmd_show, cmd_update, cmd_validate};
pub use enrich::{cmd_add, cmd_import, cmd_lookup};
pub use settings::cmd_config;

/// Book Minder CLI
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Database path (overrides the config file)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Google Books API key
    #[arg(long, global = true, env = "GOOGLE_BOOKS_API_KEY", hide_env_values = true)]
    pub google_books_key: Option<String>,

    /// LibreTranslate API key
    #[arg(long, global = true, env = "LIBRETRANSLATE_API_KEY", hide_env_values = true)]
    pub translate_key: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Look up an ISBN online and add the book to the library
    Add {
        /// ISBN-10 or ISBN-13, hyphens allowed
        isbn: String,
        /// The book's language (e.g. EN, PT); the description is translated into it
        #[arg(short, long)]
        language: Option<String>,
    },
    /// Look up an ISBN online without saving anything
    Lookup {
        isbn: String,
        #[arg(short, long)]
        language: Option<String>,
    },
    /// Add every ISBN listed in a file (one per line)
    Import {
        file: PathBuf,
    },
    /// Show one book from the library
    Show {
        isbn: String,
    },
    /// List books, optionally filtered (title takes precedence over author, author over genre)
    List {
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        author: Option<String>,
        #[arg(long)]
        genre: Option<String>,
    },
    /// Add a book by hand
    Create {
        #[command(flatten)]
        fields: BookFields,
    },
    /// Change fields of a stored book (unset fields are kept)
    Update {
        #[command(flatten)]
        fields: BookFields,
    },
    /// Remove a book from the library
    Remove {
        isbn: String,
    },
    /// Check an ISBN's format and checksum
    Validate {
        isbn: String,
    },
    /// Show the effective configuration
    Config {
        /// Write a default config file if none exists
        #[arg(long)]
        init: bool,
    },
}

/// Book fields for manual creation and updates
#[derive(Args, Debug, Clone, Default)]
pub struct BookFields {
    #[arg(long)]
    pub isbn: Option<String>,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub author: Option<String>,
    #[arg(long)]
    pub genre: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub language: Option<String>,
    #[arg(long)]
    pub pages: Option<u32>,
    #[arg(long)]
    pub publisher: Option<String>,
    #[arg(long)]
    pub year: Option<String>,
}

impl From<BookFields> for BookUpdate {
    fn from(fields: BookFields) -> Self {
        Self {
            isbn: fields.isbn,
            title: fields.title,
            author: fields.author,
            genre: fields.genre,
            description: fields.description,
            language: fields.language,
            page_count: fields.pages,
            publisher: fields.publisher,
            published_year: fields.year,
        }
    }
}

/// Run the parsed command.
pub fn run_command(cli: &Cli) -> anyhow::Result<()> {
    let rt = Runtime::new()?;

    match &cli.command {
        Commands::Add { isbn, language } => cmd_add(&rt, cli, isbn, language.as_deref()),
        Commands::Lookup { isbn, language } => cmd_lookup(&rt, cli, isbn, language.as_deref()),
        Commands::Import { file } => cmd_import(&rt, cli, file),
        Commands::Show { isbn } => cmd_show(&rt, cli, isbn),
        Commands::List {
            title,
            author,
            genre,
        } => cmd_list(&rt, cli, title.clone(), author.clone(), genre.clone()),
        Commands::Create { fields } => cmd_create(&rt, cli, fields.clone()),
        Commands::Update { fields } => cmd_update(&rt, cli, fields.clone()),
        Commands::Remove { isbn } => cmd_remove(&rt, cli, isbn),
        Commands::Validate { isbn } => cmd_validate(isbn),
        Commands::Config { init } => cmd_config(cli, *init),
    }
}

// ============================================================================
// Shared helper functions
// ============================================================================

/// Config file values with command-line credentials applied
pub(crate) fn load_config(cli: &Cli) -> Config {
    config::load().with_credentials(cli.google_books_key.clone(), cli.translate_key.clone())
}

pub(crate) async fn open_library(cli: &Cli) -> anyhow::Result<Library> {
    let config = load_config(cli);
    Ok(Library::open(&config, cli.db.as_deref()).await?)
}

/// Print a book as an aligned block
pub(crate) fn print_book(book: &Book) {
    let field = |label: &str, value: &str| {
        if !value.is_empty() {
            println!("  {:<10} {}", label, value);
        }
    };

    field("ISBN:", &book.isbn);
    field("Title:", &book.title);
    field("Author:", &book.author);
    field("Genre:", &book.genre);
    field("Publisher:", &book.publisher);
    field("Year:", &book.published_year);
    field("Language:", &book.language);
    if book.page_count > 0 {
        field("Pages:", &book.page_count.to_string());
    }
    if !book.description.is_empty() {
        println!();
        println!("  {}", book.description);
    }
}

/// Print how an enrichment went, including any absorbed failures
pub(crate) fn print_enrichment(enrichment: &Enrichment) {
    println!("✓ Found on {}", enrichment.source);
    println!();
    print_book(&enrichment.book);
    if enrichment.translated {
        println!();
        println!("  (description translated)");
    }
    for degradation in &enrichment.degradations {
        println!("  ⚠ {}", degradation);
    }
}
