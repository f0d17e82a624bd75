//! Book enrichment module - turns an ISBN into a complete book record using
//! external bibliographic services.
//!
//! # Architecture
//!
//! This module follows a clean separation between:
//! - **Domain models** (`domain.rs`) - Internal types that represent our business logic
//! - **API DTOs** (`googlebooks/dto.rs`, `openlibrary/dto.rs`, `translate/dto.rs`) - Exact API response shapes
//! - **Adapters** - Convert DTOs to domain models
//! - **Clients** - HTTP clients for external APIs
//! - **Traits** (`traits.rs`) - Seams for swapping clients in tests
//! - **Service** - High-level orchestration of the enrichment flow
//!
//! # Usage
//!
//! ```ignore
//! use book_minder::enrichment::{EnrichmentConfig, EnrichmentService};
//!
//! let service = EnrichmentService::new(EnrichmentConfig::default(), store);
//! let enrichment = service.enrich("978-0-306-40615-7").await?;
//! println!("{} by {}", enrichment.book.title, enrichment.book.author);
//! ```

use std::time::Duration;

pub mod domain;
pub mod extract;
pub mod googlebooks;
pub mod openlibrary;
pub mod service;
pub mod traits;
pub mod translate;

pub use domain::{
    AuthorName, BookCandidate, Degradation, Enrichment, EnrichmentError, EnrichmentSource,
    LookupOutcome,
};
pub use service::{EnrichmentConfig, EnrichmentService};

/// Per-request timeout used when none is configured
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// User agent sent to every external service
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Build the HTTP client shared by the source clients.
fn http_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .gzip(true)
        .build()
        .expect("Failed to build HTTP client")
}
