//! # flyertown
//!
//! Backend plumbing for the FlyerTown app.
//!
//! - [`RecordFetcher`] logs in to PocketBase as a superuser, lists one page of
//!   the `flyers` collection and prints every flyer with a resolved
//!   `imageUrl`.
//! - [`AppShellConfig`] describes the native app shell (id, name, web asset
//!   directory) read by the Capacitor packaging tool.
//!
//! ## Quick Start
//!
//! ```no_run
//! use flyertown::{Config, Credentials, RecordFetcher};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let fetcher = RecordFetcher::new(Config::default())?;
//!     let credentials = Credentials::new("admin@flyer.town", "secret");
//!
//!     let page = fetcher.fetch(&credentials).await?;
//!     for view in fetcher.enrich(&page) {
//!         println!("{} -> {}", view.record.id, view.image_url);
//!     }
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Native app shell descriptor
pub mod app_shell;
/// PocketBase REST client
pub mod client;
/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// The fetch-and-present flow
pub mod fetcher;
/// File URL resolution
pub mod files;
/// Core record types
pub mod types;

// Re-export commonly used types
pub use app_shell::AppShellConfig;
pub use client::PocketBaseClient;
pub use config::{Config, Credentials};
pub use error::{Error, Result};
pub use fetcher::{ERROR_PREFIX, RecordFetcher, report_failure};
pub use files::{FileUrlOptions, FileUrlResolver, PocketBaseFileUrls};
pub use types::{AuthSession, Record, RecordPage, RecordView};
