//! File URL resolution
//!
//! A record's file field only stores a file name. Turning that into a
//! retrieval URL is the backend's convention, so it sits behind the
//! [`FileUrlResolver`] trait. [`PocketBaseFileUrls`] implements the PocketBase
//! rule:
//!
//! ```text
//! {base}/api/files/{collectionId or collectionName}/{recordId}/{filename}[?thumb=..&download=1]
//! ```
//!
//! An empty file name, or a record without an id or collection reference,
//! resolves to `""`.

use crate::types::Record;

/// Turns a record's file reference into an absolute URL
pub trait FileUrlResolver: Send + Sync {
    /// URL for `filename` stored against `record`, or `""` if none can be built
    fn file_url(&self, record: &Record, filename: &str) -> String;
}

/// Optional query parameters appended to a file URL
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FileUrlOptions {
    /// Thumbnail size, e.g. "100x100" or "0x300"
    pub thumb: Option<String>,
    /// Ask the backend to serve the file as an attachment
    pub download: bool,
}

/// PocketBase file URL rule
#[derive(Clone, Debug)]
pub struct PocketBaseFileUrls {
    base_url: String,
    options: FileUrlOptions,
}

impl PocketBaseFileUrls {
    /// Resolver for the given PocketBase base URL, without query parameters
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_options(base_url, FileUrlOptions::default())
    }

    /// Resolver that appends `options` to every non-empty URL
    pub fn with_options(base_url: impl Into<String>, options: FileUrlOptions) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, options }
    }

    fn query(&self) -> String {
        let mut params = Vec::new();
        if let Some(thumb) = self.options.thumb.as_deref().filter(|t| !t.is_empty()) {
            params.push(format!("thumb={}", urlencoding::encode(thumb)));
        }
        if self.options.download {
            params.push("download=1".to_string());
        }

        if params.is_empty() {
            String::new()
        } else {
            format!("?{}", params.join("&"))
        }
    }
}

impl FileUrlResolver for PocketBaseFileUrls {
    fn file_url(&self, record: &Record, filename: &str) -> String {
        if filename.is_empty() || record.id.is_empty() {
            return String::new();
        }
        let Some(collection) = record.collection_id().or_else(|| record.collection_name()) else {
            tracing::debug!(record = %record.id, "record has no collection reference");
            return String::new();
        };

        format!(
            "{}/api/files/{}/{}/{}{}",
            self.base_url,
            urlencoding::encode(collection),
            urlencoding::encode(&record.id),
            urlencoding::encode(filename),
            self.query()
        )
    }
}
