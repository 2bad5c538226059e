//! The flyer fetch flow: authenticate, list one page, attach image URLs, print.

use crate::client::PocketBaseClient;
use crate::config::{Config, Credentials};
use crate::error::{Error, Result};
use crate::files::{FileUrlResolver, PocketBaseFileUrls};
use crate::types::{RecordPage, RecordView};
use std::io::Write;
use std::sync::Arc;

/// Prefix of the single line written to the error sink when a run fails
pub const ERROR_PREFIX: &str = "Error fetching records:";

/// Record field holding the flyer's file attachment
pub const IMAGE_FIELD: &str = "image";

/// Fetches one page of a collection and presents it with resolved image URLs
pub struct RecordFetcher {
    config: Config,
    client: PocketBaseClient,
    resolver: Arc<dyn FileUrlResolver>,
}

impl RecordFetcher {
    /// Fetcher using the PocketBase file URL rule for `config.base_url`
    pub fn new(config: Config) -> Result<Self> {
        let resolver = Arc::new(PocketBaseFileUrls::new(config.base_url.clone()));
        Self::with_resolver(config, resolver)
    }

    /// Fetcher with a custom file URL rule
    pub fn with_resolver(config: Config, resolver: Arc<dyn FileUrlResolver>) -> Result<Self> {
        config.validate()?;
        let client = PocketBaseClient::new(&config)?;
        Ok(Self {
            config,
            client,
            resolver,
        })
    }

    /// Active configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Log in, then request the configured page
    ///
    /// The session lives only for this call.
    pub async fn fetch(&self, credentials: &Credentials) -> Result<RecordPage> {
        let session = self
            .client
            .auth_with_password(&self.config.auth_collection, credentials)
            .await?;

        let page = self
            .client
            .get_list(
                &session,
                &self.config.collection,
                self.config.page,
                self.config.per_page,
            )
            .await?;

        tracing::info!(
            collection = %self.config.collection,
            page = page.page,
            items = page.len(),
            total_items = page.total_items,
            total_pages = page.total_pages,
            "fetched records"
        );
        Ok(page)
    }

    /// Combine each record with its image URL, keeping page order
    ///
    /// An `imageUrl` field already on the record is replaced.
    pub fn enrich(&self, page: &RecordPage) -> Vec<RecordView> {
        page.items
            .iter()
            .map(|record| {
                let image_url = record
                    .file_name(IMAGE_FIELD)
                    .map(|name| self.resolver.file_url(record, name))
                    .unwrap_or_default();

                let mut record = record.clone();
                record.fields.shift_remove("imageUrl");
                RecordView { record, image_url }
            })
            .collect()
    }

    /// Write one pretty-printed JSON object per record to `out`
    ///
    /// The whole page is rendered before anything is written, so a
    /// serialization failure leaves `out` untouched. Returns the number of
    /// records written.
    pub fn present<W: Write>(&self, page: &RecordPage, out: &mut W) -> Result<usize> {
        let views = self.enrich(page);
        let mut buf = Vec::new();
        for view in &views {
            serde_json::to_writer_pretty(&mut buf, view)?;
            buf.push(b'\n');
        }
        out.write_all(&buf)?;
        out.flush()?;
        Ok(views.len())
    }

    /// Run the whole flow, reporting any failure instead of returning it
    ///
    /// `credentials` is taken as a `Result` so that a configuration failure
    /// goes down the same path as a backend rejection. Returns the number of
    /// records printed, or zero on failure. The page goes to `out` in a single
    /// write; only a sink that fails midway through that write can be left
    /// holding part of it.
    pub async fn run<W, E>(
        &self,
        credentials: Result<Credentials>,
        out: &mut W,
        err: &mut E,
    ) -> usize
    where
        W: Write,
        E: Write,
    {
        match self.try_run(credentials, out).await {
            Ok(count) => count,
            Err(e) => {
                report_failure(&e, err);
                0
            }
        }
    }

    async fn try_run<W: Write>(
        &self,
        credentials: Result<Credentials>,
        out: &mut W,
    ) -> Result<usize> {
        let page = self.fetch(&credentials?).await?;
        self.present(&page, out)
    }
}

/// Write the single failure line for `error` to `sink`
///
/// Every error kind is reported the same way. A failure to write the report
/// itself is only logged.
pub fn report_failure<E: Write>(error: &Error, sink: &mut E) {
    tracing::error!(error = %error, "fetch failed");
    let message = single_line(&error.to_string());
    if let Err(e) = writeln!(sink, "{ERROR_PREFIX} {message}") {
        tracing::warn!(error = %e, "could not write failure report");
    }
}

/// Collapse line breaks so a backend message cannot split the report
fn single_line(message: &str) -> String {
    message
        .split(['\r', '\n'])
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
