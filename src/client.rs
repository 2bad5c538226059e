//! Minimal PocketBase REST client
//!
//! Covers the two calls the flyer flow needs: a password login against an
//! auth collection and a paginated record list.

use crate::config::{Config, Credentials};
use crate::error::{ApiErrorBody, Error, Result};
use crate::types::{AuthSession, RecordPage};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Body of `POST /api/collections/{collection}/auth-with-password`
#[derive(Serialize)]
struct PasswordAuthRequest<'a> {
    identity: &'a str,
    password: &'a str,
}

/// HTTP client bound to one PocketBase instance
#[derive(Clone, Debug)]
pub struct PocketBaseClient {
    http: reqwest::Client,
    base_url: String,
}

impl PocketBaseClient {
    /// Build a client for `config.base_url` using `config.request_timeout`
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Base URL without a trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self, collection: &str, action: &str) -> String {
        format!(
            "{}/api/collections/{}/{}",
            self.base_url,
            urlencoding::encode(collection),
            action
        )
    }

    /// Log in to `collection` with an email/password pair
    pub async fn auth_with_password(
        &self,
        collection: &str,
        credentials: &Credentials,
    ) -> Result<AuthSession> {
        let url = self.collection_url(collection, "auth-with-password");
        tracing::debug!(url = %url, identity = %credentials.email, "authenticating");

        let response = self
            .http
            .post(&url)
            .json(&PasswordAuthRequest {
                identity: &credentials.email,
                password: &credentials.password,
            })
            .send()
            .await?;

        let session: AuthSession = decode(response).await?;
        if session.token.is_empty() {
            return Err(Error::Decode("auth response carried an empty token".into()));
        }

        tracing::debug!(account = %session.record.id, "authenticated");
        Ok(session)
    }

    /// Fetch one page of `collection`
    pub async fn get_list(
        &self,
        session: &AuthSession,
        collection: &str,
        page: u32,
        per_page: u32,
    ) -> Result<RecordPage> {
        let url = self.collection_url(collection, "records");
        tracing::debug!(url = %url, page, per_page, "listing records");

        let response = self
            .http
            .get(&url)
            .query(&[("page", page), ("perPage", per_page)])
            .header(reqwest::header::AUTHORIZATION, &session.token)
            .send()
            .await?;

        let list: RecordPage = decode(response).await?;
        if list.items.len() > per_page as usize {
            return Err(Error::Decode(format!(
                "page holds {} records, more than the requested {}",
                list.items.len(),
                per_page
            )));
        }
        Ok(list)
    }
}

/// Turn a response into `T`, or into an [`Error::Api`] for non-2xx statuses
async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        let err = ApiErrorBody::into_error(status, &body);
        tracing::warn!(status = status.as_u16(), error = %err, "request rejected");
        return Err(err);
    }

    serde_json::from_str(&body).map_err(|e| Error::Decode(e.to_string()))
}
