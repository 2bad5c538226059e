//! Configuration types for flyertown

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::time::Duration;

/// Environment variable holding the superuser login email
pub const EMAIL_VAR: &str = "POCKETBASE_EMAIL";

/// Environment variable holding the superuser login password
pub const PASSWORD_VAR: &str = "POCKETBASE_PASSWORD";

/// Environment variable overriding the PocketBase base URL
pub const URL_VAR: &str = "POCKETBASE_URL";

/// Environment variable naming a JSON file with [`Config`] settings
pub const CONFIG_VAR: &str = "FLYERTOWN_CONFIG";

/// Settings for one fetch run against PocketBase
///
/// The defaults describe the FlyerTown flow: page 1 of `flyers`, 50 per page,
/// authenticated as a `_superusers` account on a local PocketBase.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// PocketBase base URL (default: "http://127.0.0.1:8090")
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Auth collection used for the password login (default: "_superusers")
    #[serde(default = "default_auth_collection")]
    pub auth_collection: String,

    /// Collection to list records from (default: "flyers")
    #[serde(default = "default_collection")]
    pub collection: String,

    /// 1-based page number to request (default: 1)
    #[serde(default = "default_page")]
    pub page: u32,

    /// Page size (default: 50)
    #[serde(default = "default_per_page")]
    pub per_page: u32,

    /// Timeout applied to each HTTP request (default: 30 seconds)
    #[serde(default = "default_request_timeout", with = "timeout_secs")]
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            auth_collection: default_auth_collection(),
            collection: default_collection(),
            page: default_page(),
            per_page: default_per_page(),
            request_timeout: default_request_timeout(),
        }
    }
}

impl Config {
    /// Defaults with `POCKETBASE_URL` applied on top, if set
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults with overrides read through `lookup`
    ///
    /// Lets callers (and tests) supply configuration without touching the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::default().with_overrides(&lookup)
    }

    /// Settings for the binary, read from the process environment
    ///
    /// See [`Config::resolve`].
    pub fn resolve_from_env() -> Result<Self> {
        Self::resolve(|key| std::env::var(key).ok())
    }

    /// Load the file named by `FLYERTOWN_CONFIG` if set (defaults otherwise),
    /// then apply `POCKETBASE_URL` on top
    pub fn resolve<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = match lookup(CONFIG_VAR).filter(|p| !p.trim().is_empty()) {
            Some(path) => Self::load(path.trim())?,
            None => Self::default(),
        };
        let config = config.with_overrides(&lookup);
        config.validate()?;
        Ok(config)
    }

    /// Read and validate settings from a JSON file
    ///
    /// Missing keys take their defaults, so `{}` is a valid file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)
            .map_err(|e| Error::config(CONFIG_VAR, format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        tracing::debug!(path = %path.display(), base_url = %config.base_url, "loaded config");
        Ok(config)
    }

    fn with_overrides<F>(mut self, lookup: &F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(URL_VAR).filter(|u| !u.trim().is_empty()) {
            self.base_url = url.trim().to_string();
        }
        self
    }

    /// Check the settings before any request is made
    pub fn validate(&self) -> Result<()> {
        let parsed = url::Url::parse(&self.base_url).map_err(|e| {
            Error::config("base_url", format!("invalid base URL '{}': {}", self.base_url, e))
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::config(
                "base_url",
                format!("unsupported scheme '{}'", parsed.scheme()),
            ));
        }
        if self.collection.trim().is_empty() {
            return Err(Error::config("collection", "collection name is empty"));
        }
        if self.auth_collection.trim().is_empty() {
            return Err(Error::config(
                "auth_collection",
                "auth collection name is empty",
            ));
        }
        if self.page == 0 {
            return Err(Error::config("page", "page numbers start at 1"));
        }
        if self.per_page == 0 {
            return Err(Error::config("per_page", "page size must be at least 1"));
        }
        Ok(())
    }
}

/// Login for the privileged account
///
/// Passed explicitly into the fetch so nothing reads the environment behind
/// the caller's back. The password never shows up in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Account email (PocketBase "identity")
    pub email: String,
    /// Account password
    pub password: String,
}

impl Credentials {
    /// Create credentials from an email/password pair
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Read `POCKETBASE_EMAIL` and `POCKETBASE_PASSWORD` from the environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read both values through `lookup`; a missing or empty value is an error
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let email = required(&lookup, EMAIL_VAR)?;
        let password = required(&lookup, PASSWORD_VAR)?;
        Ok(Self { email, password })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

fn required<F>(lookup: &F, key: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) if !value.is_empty() => Ok(value),
        Some(_) => Err(Error::config(key, format!("{key} is empty"))),
        None => Err(Error::config(key, format!("{key} not set in environment"))),
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:8090".to_string()
}

fn default_auth_collection() -> String {
    "_superusers".to_string()
}

fn default_collection() -> String {
    "flyers".to_string()
}

fn default_page() -> u32 {
    1
}

fn default_per_page() -> u32 {
    50
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(30)
}

// Request timeout as a number of seconds; fractions allowed ("2.5")
mod timeout_secs {
    use serde::{Deserialize, Deserializer, Serializer, de::Error as _};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(timeout: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        if timeout.subsec_nanos() == 0 {
            serializer.serialize_u64(timeout.as_secs())
        } else {
            serializer.serialize_f64(timeout.as_secs_f64())
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs)
            .map_err(|_| D::Error::custom(format!("invalid timeout of {secs} seconds")))
    }
}
