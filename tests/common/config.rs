//! Test configuration helpers for loading .env credentials

use flyertown::{Config, Credentials};

/// Load PocketBase settings for live tests
///
/// Required environment variables (a `.env` file is read first):
/// - `POCKETBASE_EMAIL` - Superuser email
/// - `POCKETBASE_PASSWORD` - Superuser password
///
/// Optional:
/// - `POCKETBASE_URL` - Base URL (default: http://127.0.0.1:8090)
pub fn load_live_config() -> Option<(Config, Credentials)> {
    dotenvy::dotenv().ok();
    let credentials = Credentials::from_env().ok()?;
    Some((Config::from_env(), credentials))
}

/// Whether live PocketBase credentials are available
pub fn has_live_credentials() -> bool {
    load_live_config().is_some()
}

/// Default config pointed at a mock server
pub fn config_for(base_url: &str) -> Config {
    Config {
        base_url: base_url.to_string(),
        ..Default::default()
    }
}

/// Credentials accepted by [`super::MockPocketBase`]
pub fn valid_credentials() -> Credentials {
    Credentials::new(super::ADMIN_EMAIL, super::ADMIN_PASSWORD)
}
