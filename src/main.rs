//! `fetch-flyers`: print page 1 of the FlyerTown `flyers` collection.
//!
//! Reads `POCKETBASE_EMAIL` and `POCKETBASE_PASSWORD` (a `.env` file in the
//! working directory is loaded first), plus optional settings from the JSON
//! file named by `FLYERTOWN_CONFIG`. Logs in as a superuser and prints each
//! flyer as JSON with an added `imageUrl`. Failures are reported on stderr and
//! the process still exits normally.

use flyertown::{Config, Credentials, RecordFetcher, report_failure};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // RUST_LOG or default to WARN; logs go to stderr so stdout stays JSON only
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut stdout = std::io::stdout().lock();
    let mut stderr = std::io::stderr();

    match Config::resolve_from_env().and_then(RecordFetcher::new) {
        Ok(fetcher) => {
            fetcher
                .run(Credentials::from_env(), &mut stdout, &mut stderr)
                .await;
        }
        Err(e) => report_failure(&e, &mut stderr),
    }
}
