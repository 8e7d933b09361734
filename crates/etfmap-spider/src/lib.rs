/// Holdings-composition pipeline for the iShares product range.
pub mod compositions;

/// ISO 3166-1 country code reference table.
pub mod iso;

/// Cached product-screener listings.
pub mod screener;

pub mod fs;

/// Shortcut for required API elements.
pub(crate) mod http {
    pub(crate) use reqwest::Client as HttpClient;
}

const DEFAULT_USER_AGENT: &str = concat!("etfmap-spider/", env!("CARGO_PKG_VERSION"));

/// Build the standard HTTP client, reused across every request of a run.
///
/// The user agent is read from the `USER_AGENT` environment variable, falling
/// back to the crate's own identifier.
pub fn std_client_build() -> reqwest::Client {
    reqwest::ClientBuilder::new()
        .user_agent(dotenv::var("USER_AGENT").unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string()))
        .build()
        .expect("failed to build reqwest client")
}

/// Format elapsed time for log rollups, e.g. `(elapsed: 3.42s)`.
pub fn time_elapsed(time: std::time::Instant) -> String {
    format!("(elapsed: {:.2}s)", time.elapsed().as_secs_f64())
}
