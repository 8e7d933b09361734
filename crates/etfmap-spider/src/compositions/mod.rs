/// Fetch-and-reshape of the per-ETF holdings file.
pub mod holdings;

/// Download-link resolution from product pages.
pub mod link;

use crate::http::*;
use crate::screener::{self, Product};
use chrono::NaiveDate;
use futures::{stream, StreamExt};
use holdings::FetchError;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Fixed domain prefixed onto relative download hrefs.
pub const PROVIDER_DOMAIN: &str = "https://www.ishares.com";

// scrape
// ----------------------------------------------------------------------------

/// Download every composition listed in the cached screener for `country`,
/// writing one csv per product to `downloads/compositions/<date>/`.
///
/// Products are handled strictly in listing order, one page fetch and one
/// file fetch each. A product without a csv link, with a malformed payload,
/// or behind a failing request is logged and recorded in its [`Outcome`];
/// a single bad ETF never aborts the batch. The call itself only errors when
/// the listing cannot be loaded at all.
pub async fn scrape(country: &str, tui: bool) -> anyhow::Result<Vec<Outcome>> {
    let time = std::time::Instant::now();

    let products = screener::load_products(country)?;
    let download_date = chrono::Local::now().date_naive();
    let out_dir = crate::fs::dated_dir(crate::fs::DOWNLOAD_ROOT, download_date);
    let http_client = crate::std_client_build();

    info!(
        "downloading {} compositions for country \"{country}\" to {:?}",
        products.len(),
        out_dir
    );

    let outcomes =
        scrape_products(&http_client, &products, &out_dir, download_date, tui).await?;

    let summary = Summary::of(&outcomes);
    info!(
        "country \"{country}\" compositions collected: {summary} {}",
        crate::time_elapsed(time)
    );
    if tui {
        println!("downloading {country} compositions ... done ({summary})");
    }

    Ok(outcomes)
}

/// Drive the batch over an already-loaded listing, in listing order, writing
/// every well-formed composition under `out_dir`.
///
/// [`scrape`] is the thin wrapper binding this to the cached screener and
/// the dated downloads directory; the loop itself runs against any listing
/// and output directory.
pub async fn scrape_products(
    http_client: &HttpClient,
    products: &[Product],
    out_dir: &Path,
    download_date: NaiveDate,
    tui: bool,
) -> anyhow::Result<Vec<Outcome>> {
    // progress bar
    let pb = if tui {
        let pb = ProgressBar::new(products.len() as u64).with_style(
            ProgressStyle::default_bar()
                .template(
                    "{msg} {spinner:.magenta}\n\
                    [{elapsed_precise:.magenta}] |{bar:40.cyan/blue}| {human_pos}/{human_len} products \
                    [Rate: {per_sec:.magenta}, ETA: {eta:.blue}]",
                )?
                .progress_chars("##-"),
        );
        pb.set_message("downloading compositions ...");
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    } else {
        ProgressBar::hidden()
    };

    let mut outcomes = Vec::with_capacity(products.len());
    let mut stream = stream::iter(products);
    while let Some(product) = stream.next().await {
        let outcome = handle_product(http_client, out_dir, download_date, product).await;
        pb.inc(1);
        outcomes.push(outcome);
    }

    pb.finish_and_clear();

    Ok(outcomes)
}

/// Resolve, fetch, reshape and write one product's composition.
async fn handle_product(
    http_client: &HttpClient,
    out_dir: &Path,
    download_date: NaiveDate,
    product: &Product,
) -> Outcome {
    let Product { ticker, url } = product;
    info!("downloading composition for [{ticker}] from {url}");

    let download_link = match link::resolve(http_client, url).await {
        Ok(Some(download_link)) => download_link,
        Ok(None) => {
            warn!("no composition found for [{ticker}] at {url}");
            return Outcome::NoLink {
                ticker: ticker.clone(),
            };
        }
        Err(error) => {
            error!("failed to fetch product page for [{ticker}] at {url}, error({error})");
            return Outcome::Failed {
                ticker: ticker.clone(),
                error,
            };
        }
    };

    let table = match holdings::fetch(http_client, &download_link).await {
        Ok(table) => table,
        Err(FetchError::Layout(error)) => {
            warn!("invalid downloaded file for [{ticker}] from {url}, no data downloaded, error({error})");
            return Outcome::Malformed {
                ticker: ticker.clone(),
                error,
            };
        }
        Err(FetchError::Http(err)) => {
            error!("failed to download composition for [{ticker}] from {download_link}, error({err})");
            return Outcome::Failed {
                ticker: ticker.clone(),
                error: err.into(),
            };
        }
    };

    match crate::fs::write_composition(out_dir, ticker, download_date, &table).await {
        Ok(path) => {
            debug!("[{ticker}] composition written, {} holdings", table.rows.len());
            Outcome::Downloaded {
                ticker: ticker.clone(),
                path,
            }
        }
        Err(error) => {
            error!("failed to write composition for [{ticker}], error({error})");
            Outcome::Failed {
                ticker: ticker.clone(),
                error,
            }
        }
    }
}

// outcomes
// ----------------------------------------------------------------------------

/// Per-product result of a composition batch.
#[derive(Debug)]
pub enum Outcome {
    /// Holdings fetched, reshaped and written to `path`.
    Downloaded { ticker: String, path: PathBuf },

    /// The product page carried no csv link; product skipped.
    NoLink { ticker: String },

    /// The downloaded payload did not match the expected export layout;
    /// product skipped, nothing written.
    Malformed {
        ticker: String,
        error: holdings::LayoutError,
    },

    /// Request or filesystem failure; product skipped, nothing written.
    Failed {
        ticker: String,
        error: anyhow::Error,
    },
}

impl Outcome {
    pub fn ticker(&self) -> &str {
        match self {
            Outcome::Downloaded { ticker, .. }
            | Outcome::NoLink { ticker }
            | Outcome::Malformed { ticker, .. }
            | Outcome::Failed { ticker, .. } => ticker,
        }
    }
}

/// Aggregated counts over a batch of [`Outcome`]s.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub downloaded: usize,
    pub no_link: usize,
    pub malformed: usize,
    pub failed: usize,
}

impl Summary {
    pub fn of(outcomes: &[Outcome]) -> Self {
        let mut summary = Summary::default();
        for outcome in outcomes {
            match outcome {
                Outcome::Downloaded { .. } => summary.downloaded += 1,
                Outcome::NoLink { .. } => summary.no_link += 1,
                Outcome::Malformed { .. } => summary.malformed += 1,
                Outcome::Failed { .. } => summary.failed += 1,
            }
        }
        summary
    }

    pub fn total(&self) -> usize {
        self.downloaded + self.no_link + self.malformed + self.failed
    }
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} downloaded, {} without link, {} malformed, {} failed",
            self.downloaded, self.no_link, self.malformed, self.failed
        )
    }
}
