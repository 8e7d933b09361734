use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, error, trace};

const DATA_DIR: &str = "data";

/// One row of the cached product-screener listing; immutable once loaded.
#[derive(Clone, Debug, Deserialize)]
pub struct Product {
    #[serde(rename = "Ticker")]
    pub ticker: String,

    #[serde(rename = "URL")]
    pub url: String,
}

/// Load the previously stored overview of iShares products for `country`.
///
/// Only `us` is guaranteed to have a backing `data/product_screener_us.csv`;
/// any other country code is accepted but fails with the underlying
/// file-access error when no listing has been cached for it.
pub fn load_products(country: &str) -> anyhow::Result<Vec<Product>> {
    load_products_from(&screener_path(country))
}

/// [`load_products`] with an explicit file path.
pub fn load_products_from(path: &Path) -> anyhow::Result<Vec<Product>> {
    trace!("reading product screener at {:?}", path);
    let mut reader = csv::Reader::from_path(path).map_err(|err| {
        error!("failed to open product screener at {:?}, error({err})", path);
        err
    })?;

    let mut products = Vec::new();
    for record in reader.deserialize() {
        let product: Product = record.map_err(|err| {
            error!("failed to parse product screener row, error({err})");
            err
        })?;
        products.push(product);
    }

    debug!("loaded {} products from {:?}", products.len(), path);
    Ok(products)
}

fn screener_path(country: &str) -> PathBuf {
    Path::new(DATA_DIR).join(format!("product_screener_{country}.csv"))
}
