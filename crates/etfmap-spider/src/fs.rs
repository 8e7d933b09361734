use crate::compositions::holdings::CompositionTable;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Root of the flat-file output tree; one subdirectory per download date.
pub const DOWNLOAD_ROOT: &str = "downloads/compositions";

/// `<root>/<YYYY-MM-DD>` directory for a run.
pub fn dated_dir(root: &str, date: NaiveDate) -> PathBuf {
    Path::new(root).join(date.to_string())
}

/// Deterministic per-product file name, `<TICKER>_holdings_<YYYY-MM-DD>.csv`.
pub fn composition_file_name(ticker: &str, date: NaiveDate) -> String {
    format!("{ticker}_holdings_{date}.csv")
}

/// Write one composition table under `dir`, creating the directory on first
/// use. Re-running on the same day overwrites the previous file.
///
/// The table is serialized in memory before anything touches the disk, so a
/// failed serialization never leaves a partial file behind.
pub async fn write_composition(
    dir: &Path,
    ticker: &str,
    date: NaiveDate,
    table: &CompositionTable,
) -> anyhow::Result<PathBuf> {
    let body = table.to_csv_string()?;

    trace!("checking output directory {:?}", dir);
    tokio::fs::create_dir_all(dir).await?;

    let path = dir.join(composition_file_name(ticker, date));
    tokio::fs::write(&path, body).await?;
    debug!("composition written to {:?}", path);

    Ok(path)
}
