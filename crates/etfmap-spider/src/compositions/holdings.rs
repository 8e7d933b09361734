use crate::http::*;
use thiserror::Error;
use tracing::{debug, trace};

/// Boilerplate surrounding the holdings table in an iShares export file.
///
/// The provider wraps the actual table in a fixed-size preamble of metadata
/// and disclaimer lines, and a footnote trailer. Row offsets are 0-based:
/// rows before `header_row` are preamble, `header_row` carries the column
/// names, and everything up to the last `trailer_rows` rows is data. Pinning
/// the offsets here means format drift shows up as a [`LayoutError`] instead
/// of silently corrupted columns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CsvLayout {
    pub header_row: usize,
    pub trailer_rows: usize,
}

/// The export layout iShares has been serving; header on row 9, one footnote
/// row at the end.
pub const ISHARES_LAYOUT_V1: CsvLayout = CsvLayout {
    header_row: 9,
    trailer_rows: 1,
};

impl CsvLayout {
    /// Smallest payload this layout can describe: the full preamble, the
    /// header row and the trailer, with zero data rows.
    pub fn min_rows(&self) -> usize {
        self.header_row + 1 + self.trailer_rows
    }
}

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("payload has {rows} rows, layout requires at least {min}")]
    TooShort { rows: usize, min: usize },

    #[error("payload is not parseable as csv, error({0})")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("download request failed, error({0})")]
    Http(#[from] reqwest::Error),

    #[error("downloaded payload did not match the expected layout, error({0})")]
    Layout(#[from] LayoutError),
}

/// The holdings of one ETF on one day; columns are whatever the provider's
/// header row carried, not fixed by this crate.
#[derive(Debug)]
pub struct CompositionTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl CompositionTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Serialize the table back to csv text, header row first.
    pub fn to_csv_string(&self) -> anyhow::Result<String> {
        let mut writer = csv::WriterBuilder::new()
            .flexible(true)
            .from_writer(Vec::new());
        writer.write_record(&self.headers)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|err| anyhow::anyhow!("failed to flush csv writer, error({err})"))?;
        Ok(String::from_utf8(bytes)?)
    }
}

/// Download the composition behind `download_link` and reshape it with the
/// current iShares layout.
pub async fn fetch(
    http_client: &HttpClient,
    download_link: &str,
) -> Result<CompositionTable, FetchError> {
    debug!("fetching composition file from {download_link}");
    let body = http_client
        .get(download_link)
        .send()
        .await?
        .text()
        .await?;

    Ok(parse(&body, &ISHARES_LAYOUT_V1)?)
}

/// Slice a raw export payload into a [`CompositionTable`] per `layout`.
///
/// The preamble is free-form disclaimer text, not csv, so it is peeled off
/// line by line before the reader runs; an unbalanced quote in the
/// boilerplate can then never swallow the table underneath it. The table
/// itself parses in flexible mode and the shape check happens on row counts
/// only.
pub fn parse(text: &str, layout: &CsvLayout) -> Result<CompositionTable, LayoutError> {
    let min = layout.min_rows();

    let mut preamble_rows = 0;
    let mut table_start = 0;
    for line in text.split_inclusive('\n') {
        if preamble_rows == layout.header_row {
            break;
        }
        table_start += line.len();
        preamble_rows += 1;
    }
    if preamble_rows < layout.header_row {
        return Err(LayoutError::TooShort {
            rows: preamble_rows,
            min,
        });
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text[table_start..].as_bytes());

    let rows = reader
        .records()
        .collect::<Result<Vec<csv::StringRecord>, csv::Error>>()?;

    // header row plus the trailer must still be present
    if rows.len() < min - layout.header_row {
        return Err(LayoutError::TooShort {
            rows: preamble_rows + rows.len(),
            min,
        });
    }

    let headers: Vec<String> = rows[0].iter().map(str::to_string).collect();
    let data: Vec<Vec<String>> = rows[1..rows.len() - layout.trailer_rows]
        .iter()
        .map(|record| record.iter().map(str::to_string).collect())
        .collect();

    trace!(
        "payload sliced into {} data rows under {} columns",
        data.len(),
        headers.len()
    );

    Ok(CompositionTable {
        headers,
        rows: data,
    })
}
