use serde::Deserialize;
use std::path::Path;
use tracing::{debug, error, trace};

const ISO_MAPPING_PATH: &str = "data/iso_country_mapping.csv";

/// One row of the ISO 3166-1 reference table; both code forms are loaded.
///
/// The reference file is pre-existing, read-only input. Some distributions of
/// it pad the code columns with stray spaces (e.g. `" US"`), so both columns
/// are cleaned on load; see [`load_iso_mapping`].
#[derive(Clone, Debug, Deserialize)]
pub struct CountryCode {
    #[serde(rename = "Country")]
    pub name: String,

    #[serde(rename = "Alpha-2 code")]
    pub alpha2: String,

    #[serde(rename = "Alpha-3 code")]
    pub alpha3: String,
}

/// Load the stored ISO 3166-1 mapping from `data/iso_country_mapping.csv`.
///
/// A missing or unreadable reference file is fatal and returned as an error;
/// no validation is done beyond stripping embedded whitespace from the
/// alpha-2 and alpha-3 columns.
pub fn load_iso_mapping() -> anyhow::Result<Vec<CountryCode>> {
    load_iso_mapping_from(Path::new(ISO_MAPPING_PATH))
}

/// [`load_iso_mapping`] with an explicit file path.
pub fn load_iso_mapping_from(path: &Path) -> anyhow::Result<Vec<CountryCode>> {
    trace!("reading ISO mapping at {:?}", path);
    let mut reader = csv::Reader::from_path(path).map_err(|err| {
        error!("failed to open ISO mapping at {:?}, error({err})", path);
        err
    })?;

    let mut countries = Vec::new();
    for record in reader.deserialize() {
        let mut country: CountryCode = record.map_err(|err| {
            error!("failed to parse ISO mapping row, error({err})");
            err
        })?;
        country.alpha2.retain(|c| c != ' ');
        country.alpha3.retain(|c| c != ' ');
        countries.push(country);
    }

    debug!("loaded {} ISO country codes", countries.len());
    Ok(countries)
}
